use thiserror::Error;

pub type Result<T> = core::result::Result<T, HarmonyError>;

#[derive(Debug, Error)]
pub enum HarmonyError {
    #[error("a network needs at least its root node")]
    NoNodes,

    #[error("degree cap must be at least 1, got {0}")]
    DegreeCap(usize),

    #[error("connection radius must be finite and non-negative, got {0}")]
    Radius(f64),

    #[error("placement extent must be finite and positive, got {0}")]
    Extent(f64),

    #[error("training needs at least one epoch")]
    NoEpochs,

    #[error("learning rate must be finite, got {0}")]
    LearningRate(f64),

    #[error("node {id} out of bounds for a network of {len} nodes")]
    NodeOutOfBounds { id: usize, len: usize },

    #[error("cannot reduce an empty signal to a scalar")]
    EmptySignal,

    #[error("invalid sampling range: {0}")]
    Sampling(#[from] rand::distr::uniform::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
