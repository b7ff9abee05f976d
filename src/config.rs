use crate::{
    error::Result,
    network::{BuildConfig, Network},
    train::TrainConfig,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

/// Everything needed to grow, repair and train a network, as read from JSON. Missing fields take
/// their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for the network's random source, or none for a fresh one each run
    pub seed: Option<u64>,
    pub network: BuildConfig,
    pub train: TrainConfig,
    /// Root activation above which an evaluated sample counts as activated
    pub threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            network: BuildConfig::default(),
            train: TrainConfig::default(),
            threshold: 0.5,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.train.validate()
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::from_str(&fs::read_to_string(&path)?)?;
        debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Grow the configured network and repair its isolated nodes
    pub fn network(&self, rng: &mut impl RngCore) -> Result<Network> {
        let mut network = self.network.build(rng)?;
        network.connect_isolated(rng)?;
        Ok(network)
    }
}
