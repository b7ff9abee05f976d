#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod macros;
pub mod network;
pub mod random;
pub mod signal;
pub mod train;

pub use config::Config;
pub use error::{HarmonyError, Result};
pub use geometry::{distance, Point};
pub use network::{
    activate, connect_isolated_nodes, initialize_network, BuildConfig, Connection, Network, Node,
    NodeId,
};
pub use signal::{Sample, Signal};
pub use train::{evaluate, train, EpochStats, Evaluation, TrainConfig, TrainHooks, WeightHistory};
