//! Repeated propagation and Hebbian learning over a set of samples.

use crate::{
    error::{HarmonyError, Result},
    network::Network,
    signal::Signal,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, trace};

/// One flat weight snapshot per epoch, see [Network::weights]
pub type WeightHistory = Vec<Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            learning_rate: 0.1,
        }
    }
}

/// What an epoch left behind, handed to each hook once it ends
pub struct EpochStats<'a> {
    /// 1-based
    pub epoch: usize,
    pub epochs: usize,
    pub weights: &'a [f64],
    pub network: &'a Network,
}

pub type EpochHook = Box<dyn FnMut(&EpochStats<'_>)>;

#[derive(Default)]
pub struct TrainHooks {
    hooks: Vec<EpochHook>,
}

impl TrainHooks {
    pub fn new(hooks: Vec<EpochHook>) -> Self {
        Self { hooks }
    }

    pub fn push(&mut self, hook: EpochHook) {
        self.hooks.push(hook);
    }

    fn fire(&mut self, stats: &EpochStats<'_>) {
        for hook in self.hooks.iter_mut() {
            hook(stats);
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs < 1 {
            return Err(HarmonyError::NoEpochs);
        }
        if !self.learning_rate.is_finite() {
            return Err(HarmonyError::LearningRate(self.learning_rate));
        }
        Ok(())
    }

    pub fn train<S: Signal>(&self, network: &mut Network, samples: &[S]) -> Result<WeightHistory> {
        self.train_with_hooks(network, samples, &mut TrainHooks::default())
    }

    /// For every epoch, propagate each sample from the root in turn and follow it with a
    /// Hebbian update of every node. The weights are recorded once each epoch ends, so the
    /// history always holds `epochs` snapshots, even without samples.
    pub fn train_with_hooks<S: Signal>(
        &self,
        network: &mut Network,
        samples: &[S],
        hooks: &mut TrainHooks,
    ) -> Result<WeightHistory> {
        self.validate()?;
        network.check(Network::ROOT)?;

        let mut history = Vec::with_capacity(self.epochs);
        for epoch in 1..=self.epochs {
            let span = info_span!("epoch", epoch, epochs = self.epochs);
            let _guard = span.enter();
            info!(samples = samples.len(), "epoch started");

            for (idx, sample) in samples.iter().enumerate() {
                let reached = network.propagate(Network::ROOT, sample)?;
                network.hebbian_update_all(self.learning_rate);
                trace!(idx, reached, "sample learned");
            }

            let weights = network.weights();
            info!(
                connections = weights.len(),
                mean_weight = weights.iter().sum::<f64>() / weights.len().max(1) as f64,
                "epoch finished"
            );
            hooks.fire(&EpochStats {
                epoch,
                epochs: self.epochs,
                weights: &weights,
                network: &*network,
            });
            history.push(weights);
        }
        Ok(history)
    }
}

/// Train `network` on `samples` for `epochs`, see [TrainConfig::train_with_hooks]
pub fn train<S: Signal>(
    network: &mut Network,
    samples: &[S],
    epochs: usize,
    learning_rate: f64,
) -> Result<WeightHistory> {
    TrainConfig {
        epochs,
        learning_rate,
    }
    .train(network, samples)
}

/// How many samples drove the root past a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub activated: usize,
    pub total: usize,
}

impl Evaluation {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.
        } else {
            self.activated as f64 / self.total as f64
        }
    }
}

/// Propagate each sample and count those after which the root activation exceeds `threshold`.
/// Weights are left as they are.
pub fn evaluate<S: Signal>(
    network: &mut Network,
    samples: &[S],
    threshold: f64,
) -> Result<Evaluation> {
    let mut activated = 0;
    for sample in samples {
        network.propagate(Network::ROOT, sample)?;
        if network.node(Network::ROOT)?.activation() > threshold {
            activated += 1;
        }
    }
    let eval = Evaluation {
        activated,
        total: samples.len(),
    };
    info!(
        activated,
        total = eval.total,
        ratio = eval.ratio(),
        "evaluated"
    );
    Ok(eval)
}
