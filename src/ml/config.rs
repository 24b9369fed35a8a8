//! Training configuration.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// How [`Network::fit_with`](super::network::Network::fit_with) trains.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize), serde(default))]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    /// Instances per update; `None` trains on the whole set at once.
    pub batch_size: Option<usize>,
    /// Reshuffle the instances every epoch.
    pub shuffle: bool,
    /// Seed of the shuffling order; drawn from the OS when `None`.
    pub seed: Option<u64>,
    /// Show an [`EpochTracker`](super::progress::EpochTracker) while fitting.
    pub verbose: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 100,
            batch_size: None,
            shuffle: false,
            seed: None,
            verbose: false,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
