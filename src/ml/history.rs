//! Per-epoch metrics recorded while fitting.

use std::collections::BTreeMap;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Key of the training loss series.
pub const LOSS: &str = "loss";
/// Key of the validation loss series.
pub const VALIDATION_LOSS: &str = "validation_loss";

/// Metric series keyed by name, one value per epoch.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct History {
    metrics: BTreeMap<String, Vec<f64>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(Vec::as_slice)
    }

    pub fn last(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|values| values.last().copied())
    }

    /// Length of the longest series.
    pub fn epochs(&self) -> usize {
        self.metrics.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn metrics(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.metrics
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[cfg(feature = "serialization")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    #[cfg(feature = "serialization")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
