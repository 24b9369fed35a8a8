//! Single-neuron models trained one instance at a time.
//!
//! They predict one value per instance and take plain `f64` labels. All
//! weights and the bias start at zero.

mod linear_regression;
mod neuron;
mod perceptron;

pub use linear_regression::LinearRegression;
pub use neuron::Neuron;
pub use perceptron::Perceptron;

use crate::error::{LayerError, Result};

fn pre_activation(bias: f64, weights: &[f64], x: &[f64]) -> f64 {
    bias + weights.iter().zip(x).map(|(w, v)| w * v).sum::<f64>()
}

fn check_instances(model: &str, dim: usize, xs: &[Vec<f64>]) -> Result<()> {
    match xs.iter().find(|x| x.len() != dim) {
        Some(x) => Err(LayerError::DimensionMismatch {
            name: model.to_string(),
            expected: dim,
            actual: x.len(),
        }),
        None => Ok(()),
    }
}

fn check_labeled(model: &str, dim: usize, xs: &[Vec<f64>], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(LayerError::LabelCountMismatch {
            instances: xs.len(),
            labels: ys.len(),
        });
    }
    check_instances(model, dim, xs)
}
