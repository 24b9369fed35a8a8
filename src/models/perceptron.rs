use std::fmt;

use tracing::info;

use super::{check_instances, check_labeled, pre_activation};
use crate::error::Result;
use crate::ml::funcs::sign;

/// Rosenblatt's perceptron: a linear classifier for `±1` labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Perceptron {
    dim: usize,
    bias: f64,
    weights: Vec<f64>,
    fitted: bool,
}

impl Perceptron {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            bias: 0.0,
            weights: vec![0.0; dim],
            fitted: false,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// True once a full pass over the training data changed nothing.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// `1.0`, `-1.0`, or `0.0` exactly on the decision boundary.
    pub fn predict(&self, xs: &[Vec<f64>]) -> Result<Vec<f64>> {
        check_instances("Perceptron", self.dim, xs)?;
        Ok(xs.iter().map(|x| self.classify(x)).collect())
    }

    fn classify(&self, x: &[f64]) -> f64 {
        sign(pre_activation(self.bias, &self.weights, x))
    }

    /// One pass over the data, moving the boundary for every misclassified
    /// instance.
    pub fn partial_fit(&mut self, xs: &[Vec<f64>], ys: &[f64]) -> Result<()> {
        check_labeled("Perceptron", self.dim, xs, ys)?;

        let mut updated = false;
        for (x, y) in xs.iter().zip(ys) {
            let error = self.classify(x) - y;
            if error != 0.0 {
                updated = true;
                self.bias -= error;
                for (w, v) in self.weights.iter_mut().zip(x) {
                    *w -= error * v;
                }
            }
        }
        if !updated {
            self.fitted = true;
        }
        Ok(())
    }

    /// Runs passes until the model is fitted or `epochs` passes are done;
    /// `epochs == 0` means no limit, which only ends for separable data.
    /// Returns the number of passes run.
    pub fn fit(&mut self, xs: &[Vec<f64>], ys: &[f64], epochs: usize) -> Result<usize> {
        let mut completed = 0;
        while !self.fitted && (epochs == 0 || completed < epochs) {
            self.partial_fit(xs, ys)?;
            completed += 1;
        }

        if self.fitted {
            info!(epochs = completed, "perceptron fully fitted");
        } else {
            info!(epochs = completed, "perceptron stopped before converging");
        }
        Ok(completed)
    }
}

impl fmt::Display for Perceptron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Perceptron(dim={})", self.dim)
    }
}
