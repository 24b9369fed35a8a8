use std::fmt;

use super::{check_instances, check_labeled, pre_activation};
use crate::error::Result;

/// A perceptron with the identity as activation, fitted with a learning rate.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRegression {
    dim: usize,
    bias: f64,
    weights: Vec<f64>,
}

impl LinearRegression {
    pub const DEFAULT_ALPHA: f64 = 0.01;
    pub const DEFAULT_EPOCHS: usize = 1000;

    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            bias: 0.0,
            weights: vec![0.0; dim],
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

    pub fn predict(&self, xs: &[Vec<f64>]) -> Result<Vec<f64>> {
        check_instances("LinearRegression", self.dim, xs)?;
        Ok(xs
            .iter()
            .map(|x| pre_activation(self.bias, &self.weights, x))
            .collect())
    }

    pub fn partial_fit(&mut self, xs: &[Vec<f64>], ys: &[f64], alpha: f64) -> Result<()> {
        check_labeled("LinearRegression", self.dim, xs, ys)?;

        for (x, y) in xs.iter().zip(ys) {
            let error = pre_activation(self.bias, &self.weights, x) - y;
            self.bias -= alpha * error;
            for (w, v) in self.weights.iter_mut().zip(x) {
                *w -= alpha * error * v;
            }
        }
        Ok(())
    }

    pub fn fit(&mut self, xs: &[Vec<f64>], ys: &[f64], alpha: f64, epochs: usize) -> Result<()> {
        for _ in 0..epochs {
            self.partial_fit(xs, ys, alpha)?;
        }
        Ok(())
    }
}

impl fmt::Display for LinearRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearRegression(dim={})", self.dim)
    }
}
