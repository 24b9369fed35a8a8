use std::fmt;

use super::{check_instances, check_labeled, pre_activation};
use crate::error::Result;
use crate::ml::derivative::{derivative, partial_derivative};
use crate::ml::funcs::Activation;
use crate::ml::losses::Loss;

/// A single neuron with any activation and loss, trained by gradient descent.
///
/// Both derivatives are taken numerically, so any function pair works.
#[derive(Clone, Debug)]
pub struct Neuron {
    dim: usize,
    activation: Activation,
    loss: Loss,
    bias: f64,
    weights: Vec<f64>,
}

impl Neuron {
    pub const DEFAULT_ALPHA: f64 = 0.001;
    pub const DEFAULT_EPOCHS: usize = 1000;

    /// Linear activation with squared error, i.e. plain linear regression.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            activation: Activation::linear(),
            loss: Loss::mean_squared_error(),
            bias: 0.0,
            weights: vec![0.0; dim],
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn loss(&self) -> &Loss {
        &self.loss
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn predict(&self, xs: &[Vec<f64>]) -> Result<Vec<f64>> {
        check_instances("Neuron", self.dim, xs)?;
        Ok(xs
            .iter()
            .map(|x| self.activation.call(pre_activation(self.bias, &self.weights, x)))
            .collect())
    }

    pub fn partial_fit(&mut self, xs: &[Vec<f64>], ys: &[f64], alpha: f64) -> Result<()> {
        check_labeled("Neuron", self.dim, xs, ys)?;

        let activation = self.activation.clone();
        let loss = self.loss.clone();
        let activation_prime = derivative(|a| activation.call(a));
        let loss_prime = partial_derivative(|yhat, y| loss.call(yhat, y));

        for (x, &y) in xs.iter().zip(ys) {
            let a = pre_activation(self.bias, &self.weights, x);
            let yhat = activation.call(a);
            let slope = loss_prime(yhat, y) * activation_prime(a);

            self.bias -= alpha * slope;
            for (w, v) in self.weights.iter_mut().zip(x) {
                *w -= alpha * slope * v;
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

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Neuron(dim={}, activation={}, loss={})",
            self.dim,
            self.activation.name(),
            self.loss.name()
        )
    }
}
