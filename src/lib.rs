#![allow(missing_docs)]
//! Feed-forward neural networks from first principles
//!
//! `minimum_nn` is a small, dependency-light neural network library written in Rust.
//! It provides:
//!
//! - Single-neuron models: a perceptron, linear regression and a generalized neuron
//! - Common activation functions (tanh, sigmoid, ReLU, softmax, etc.) and loss functions
//! - Networks built as a chain of layers (Input, Dense, Activation, Softmax, Loss)
//!   trained by backpropagation and gradient descent
//! - Dataset utilities for batching and iteration
//!
//! # Features
//!
//! This crate supports optional features to minimize dependencies:
//!
//! - `serialization`: Serialize training configurations and histories (adds `serde`, `serde_json`)
//! - `logging`: Enable TensorBoard logging (adds `tensorboard-rs`, `chrono`)
//! - `progress`: Enable progress bars during training (adds `indicatif`)
//! - `full`: Enable all features
//!
//! By default, **no optional features are enabled**, keeping the dependency footprint minimal.
//!
//! ## Examples
//!
//! Minimal install (only core dependencies):
//! ```toml
//! [dependencies]
//! minimum_nn = "0.1.0"
//! ```
//!
//! With all features:
//! ```toml
//! [dependencies]
//! minimum_nn = { version = "0.1.0", features = ["full"] }
//! ```
//!
//! # Usage Example
//!
//! ```
//! use minimum_nn::ml::{funcs::Activation, layers::Layer, losses::Loss, network::Network};
//!
//! let mut network = Network::with_input(2)
//!     .then(Layer::dense_seeded(3, 1))?
//!     .then(Layer::activation(3, Activation::tanh()))?
//!     .then(Layer::dense_seeded(1, 2))?
//!     .then(Layer::loss(Loss::mean_squared_error()))?;
//!
//! let xs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
//! let ys = vec![vec![-1.0], vec![1.0]];
//! let history = network.fit(&xs, &ys, 0.1, 20)?;
//! assert_eq!(history.epochs(), 20);
//! # Ok::<(), minimum_nn::LayerError>(())
//! ```

/// Dataset utilities for loading and batching data.
pub mod dataset;
mod error;
/// Activation and loss functions, layers and networks.
pub mod ml;
/// Perceptron, linear regression and the generalized single neuron.
pub mod models;
/// Utility functions for random number generation.
pub mod utills;

pub use error::{LayerError, Result};

#[cfg(test)]
mod test;
