/// Training configuration.
pub mod config;
/// Numeric derivatives.
pub mod derivative;
/// Activation functions.
pub mod funcs;
/// Per-epoch training metrics.
pub mod history;
/// The layer chain: Input, Dense, Activation, Softmax and Loss layers.
pub mod layers;
/// Logging utilities for training (requires `logging` feature).
#[cfg(feature = "logging")]
pub mod logger;
/// Loss functions and the guarded logarithm.
pub mod losses;
/// Metrics for model evaluation.
pub mod metrics;
/// Networks built from layers and their training loop.
pub mod network;
/// Progress tracking utilities.
pub mod progress;

/// Builds a [`Network`](network::Network) from an Input layer followed by
/// any number of layers or chains. Evaluates to a `Result`.
///
/// # Example
/// ```
/// use minimum_nn::sequential;
/// use minimum_nn::ml::{funcs::Activation, layers::Layer, losses::Loss};
///
/// let network = sequential!(
///     Layer::input(2),
///     [
///         Layer::dense(4),
///         Layer::activation(4, Activation::tanh()),
///         Layer::dense(1),
///         Layer::loss(Loss::mean_squared_error()),
///     ]
/// )?;
/// assert_eq!(network.len(), 5);
/// # Ok::<(), minimum_nn::LayerError>(())
/// ```
#[macro_export]
macro_rules! sequential {
    ($input:expr, [$($layer:expr),* $(,)?]) => {{
        (|| -> $crate::Result<$crate::ml::network::Network> {
            #[allow(unused_mut)]
            let mut network = $crate::ml::network::Network::new($input)?;
            $(
                network.push($layer)?;
            )*
            Ok(network)
        })()
    }};
}
