use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minimum_nn::ml::{
    config::TrainConfig, funcs::Activation, history::LOSS, layers::Layer, losses::Loss, metrics,
};
use minimum_nn::models::Perceptron;
use minimum_nn::sequential;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    train_and_gate()?;
    train_xor()?;
    Ok(())
}

/// Logical AND with `±1` encoding, which a perceptron separates exactly.
fn train_and_gate() -> Result<()> {
    let xs = vec![
        vec![-1.0, -1.0],
        vec![-1.0, 1.0],
        vec![1.0, -1.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![-1.0, -1.0, -1.0, 1.0];

    let mut perceptron = Perceptron::new(2);
    let epochs = perceptron.fit(&xs, &ys, 0)?;
    let predictions = perceptron.predict(&xs)?;
    info!(
        %perceptron,
        epochs,
        bias = perceptron.bias(),
        weights = ?perceptron.weights(),
        ?predictions,
        "AND gate"
    );
    Ok(())
}

/// XOR needs a hidden layer.
fn train_xor() -> Result<()> {
    let xs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![vec![-1.0], vec![1.0], vec![1.0], vec![-1.0]];

    let mut network = sequential!(
        Layer::input(2),
        [
            Layer::dense_seeded(4, 42),
            Layer::activation(4, Activation::tanh()),
            Layer::dense_seeded(1, 43),
            Layer::activation(1, Activation::tanh()),
            Layer::loss(Loss::mean_squared_error()),
        ]
    )?;
    info!(%network, "XOR network");

    let config = TrainConfig::default()
        .learning_rate(0.2)
        .epochs(2000)
        .verbose(true);
    let history = network.fit_with(&xs, &ys, &config, None)?;

    let predictions = network.predict(&xs)?;
    info!(
        loss = ?history.last(LOSS),
        accuracy = metrics::accuracy(&predictions, &ys),
        ?predictions,
        "XOR trained"
    );

    #[cfg(feature = "logging")]
    {
        let mut logger = minimum_nn::ml::logger::TensorBoardLogger::new();
        logger.log_history(&history);
    }

    Ok(())
}
