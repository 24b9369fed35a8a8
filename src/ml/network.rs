//! A layer chain with an input head, plus the training loop around it.

use std::fmt;
use std::ops::Deref;

use tracing::{debug, info, instrument};

use super::config::TrainConfig;
use super::history::{History, LOSS, VALIDATION_LOSS};
use super::layers::{Layer, Outcome};
use super::progress::EpochTracker;
use crate::dataset::{Batch, Dataloader, LabeledSet};
use crate::error::{LayerError, Result};
use crate::utills::rand::{entropy_seed, XorShift64};

/// A chain of layers that starts with an Input layer.
///
/// Derefs to the head [`Layer`], so indexing, iteration and `Display` work
/// on the whole chain.
///
/// ```
/// use minimum_nn::ml::{layers::Layer, losses::Loss, network::Network};
///
/// let mut network = Network::with_input(2)
///     .then(Layer::dense_seeded(1, 7))?
///     .then(Layer::loss(Loss::mean_squared_error()))?;
///
/// let xs = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
/// let ys = vec![vec![1.0], vec![-1.0]];
/// let before = network.evaluate(&xs, &ys)?;
/// network.fit(&xs, &ys, 0.1, 50)?;
/// assert!(network.evaluate(&xs, &ys)? < before);
/// # Ok::<(), minimum_nn::LayerError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Network {
    head: Layer,
}

impl Network {
    pub fn new(head: Layer) -> Result<Self> {
        if !head.is_input() {
            return Err(LayerError::NotAnInputLayer(head.kind().label().to_string()));
        }
        Ok(Self { head })
    }

    pub fn with_input(width: usize) -> Self {
        Self {
            head: Layer::input(width),
        }
    }

    /// Appends `fragment` and hands the network back, for building in one
    /// expression.
    pub fn then(mut self, fragment: Layer) -> Result<Self> {
        self.head.push(fragment)?;
        Ok(self)
    }

    pub fn push(&mut self, fragment: Layer) -> Result<()> {
        self.head.push(fragment)
    }

    /// Copy of this network followed by a copy of `fragment`.
    pub fn concat(&self, fragment: &Layer) -> Result<Network> {
        Ok(Self {
            head: self.head.concat(fragment)?,
        })
    }

    pub fn head(&self) -> &Layer {
        &self.head
    }

    pub fn into_head(self) -> Layer {
        self.head
    }

    /// See [`Layer::call`].
    pub fn call(
        &mut self,
        xs: &[Vec<f64>],
        labels: Option<&[Vec<f64>]>,
        learning_rate: Option<f64>,
    ) -> Result<Outcome> {
        self.head.call(xs, labels, learning_rate)
    }

    pub fn predict(&self, xs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        Ok(self.head.infer(xs, None)?.predictions)
    }

    /// Mean loss per instance over `xs`.
    pub fn evaluate(&self, xs: &[Vec<f64>], ys: &[Vec<f64>]) -> Result<f64> {
        if xs.is_empty() {
            return Err(LayerError::EmptyDataset("evaluate"));
        }
        let outcome = self.head.infer(xs, Some(ys))?;
        let losses = outcome.losses.ok_or(LayerError::MissingLossLayer)?;
        Ok(losses.iter().sum::<f64>() / losses.len() as f64)
    }

    /// One pass over the data in order, updating after every batch of
    /// `batch_size` instances (the whole set when `None`). Returns the mean
    /// loss seen during the pass.
    #[instrument(skip_all, fields(instances = xs.len(), learning_rate = learning_rate, batch_size = ?batch_size))]
    pub fn partial_fit(
        &mut self,
        xs: &[Vec<f64>],
        ys: &[Vec<f64>],
        learning_rate: f64,
        batch_size: Option<usize>,
    ) -> Result<f64> {
        let loader = self.training_loader(xs, ys, batch_size, "partial_fit")?;
        self.train_on(loader.iter_batch(), learning_rate)
    }

    /// Full-batch training for `epochs` epochs.
    pub fn fit(
        &mut self,
        xs: &[Vec<f64>],
        ys: &[Vec<f64>],
        learning_rate: f64,
        epochs: usize,
    ) -> Result<History> {
        let config = TrainConfig::default()
            .learning_rate(learning_rate)
            .epochs(epochs);
        self.fit_with(xs, ys, &config, None)
    }

    /// Trains as `config` says. After each epoch the whole training set, and
    /// the validation set if given, is evaluated and recorded in the history.
    #[instrument(skip_all, fields(
        instances = xs.len(),
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        batch_size = ?config.batch_size,
    ))]
    pub fn fit_with(
        &mut self,
        xs: &[Vec<f64>],
        ys: &[Vec<f64>],
        config: &TrainConfig,
        validation: Option<(&[Vec<f64>], &[Vec<f64>])>,
    ) -> Result<History> {
        let loader = self.training_loader(xs, ys, config.batch_size, "fit")?;
        if let Some((val_xs, val_ys)) = validation {
            LabeledSet::new(val_xs, val_ys)?;
            if val_xs.is_empty() {
                return Err(LayerError::EmptyDataset("validate"));
            }
            self.head.check_labeled(val_xs, val_ys)?;
        }

        let mut rng = XorShift64::new(config.seed.unwrap_or_else(entropy_seed));
        let mut tracker = config.verbose.then(|| EpochTracker::new(config.epochs));
        let mut history = History::new();

        for epoch in 1..=config.epochs {
            if config.shuffle {
                self.train_on(loader.iter_shuffled(&mut rng), config.learning_rate)?;
            } else {
                self.train_on(loader.iter_batch(), config.learning_rate)?;
            }

            let loss = self.evaluate(xs, ys)?;
            history.push(LOSS, loss);
            let validation_loss = match validation {
                Some((val_xs, val_ys)) => {
                    let value = self.evaluate(val_xs, val_ys)?;
                    history.push(VALIDATION_LOSS, value);
                    Some(value)
                }
                None => None,
            };

            debug!(epoch, loss, validation_loss = ?validation_loss, "epoch finished");
            if let Some(tracker) = tracker.as_mut() {
                tracker.update(epoch, loss);
            }
        }

        if let Some(tracker) = tracker {
            tracker.finish();
        }
        info!(
            epochs = config.epochs,
            loss = ?history.last(LOSS),
            validation_loss = ?history.last(VALIDATION_LOSS),
            "training finished"
        );
        Ok(history)
    }

    fn train_on<I>(&mut self, batches: I, learning_rate: f64) -> Result<f64>
    where
        I: Iterator<Item = Batch>,
    {
        let mut total = 0.0;
        let mut count = 0;
        for batch in batches {
            let outcome = self
                .head
                .call(&batch.xs, Some(batch.ys.as_slice()), Some(learning_rate))?;
            let losses = outcome.losses.ok_or(LayerError::MissingLossLayer)?;
            total += losses.iter().sum::<f64>();
            count += losses.len();
        }
        Ok(total / count.max(1) as f64)
    }

    /// Every row is checked here, so a bad row fails the call before any
    /// batch has updated the weights.
    fn training_loader<'a>(
        &self,
        xs: &'a [Vec<f64>],
        ys: &'a [Vec<f64>],
        batch_size: Option<usize>,
        operation: &'static str,
    ) -> Result<Dataloader<LabeledSet<'a>>> {
        let dataset = LabeledSet::new(xs, ys)?;
        if xs.is_empty() {
            return Err(LayerError::EmptyDataset(operation));
        }
        let batch_size = batch_size.unwrap_or(xs.len());
        if batch_size == 0 {
            return Err(LayerError::ZeroBatchSize);
        }
        self.head.check_labeled(xs, ys)?;
        Ok(Dataloader::new(dataset, batch_size, false))
    }
}

impl Deref for Network {
    type Target = Layer;

    fn deref(&self) -> &Layer {
        &self.head
    }
}

impl TryFrom<Layer> for Network {
    type Error = LayerError;

    fn try_from(head: Layer) -> Result<Self> {
        Self::new(head)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.head, f)
    }
}
