use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LayerError>;

/// Errors raised while building or running networks and single-neuron models.
///
/// All of them are programmer errors: the call that produced one is aborted
/// and nothing it would have changed is modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    #[error("an InputLayer does not have, nor accept, inputs")]
    InputHasNoInputs,

    #[error("`{name}` is a LossLayer, so it can't have a layer after it")]
    AppendAfterLoss { name: String },

    #[error("layer index {index} out of range for a network of {len} layers")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no layer named `{0}`")]
    NameNotFound(String),

    #[error("a layer named `{0}` already exists in this network")]
    DuplicateName(String),

    #[error("`{name}` expects {expected} values per instance, got {actual}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("`{name}` has not been attached after another layer")]
    Detached { name: String },

    #[error("a network must start with an InputLayer, not a {0}")]
    NotAnInputLayer(String),

    #[error("labels were given but the network does not end with a LossLayer")]
    MissingLossLayer,

    #[error("got {instances} instances but {labels} labels")]
    LabelCountMismatch { instances: usize, labels: usize },

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("cannot {0} on an empty dataset")]
    EmptyDataset(&'static str),
}
