use super::Outcome;
use crate::error::{LayerError, Result};
use crate::ml::losses::Loss;

/// Terminal step of every call: the loss per instance is the sum over units,
/// and the gradient is the derivative of the loss per unit.
pub(super) fn evaluate(
    function: &Loss,
    name: &str,
    predictions: &[Vec<f64>],
    labels: Option<&[Vec<f64>]>,
    with_gradients: bool,
) -> Result<Outcome> {
    let labels = match labels {
        Some(labels) => labels,
        None => {
            return Ok(Outcome {
                predictions: predictions.to_vec(),
                losses: None,
                gradients: None,
            })
        }
    };

    if labels.len() != predictions.len() {
        return Err(LayerError::LabelCountMismatch {
            instances: predictions.len(),
            labels: labels.len(),
        });
    }
    for (yhat, y) in predictions.iter().zip(labels) {
        if yhat.len() != y.len() {
            return Err(LayerError::DimensionMismatch {
                name: name.to_string(),
                expected: yhat.len(),
                actual: y.len(),
            });
        }
    }

    let losses = predictions
        .iter()
        .zip(labels)
        .map(|(yhat, y)| yhat.iter().zip(y).map(|(&p, &t)| function.call(p, t)).sum())
        .collect();
    let gradients = with_gradients.then(|| {
        predictions
            .iter()
            .zip(labels)
            .map(|(yhat, y)| yhat.iter().zip(y).map(|(&p, &t)| function.prime(p, t)).collect())
            .collect()
    });

    Ok(Outcome {
        predictions: predictions.to_vec(),
        losses: Some(losses),
        gradients,
    })
}
