//! Metrics for judging predictions against labels.

/// Index of the largest value; the first one wins ties. `None` when empty.
pub fn argmax(row: &[f64]) -> Option<usize> {
    row.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Fraction of instances classified correctly.
///
/// Rows with several units are one-hot style: the prediction is right when
/// its argmax matches the label's. Single-unit rows are `±1` style: the signs
/// must agree. Returns 0.0 for no instances.
///
/// ```
/// use minimum_nn::ml::metrics::accuracy;
///
/// let predictions = vec![vec![0.1, 0.9], vec![0.8, 0.2]];
/// let labels = vec![vec![0.0, 1.0], vec![0.0, 1.0]];
/// assert_eq!(accuracy(&predictions, &labels), 0.5);
/// ```
pub fn accuracy(predictions: &[Vec<f64>], labels: &[Vec<f64>]) -> f64 {
    let total = predictions.len().min(labels.len());
    if total == 0 {
        return 0.0;
    }

    let correct = predictions
        .iter()
        .zip(labels)
        .filter(|(yhat, y)| match (yhat.as_slice(), y.as_slice()) {
            ([p], [t]) => super::funcs::sign(*p) == super::funcs::sign(*t),
            _ => argmax(yhat) == argmax(y),
        })
        .count();

    correct as f64 / total as f64
}
