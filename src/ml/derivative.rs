//! Centered finite-difference derivatives of scalar functions.

/// Step size used by [`derivative`] and [`partial_derivative`].
pub const DEFAULT_DELTA: f64 = 0.01;

/// Numeric derivative of a one-argument function with step [`DEFAULT_DELTA`].
///
/// ```
/// use minimum_nn::ml::derivative::derivative;
///
/// let square_prime = derivative(|x: f64| x * x);
/// assert!((square_prime(3.0) - 6.0).abs() < 1e-2);
/// ```
pub fn derivative<F>(function: F) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    derivative_with(function, DEFAULT_DELTA)
}

/// Numeric derivative of a one-argument function with step `delta`.
pub fn derivative_with<F>(function: F, delta: f64) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |x| (function(x + delta) - function(x - delta)) / (2.0 * delta)
}

/// Numeric derivative of a two-argument function with respect to its first
/// argument, e.g. a loss `(prediction, target)`.
pub fn partial_derivative<F>(function: F) -> impl Fn(f64, f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    partial_derivative_with(function, DEFAULT_DELTA)
}

pub fn partial_derivative_with<F>(function: F, delta: f64) -> impl Fn(f64, f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    move |x, rest| (function(x + delta, rest) - function(x - delta, rest)) / (2.0 * delta)
}
