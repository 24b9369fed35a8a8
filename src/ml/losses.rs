//! Loss functions over a single `(prediction, target)` pair, and the guarded
//! logarithm the cross-entropy losses rely on.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::derivative::partial_derivative;

type PairFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Point below which [`pseudo_log`] switches to its linear tail.
pub const PSEUDO_LOG_EPSILON: f64 = 0.0001;

/// Natural logarithm that never fails.
///
/// Below `epsilon` the curve continues as the tangent of `ln` at `epsilon`,
/// so non-positive inputs give a finite value instead of `-inf` or NaN.
pub fn pseudo_log(x: f64) -> f64 {
    pseudo_log_with(x, PSEUDO_LOG_EPSILON)
}

pub fn pseudo_log_with(x: f64, epsilon: f64) -> f64 {
    if x < epsilon {
        return epsilon.ln() + (x - epsilon) / epsilon;
    }
    x.ln()
}

pub fn mean_squared_error(yhat: f64, y: f64) -> f64 {
    (yhat - y).powi(2)
}

pub fn mean_absolute_error(yhat: f64, y: f64) -> f64 {
    (yhat - y).abs()
}

pub fn hinge(yhat: f64, y: f64) -> f64 {
    (1.0 - yhat * y).max(0.0)
}

/// Expects `yhat` in [0, 1]; outside that range the result may be negative.
pub fn binary_crossentropy(yhat: f64, y: f64) -> f64 {
    -y * pseudo_log(yhat) - (1.0 - y) * pseudo_log(1.0 - yhat)
}

/// Expects `yhat` in [0, 1], typically the output of a softmax.
pub fn categorical_crossentropy(yhat: f64, y: f64) -> f64 {
    -y * pseudo_log(yhat)
}

/// A loss function paired with its derivative with respect to the prediction.
#[derive(Clone)]
pub struct Loss {
    name: Cow<'static, str>,
    function: PairFn,
    prime: PairFn,
}

impl Loss {
    /// Wraps an arbitrary loss; its derivative is computed numerically.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, function: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        let function: PairFn = Arc::new(function);
        let inner = Arc::clone(&function);
        let prime = partial_derivative(move |yhat, y| inner(yhat, y));
        Self {
            name: name.into(),
            function,
            prime: Arc::new(prime),
        }
    }

    pub fn with_derivative<F, D>(name: impl Into<Cow<'static, str>>, function: F, prime: D) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
            prime: Arc::new(prime),
        }
    }

    pub fn mean_squared_error() -> Self {
        Self::with_derivative("mean_squared_error", mean_squared_error, |yhat, y| {
            2.0 * (yhat - y)
        })
    }

    pub fn mean_absolute_error() -> Self {
        Self::with_derivative("mean_absolute_error", mean_absolute_error, |yhat, y| {
            super::funcs::sign(yhat - y)
        })
    }

    pub fn hinge() -> Self {
        Self::new("hinge", hinge)
    }

    pub fn binary_crossentropy() -> Self {
        Self::new("binary_crossentropy", binary_crossentropy)
    }

    pub fn categorical_crossentropy() -> Self {
        Self::new("categorical_crossentropy", categorical_crossentropy)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, yhat: f64, y: f64) -> f64 {
        (self.function)(yhat, y)
    }

    pub fn prime(&self, yhat: f64, y: f64) -> f64 {
        (self.prime)(yhat, y)
    }
}

impl Default for Loss {
    fn default() -> Self {
        Self::mean_squared_error()
    }
}

impl fmt::Debug for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Loss").field(&self.name).finish()
    }
}
