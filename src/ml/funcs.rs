//! Activation functions.
//!
//! Every function maps a pre-activation value to a post-activation value.
//! The free functions are the raw math; [`Activation`] packs one of them with
//! its derivative so a layer or neuron can carry it around.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::derivative::derivative;

type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Identity.
pub fn linear(a: f64) -> f64 {
    a
}

/// Signum: 1.0, -1.0 or 0.0.
pub fn sign(a: f64) -> f64 {
    if a > 0.0 {
        1.0
    } else if a < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn tanh(a: f64) -> f64 {
    a.tanh()
}

pub fn softsign(a: f64) -> f64 {
    a / (1.0 + a.abs())
}

/// Logistic sigmoid. Branches on the sign of `a` so `exp` never overflows.
pub fn sigmoid(a: f64) -> f64 {
    if a >= 0.0 {
        1.0 / (1.0 + (-a).exp())
    } else {
        let e_a = a.exp();
        e_a / (1.0 + e_a)
    }
}

/// `ln(1 + e^a)`, rewritten as `ln(1 + e^-|a|) + max(a, 0)` to stay finite.
pub fn softplus(a: f64) -> f64 {
    (-a.abs()).exp().ln_1p() + a.max(0.0)
}

pub fn relu(a: f64) -> f64 {
    a.max(0.0)
}

/// Sigmoid-weighted linear unit.
pub fn swish(a: f64, beta: f64) -> f64 {
    a * sigmoid(beta * a)
}

/// Identity for `a >= 0`, swish-like for negative inputs.
pub fn nipuna(a: f64, beta: f64) -> f64 {
    if a >= 0.0 {
        return a;
    }
    let exp_beta_a = (beta * a).exp();
    a * exp_beta_a / (1.0 + exp_beta_a)
}

/// Exponential Linear Sigmoid SquasHing.
pub fn elish(a: f64) -> f64 {
    if a >= 0.0 {
        return swish(a, 1.0);
    }
    let exp_a = a.exp();
    (exp_a * (exp_a - 1.0)) / (1.0 + exp_a)
}

/// Hard Exponential Linear Sigmoid SquasHing.
pub fn hardelish(a: f64) -> f64 {
    let hard_sigmoid = ((a + 1.0) / 2.0).clamp(0.0, 1.0);
    if a >= 0.0 {
        a * hard_sigmoid
    } else {
        (a.exp() - 1.0) * hard_sigmoid
    }
}

/// Softmax over one instance. The maximum is subtracted before `exp` so
/// large inputs do not overflow.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// An activation function paired with its derivative.
///
/// Functions with a closed-form derivative carry it; the others fall back to
/// the numeric derivative from [`super::derivative`].
#[derive(Clone)]
pub struct Activation {
    name: Cow<'static, str>,
    function: ScalarFn,
    prime: ScalarFn,
}

impl Activation {
    /// Wraps an arbitrary function; its derivative is computed numerically.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, function: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let function: ScalarFn = Arc::new(function);
        let inner = Arc::clone(&function);
        let prime = derivative(move |a| inner(a));
        Self {
            name: name.into(),
            function,
            prime: Arc::new(prime),
        }
    }

    pub fn with_derivative<F, D>(name: impl Into<Cow<'static, str>>, function: F, prime: D) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
            prime: Arc::new(prime),
        }
    }

    pub fn linear() -> Self {
        Self::with_derivative("linear", linear, |_| 1.0)
    }

    pub fn sign() -> Self {
        Self::new("sign", sign)
    }

    pub fn tanh() -> Self {
        Self::with_derivative("tanh", tanh, |a| 1.0 - a.tanh().powi(2))
    }

    pub fn softsign() -> Self {
        Self::with_derivative("softsign", softsign, |a| 1.0 / (1.0 + a.abs()).powi(2))
    }

    pub fn sigmoid() -> Self {
        Self::with_derivative("sigmoid", sigmoid, |a| {
            let s = sigmoid(a);
            s * (1.0 - s)
        })
    }

    pub fn softplus() -> Self {
        Self::with_derivative("softplus", softplus, sigmoid)
    }

    pub fn relu() -> Self {
        Self::with_derivative("relu", relu, |a| if a > 0.0 { 1.0 } else { 0.0 })
    }

    pub fn swish(beta: f64) -> Self {
        Self::new("swish", move |a| swish(a, beta))
    }

    pub fn nipuna(beta: f64) -> Self {
        Self::new("nipuna", move |a| nipuna(a, beta))
    }

    pub fn elish() -> Self {
        Self::new("elish", elish)
    }

    pub fn hardelish() -> Self {
        Self::new("hardelish", hardelish)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, a: f64) -> f64 {
        (self.function)(a)
    }

    pub fn prime(&self, a: f64) -> f64 {
        (self.prime)(a)
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::linear()
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Activation").field(&self.name).finish()
    }
}
