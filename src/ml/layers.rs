//! Layers and the chain they form.
//!
//! A network is a singly linked list of [`Layer`] nodes, each owning the next
//! one. Calling the head runs the forward pass node by node; on the way back
//! every node turns the gradient it receives into the gradient for its own
//! inputs, and Dense nodes update their weights in place.
//!
//! ```
//! use minimum_nn::ml::layers::Layer;
//! use minimum_nn::ml::funcs::Activation;
//! use minimum_nn::ml::losses::Loss;
//!
//! let mut chain = Layer::input(2);
//! chain.push(Layer::dense(3))?;
//! chain.push(Layer::activation(3, Activation::tanh()))?;
//! chain.push(Layer::loss(Loss::mean_squared_error()))?;
//!
//! assert_eq!(chain.len(), 4);
//! assert_eq!(chain[1].input_width(), Some(2));
//! assert_eq!(chain["ActivationLayer_1"].output_width(), Some(3));
//! # Ok::<(), minimum_nn::LayerError>(())
//! ```

mod activation;
mod dense;
mod loss;
mod softmax;

pub use dense::Dense;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Index;

use tracing::trace;

use super::funcs::Activation;
use super::losses::Loss;
use crate::error::{LayerError, Result};
use crate::utills::rand::entropy_seed;

/// What a call on a layer returns.
///
/// `losses` is only present when labels were given, `gradients` only when a
/// learning rate was given as well. The gradients are those of the loss with
/// respect to the values the called layer received.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub predictions: Vec<Vec<f64>>,
    pub losses: Option<Vec<f64>>,
    pub gradients: Option<Vec<Vec<f64>>>,
}

impl Outcome {
    fn predictions(predictions: Vec<Vec<f64>>) -> Self {
        Self {
            predictions,
            losses: None,
            gradients: None,
        }
    }
}

/// The variant-specific part of a layer.
#[derive(Clone, Debug)]
pub enum LayerKind {
    Input,
    Dense(Dense),
    Activation(Activation),
    Softmax,
    Loss(Loss),
}

impl LayerKind {
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Input => "InputLayer",
            LayerKind::Dense(_) => "DenseLayer",
            LayerKind::Activation(_) => "ActivationLayer",
            LayerKind::Softmax => "SoftmaxLayer",
            LayerKind::Loss(_) => "LossLayer",
        }
    }

    fn forward(&self, xs: &[Vec<f64>]) -> Vec<Vec<f64>> {
        match self {
            LayerKind::Input | LayerKind::Loss(_) => xs.to_vec(),
            LayerKind::Dense(dense) => dense.forward(xs),
            LayerKind::Activation(function) => activation::forward(function, xs),
            LayerKind::Softmax => softmax::forward(xs),
        }
    }

    fn backward(
        &mut self,
        xs: &[Vec<f64>],
        outputs: &[Vec<f64>],
        gradients: Vec<Vec<f64>>,
        learning_rate: f64,
    ) -> Vec<Vec<f64>> {
        match self {
            LayerKind::Input | LayerKind::Loss(_) => gradients,
            LayerKind::Dense(dense) => dense.backward(xs, &gradients, learning_rate),
            LayerKind::Activation(function) => activation::backward(function, xs, &gradients),
            LayerKind::Softmax => softmax::backward(outputs, &gradients),
        }
    }
}

/// One node of a network, owning the rest of the chain behind it.
#[derive(Clone, Debug)]
pub struct Layer {
    name: String,
    auto_named: bool,
    input_width: Option<usize>,
    output_width: Option<usize>,
    kind: LayerKind,
    next: Option<Box<Layer>>,
}

impl Layer {
    fn with_kind(kind: LayerKind, output_width: Option<usize>) -> Self {
        Self {
            name: format!("{}_1", kind.label()),
            auto_named: true,
            input_width: None,
            output_width,
            kind,
            next: None,
        }
    }

    /// Head of a network taking `width` values per instance.
    pub fn input(width: usize) -> Self {
        Self::with_kind(LayerKind::Input, Some(width))
    }

    /// Fully connected layer with `width` outputs. The initial weights come
    /// from a seed drawn from the OS.
    pub fn dense(width: usize) -> Self {
        Self::dense_seeded(width, entropy_seed())
    }

    /// Fully connected layer whose initial weights are reproducible from `seed`.
    pub fn dense_seeded(width: usize, seed: u64) -> Self {
        Self::with_kind(LayerKind::Dense(Dense::new(seed)), Some(width))
    }

    pub fn activation(width: usize, function: Activation) -> Self {
        Self::with_kind(LayerKind::Activation(function), Some(width))
    }

    pub fn softmax(width: usize) -> Self {
        Self::with_kind(LayerKind::Softmax, Some(width))
    }

    /// Terminal layer; its width is whatever the layer before it emits.
    pub fn loss(function: Loss) -> Self {
        Self::with_kind(LayerKind::Loss(function), None)
    }

    /// Replaces the generated name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.auto_named = false;
        self
    }

    /// Attaches `next` (and whatever follows it) behind this layer.
    pub fn with_successor(mut self, next: Layer) -> Result<Self> {
        self.push(next)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_width(&self) -> Option<usize> {
        self.input_width
    }

    pub fn output_width(&self) -> Option<usize> {
        self.output_width
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn next(&self) -> Option<&Layer> {
        self.next.as_deref()
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, LayerKind::Input)
    }

    pub fn is_loss(&self) -> bool {
        matches!(self.kind, LayerKind::Loss(_))
    }

    pub fn as_dense(&self) -> Option<&Dense> {
        match &self.kind {
            LayerKind::Dense(dense) => Some(dense),
            _ => None,
        }
    }

    pub fn as_activation(&self) -> Option<&Activation> {
        match &self.kind {
            LayerKind::Activation(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_loss(&self) -> Option<&Loss> {
        match &self.kind {
            LayerKind::Loss(function) => Some(function),
            _ => None,
        }
    }

    /// Number of layers from this one to the end of the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    pub fn tail(&self) -> &Layer {
        let mut node = self;
        while let Some(next) = node.next.as_deref() {
            node = next;
        }
        node
    }

    /// Layer at `index`, counted from this one.
    pub fn get(&self, index: usize) -> Result<&Layer> {
        self.iter()
            .nth(index)
            .ok_or_else(|| LayerError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn get_named(&self, name: &str) -> Result<&Layer> {
        self.iter()
            .find(|layer| layer.name == name)
            .ok_or_else(|| LayerError::NameNotFound(name.to_string()))
    }

    /// Appends `fragment` (a single layer or a chain of them) at the end of
    /// this chain. On error the chain is left as it was.
    ///
    /// This is the chain's `+=`. It can fail, so it is a method returning
    /// [`Result`] rather than an `AddAssign` impl.
    pub fn push(&mut self, mut fragment: Layer) -> Result<()> {
        let tail = self.tail();
        let width = match (&tail.kind, tail.output_width) {
            (LayerKind::Loss(_), _) | (_, None) => {
                return Err(LayerError::AppendAfterLoss {
                    name: tail.name.clone(),
                })
            }
            (_, Some(width)) => width,
        };

        fragment.assign_input_width(width)?;

        let mut taken: HashSet<String> = HashSet::new();
        let mut counts: HashMap<&'static str, usize> = HashMap::new();
        for layer in self.iter() {
            taken.insert(layer.name.clone());
            *counts.entry(layer.kind.label()).or_insert(0) += 1;
        }
        fragment.claim_names(&mut taken, &mut counts)?;

        trace!(
            after = %tail.name,
            layer = %fragment.name,
            input_width = width,
            "attaching layer"
        );
        self.link(fragment);
        Ok(())
    }

    /// Deep copy of this chain followed by a deep copy of `other`.
    /// Neither chain is modified and the result shares nothing with them.
    ///
    /// `a.concat(&b)?` is the fallible spelling of `a + b`.
    pub fn concat(&self, other: &Layer) -> Result<Layer> {
        let mut result = self.clone();
        result.push(other.clone())?;
        Ok(result)
    }

    fn link(&mut self, fragment: Layer) {
        match self.next {
            Some(ref mut next) => next.link(fragment),
            None => self.next = Some(Box::new(fragment)),
        }
    }

    fn assign_input_width(&mut self, width: usize) -> Result<()> {
        match self.input_width {
            Some(current) if current == width => return Ok(()),
            Some(current) => {
                return Err(LayerError::DimensionMismatch {
                    name: self.name.clone(),
                    expected: current,
                    actual: width,
                })
            }
            None => {}
        }

        match (&mut self.kind, self.output_width) {
            (LayerKind::Input, _) => return Err(LayerError::InputHasNoInputs),
            (LayerKind::Dense(dense), Some(outputs)) => dense.initialize(width, outputs),
            (LayerKind::Activation(_) | LayerKind::Softmax, Some(outputs)) if outputs != width => {
                return Err(LayerError::DimensionMismatch {
                    name: self.name.clone(),
                    expected: outputs,
                    actual: width,
                })
            }
            _ => {}
        }
        self.input_width = Some(width);
        Ok(())
    }

    fn claim_names(
        &mut self,
        taken: &mut HashSet<String>,
        counts: &mut HashMap<&'static str, usize>,
    ) -> Result<()> {
        let label = self.kind.label();
        let count = counts.entry(label).or_insert(0);
        *count += 1;

        if self.auto_named {
            let mut candidate = format!("{label}_{count}");
            while taken.contains(&candidate) {
                *count += 1;
                candidate = format!("{label}_{count}");
            }
            self.name = candidate;
        } else if taken.contains(&self.name) {
            return Err(LayerError::DuplicateName(self.name.clone()));
        }
        taken.insert(self.name.clone());

        match self.next.as_deref_mut() {
            Some(next) => next.claim_names(taken, counts),
            None => Ok(()),
        }
    }

    fn expected_width(&self) -> Result<usize> {
        let width = match self.kind {
            LayerKind::Input => self.output_width,
            _ => self.input_width,
        };
        width.ok_or_else(|| LayerError::Detached {
            name: self.name.clone(),
        })
    }

    fn check_instances(&self, xs: &[Vec<f64>]) -> Result<()> {
        let expected = self.expected_width()?;
        match xs.iter().find(|x| x.len() != expected) {
            Some(x) => Err(LayerError::DimensionMismatch {
                name: self.name.clone(),
                expected,
                actual: x.len(),
            }),
            None => Ok(()),
        }
    }

    /// Checks every row of a labeled set against the widths of this chain
    /// without running it.
    pub(crate) fn check_labeled(&self, xs: &[Vec<f64>], ys: &[Vec<f64>]) -> Result<()> {
        self.check_instances(xs)?;
        let tail = self.tail();
        if !tail.is_loss() {
            return Err(LayerError::MissingLossLayer);
        }
        tail.check_instances(ys)
    }

    /// Runs `xs` through this layer and everything after it.
    ///
    /// With `labels` the loss layer reports a loss per instance; with a
    /// `learning_rate` as well, gradients flow back and every Dense layer
    /// updates its parameters before the call returns.
    pub fn call(
        &mut self,
        xs: &[Vec<f64>],
        labels: Option<&[Vec<f64>]>,
        learning_rate: Option<f64>,
    ) -> Result<Outcome> {
        self.check_instances(xs)?;
        if let LayerKind::Loss(function) = &self.kind {
            return loss::evaluate(function, &self.name, xs, labels, learning_rate.is_some());
        }

        let outputs = self.kind.forward(xs);
        let next = match self.next.as_deref_mut() {
            Some(next) => next,
            None => return unterminated(outputs, labels),
        };
        let mut outcome = next.call(&outputs, labels, learning_rate)?;

        if let (Some(rate), Some(gradients)) = (learning_rate, outcome.gradients.take()) {
            outcome.gradients = Some(self.kind.backward(xs, &outputs, gradients, rate));
        }
        Ok(outcome)
    }

    /// Forward pass only; never touches any parameter.
    pub fn infer(&self, xs: &[Vec<f64>], labels: Option<&[Vec<f64>]>) -> Result<Outcome> {
        self.check_instances(xs)?;
        if let LayerKind::Loss(function) = &self.kind {
            return loss::evaluate(function, &self.name, xs, labels, false);
        }

        let outputs = self.kind.forward(xs);
        match self.next.as_deref() {
            Some(next) => next.infer(&outputs, labels),
            None => unterminated(outputs, labels),
        }
    }
}

fn unterminated(outputs: Vec<Vec<f64>>, labels: Option<&[Vec<f64>]>) -> Result<Outcome> {
    match labels {
        Some(_) => Err(LayerError::MissingLossLayer),
        None => Ok(Outcome::predictions(outputs)),
    }
}

/// Iterator over a chain, starting at the layer it was created from.
pub struct Iter<'a> {
    next: Option<&'a Layer>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Layer;

    fn next(&mut self) -> Option<Self::Item> {
        let layer = self.next?;
        self.next = layer.next.as_deref();
        Some(layer)
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Layer;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for Layer {
    type Output = Layer;

    fn index(&self, index: usize) -> &Layer {
        match self.get(index) {
            Ok(layer) => layer,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Index<&str> for Layer {
    type Output = Layer;

    fn index(&self, name: &str) -> &Layer {
        match self.get_named(name) {
            Ok(layer) => layer,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, layer) in self.iter().enumerate() {
            if position > 0 {
                write!(f, " + ")?;
            }
            let label = layer.kind.label();
            match &layer.kind {
                LayerKind::Loss(function) => write!(
                    f,
                    "{label}(num_inputs={}, name='{}', loss='{}')",
                    Width(layer.input_width),
                    layer.name,
                    function.name()
                )?,
                LayerKind::Activation(function) => write!(
                    f,
                    "{label}(num_outputs={}, name='{}', activation='{}')",
                    Width(layer.output_width),
                    layer.name,
                    function.name()
                )?,
                _ => write!(
                    f,
                    "{label}(num_outputs={}, name='{}')",
                    Width(layer.output_width),
                    layer.name
                )?,
            }
        }
        Ok(())
    }
}

struct Width(Option<usize>);

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(width) => write!(f, "{width}"),
            None => write!(f, "None"),
        }
    }
}
