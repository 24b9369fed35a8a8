use crate::error::{LayerError, Result};
use crate::utills::rand::XorShift64;

pub trait Stackable: Sized {
    type Output;
    fn stack(batch: Vec<Self>) -> Self::Output;
}

/// Row-major instances stack by concatenating their rows.
impl Stackable for Vec<Vec<f64>> {
    type Output = Vec<Vec<f64>>;
    fn stack(batch: Vec<Self>) -> Self::Output {
        batch.into_iter().flatten().collect()
    }
}

/// Instances and their labels, row for row.
#[derive(Clone, Debug, Default, PartialEq, Stackable)]
pub struct Batch {
    pub xs: Vec<Vec<f64>>,
    pub ys: Vec<Vec<f64>>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

pub trait Dataset {
    type Item: Stackable;

    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Self::Item;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed instances and labels of equal length.
#[derive(Clone, Copy, Debug)]
pub struct LabeledSet<'a> {
    xs: &'a [Vec<f64>],
    ys: &'a [Vec<f64>],
}

impl<'a> LabeledSet<'a> {
    pub fn new(xs: &'a [Vec<f64>], ys: &'a [Vec<f64>]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(LayerError::LabelCountMismatch {
                instances: xs.len(),
                labels: ys.len(),
            });
        }
        Ok(Self { xs, ys })
    }
}

impl Dataset for LabeledSet<'_> {
    type Item = Batch;

    fn len(&self) -> usize {
        self.xs.len()
    }

    fn get(&self, index: usize) -> Self::Item {
        Batch {
            xs: vec![self.xs[index].clone()],
            ys: vec![self.ys[index].clone()],
        }
    }
}

pub struct Dataloader<D>
where
    D: Dataset,
{
    dataset: D,
    batch_size: usize,
    strict_batch_size: bool,
}

impl<D: Dataset> Dataloader<D> {
    pub fn new(dataset: D, batch_size: usize, strict_batch_size: bool) -> Self {
        Self {
            dataset,
            batch_size,
            strict_batch_size,
        }
    }

    /// Batches in dataset order.
    pub fn iter_batch(&self) -> BatchIterator<'_, D> {
        let indices: Vec<usize> = (0..self.dataset.len()).collect();
        self.batches(indices)
    }

    /// Batches in an order drawn from `rng`.
    pub fn iter_shuffled(&self, rng: &mut XorShift64) -> BatchIterator<'_, D> {
        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();
        rng.shuffle(&mut indices);
        self.batches(indices)
    }

    fn batches(&self, mut indices: Vec<usize>) -> BatchIterator<'_, D> {
        // popped from the back
        indices.reverse();
        BatchIterator {
            dataloader: self,
            strict_batch_size: self.strict_batch_size,
            batch_size: self.batch_size,
            indices,
        }
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_batches(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        if self.strict_batch_size {
            self.len() / self.batch_size
        } else {
            self.len().div_ceil(self.batch_size)
        }
    }
}

pub struct BatchIterator<'a, D: Dataset> {
    dataloader: &'a Dataloader<D>,
    strict_batch_size: bool,
    batch_size: usize,
    indices: Vec<usize>,
}

impl<D: Dataset> Iterator for BatchIterator<'_, D> {
    type Item = <D::Item as Stackable>::Output;

    fn next(&mut self) -> Option<Self::Item> {
        if self.batch_size == 0 {
            return None;
        }
        let mut v = Vec::with_capacity(self.batch_size);
        for i in 0..self.batch_size {
            if let Some(index) = self.indices.pop() {
                v.push(self.dataloader.dataset.get(index));
            } else {
                if i == 0 || self.strict_batch_size {
                    return None;
                }
                break;
            }
        }

        Some(D::Item::stack(v))
    }
}

// Re-export the derive macro from stackable_derive
pub use stackable_derive::Stackable;
