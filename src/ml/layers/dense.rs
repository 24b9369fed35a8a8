use crate::utills::rand::XorShift64;

/// Parameters of a fully connected layer.
///
/// Weights are stored one row per output, so `weights[o][i]` connects input
/// `i` to output `o`. They stay empty until the layer is attached behind
/// another one and learns its input width.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    seed: u64,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl Dense {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            seed,
            weights: Vec::new(),
            biases: Vec::new(),
        }
    }

    /// Seed the initial weights were drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn num_parameters(&self) -> usize {
        self.weights.iter().map(Vec::len).sum::<usize>() + self.biases.len()
    }

    fn input_width(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    /// Xavier-uniform weights in `±sqrt(6 / (inputs + outputs))`, zero biases.
    pub(crate) fn initialize(&mut self, input_width: usize, output_width: usize) {
        let limit = (6.0 / (input_width + output_width).max(1) as f64).sqrt();
        let mut rng = XorShift64::new(self.seed);
        self.weights = (0..output_width)
            .map(|_| {
                (0..input_width)
                    .map(|_| rng.uniform(-limit, limit))
                    .collect()
            })
            .collect();
        self.biases = vec![0.0; output_width];
    }

    pub(crate) fn forward(&self, xs: &[Vec<f64>]) -> Vec<Vec<f64>> {
        xs.iter()
            .map(|x| {
                self.weights
                    .iter()
                    .zip(&self.biases)
                    .map(|(row, bias)| bias + row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>())
                    .collect()
            })
            .collect()
    }

    /// Returns the gradient with respect to `xs`, then takes one step of
    /// gradient descent averaged over the batch.
    pub(crate) fn backward(
        &mut self,
        xs: &[Vec<f64>],
        gradients: &[Vec<f64>],
        learning_rate: f64,
    ) -> Vec<Vec<f64>> {
        let input_width = self.input_width();
        let output_width = self.biases.len();

        // computed from the weights as they were during the forward pass
        let input_gradients = gradients
            .iter()
            .map(|g| {
                (0..input_width)
                    .map(|i| {
                        self.weights
                            .iter()
                            .zip(g)
                            .map(|(row, g_o)| row[i] * g_o)
                            .sum()
                    })
                    .collect()
            })
            .collect();

        let mut weight_steps = vec![vec![0.0; input_width]; output_width];
        let mut bias_steps = vec![0.0; output_width];
        for (x, g) in xs.iter().zip(gradients) {
            for (o, g_o) in g.iter().enumerate() {
                bias_steps[o] += g_o;
                for (i, v) in x.iter().enumerate() {
                    weight_steps[o][i] += g_o * v;
                }
            }
        }

        let scale = learning_rate / xs.len().max(1) as f64;
        for (row, steps) in self.weights.iter_mut().zip(&weight_steps) {
            for (w, step) in row.iter_mut().zip(steps) {
                *w -= scale * step;
            }
        }
        for (b, step) in self.biases.iter_mut().zip(&bias_steps) {
            *b -= scale * step;
        }

        input_gradients
    }
}
