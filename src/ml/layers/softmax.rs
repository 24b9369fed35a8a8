use crate::ml::funcs::softmax;

pub(super) fn forward(xs: &[Vec<f64>]) -> Vec<Vec<f64>> {
    xs.iter().map(|x| softmax(x)).collect()
}

/// `g_in[i] = sum_o g[o] * y[o] * (delta(i, o) - y[i])`, which reduces to
/// `y[i] * (g[i] - <g, y>)`.
pub(super) fn backward(outputs: &[Vec<f64>], gradients: &[Vec<f64>]) -> Vec<Vec<f64>> {
    outputs
        .iter()
        .zip(gradients)
        .map(|(y, g)| {
            let dot: f64 = y.iter().zip(g).map(|(y_o, g_o)| y_o * g_o).sum();
            y.iter().zip(g).map(|(y_i, g_i)| y_i * (g_i - dot)).collect()
        })
        .collect()
}
