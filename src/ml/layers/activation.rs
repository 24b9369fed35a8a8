use crate::ml::funcs::Activation;

pub(super) fn forward(function: &Activation, xs: &[Vec<f64>]) -> Vec<Vec<f64>> {
    xs.iter()
        .map(|x| x.iter().map(|&a| function.call(a)).collect())
        .collect()
}

/// Chain rule through an element-wise function, evaluated at the inputs the
/// forward pass saw.
pub(super) fn backward(
    function: &Activation,
    xs: &[Vec<f64>],
    gradients: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    xs.iter()
        .zip(gradients)
        .map(|(x, g)| x.iter().zip(g).map(|(&a, g_i)| function.prime(a) * g_i).collect())
        .collect()
}
