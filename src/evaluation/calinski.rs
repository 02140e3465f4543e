use super::*;
use crate::matrix::squared;
use crate::matrix::Matrix;
use crate::Energy;

/// Calinski–Harabasz index; higher is better.
///
/// `[B / (k − 1)] / [W / (N − k)]` with B the size-weighted squared spread of
/// cluster means around the global mean and W the squared spread of samples
/// around their cluster mean. A partition with W = 0 scores 1.
pub fn calinski_harabasz(x: &Matrix, labels: &[Label]) -> Option<Energy> {
    let dense = Dense::from(labels);
    if !dense.is_scorable() {
        return None;
    }
    let n = dense.n() as Energy;
    let k = dense.k() as Energy;
    let centroids = centroids(x, &dense);
    let mean = (0..x.cols())
        .map(|j| x.column(j).sum::<Energy>() / n)
        .collect::<Vec<Energy>>();
    let between = centroids
        .iter()
        .zip(dense.sizes.iter())
        .map(|(c, &size)| size as Energy * squared(c, &mean))
        .sum::<Energy>();
    let within = dense
        .ids
        .iter()
        .enumerate()
        .map(|(i, &id)| squared(x.row(i), &centroids[id]))
        .sum::<Energy>();
    Some(match within {
        w if w == 0. => 1.,
        w => between * (n - k) / (w * (k - 1.)),
    })
}
