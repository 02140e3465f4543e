use super::*;
use crate::clustering::Absorb;
use crate::clustering::Centroid;
use crate::matrix::euclidean;
use crate::matrix::Matrix;
use crate::Energy;
use crate::Feature;

/// Davies–Bouldin index; lower is better.
///
/// For each cluster, the worst ratio (S_i + S_j) / M_ij over the other
/// clusters, averaged over clusters. S is the mean distance of members to
/// their centroid and M the distance between centroids. Coincident centroids
/// contribute nothing to their pair.
pub fn davies_bouldin(x: &Matrix, labels: &[Label]) -> Option<Energy> {
    let dense = Dense::from(labels);
    if !dense.is_scorable() {
        return None;
    }
    let centroids = centroids(x, &dense);
    let scatter = dense
        .ids
        .iter()
        .enumerate()
        .fold(vec![0.; dense.k()], |mut s, (i, &id)| {
            s[id] += euclidean(x.row(i), &centroids[id]);
            s
        })
        .into_iter()
        .zip(dense.sizes.iter())
        .map(|(s, &n)| s / n as Energy)
        .collect::<Vec<Energy>>();
    let worst = (0..dense.k())
        .map(|i| {
            (0..dense.k())
                .filter(|&j| j != i)
                .map(|j| match euclidean(&centroids[i], &centroids[j]) {
                    m if m > 0. => (scatter[i] + scatter[j]) / m,
                    _ => 0.,
                })
                .fold(0., Energy::max)
        })
        .collect::<Vec<Energy>>();
    Some(worst.iter().sum::<Energy>() / dense.k() as Energy)
}

/// Mean of each dense cluster.
pub(crate) fn centroids(x: &Matrix, dense: &Dense) -> Vec<Vec<Feature>> {
    dense
        .ids
        .iter()
        .enumerate()
        .fold(vec![Centroid::empty(x.cols()); dense.k()], |mut acc, (i, &id)| {
            let empty = acc[id].identity();
            let sum = std::mem::replace(&mut acc[id], empty);
            acc[id] = sum.absorb(&Centroid::from(x.row(i)));
            acc
        })
        .iter()
        .map(|c| c.mean().unwrap_or_else(|| vec![0.; x.cols()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_computed_pair() {
        // centroids 1 and 11, scatters 1 and 1: ratio (1 + 1) / 10 for both clusters
        let x = Matrix::from_rows(&[vec![0.], vec![2.], vec![10.], vec![12.]]);
        let db = davies_bouldin(&x, &[0, 0, 1, 1]).unwrap();
        assert!((db - 0.2).abs() < 1e-12);
    }

    #[test]
    fn worst_neighbor_dominates() {
        // clusters at 0, 4 and 100, each with scatter 1
        let x = Matrix::from_rows(&[
            vec![-1.],
            vec![1.],
            vec![3.],
            vec![5.],
            vec![99.],
            vec![101.],
        ]);
        let db = davies_bouldin(&x, &[0, 0, 1, 1, 2, 2]).unwrap();
        let expected = (0.5 + 0.5 + 2. / 96.) / 3.;
        assert!((db - expected).abs() < 1e-12);
    }

    #[test]
    fn undefined_for_single_cluster() {
        let x = Matrix::from_rows(&[vec![0.], vec![1.]]);
        assert_eq!(davies_bouldin(&x, &[4, 4]), None);
    }
}
