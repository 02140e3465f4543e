use super::*;
use crate::matrix::euclidean;
use crate::matrix::Matrix;
use crate::Energy;
use rayon::prelude::*;

/// Mean silhouette coefficient over all samples.
///
/// For sample i, a = mean distance to the rest of its own cluster and
/// b = lowest mean distance to any other cluster; s(i) = (b − a) / max(a, b).
/// Samples alone in their cluster score 0. The result lies in [−1, 1].
///
/// Undefined (`None`) unless there are between 2 and N − 1 clusters.
pub fn silhouette(x: &Matrix, labels: &[Label]) -> Option<Energy> {
    debug_assert_eq!(x.rows(), labels.len());
    let dense = Dense::from(labels);
    if !dense.is_scorable() {
        return None;
    }
    let scores = (0..dense.n())
        .into_par_iter()
        .map(|i| coefficient(x, &dense, i))
        .collect::<Vec<Energy>>();
    Some(scores.iter().sum::<Energy>() / scores.len() as Energy)
}

/// Silhouette of a single sample.
fn coefficient(x: &Matrix, dense: &Dense, i: usize) -> Energy {
    let own = dense.ids[i];
    if dense.sizes[own] < 2 {
        return 0.;
    }
    let sums = dense
        .ids
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .fold(vec![0.; dense.k()], |mut sums, (j, &id)| {
            sums[id] += euclidean(x.row(i), x.row(j));
            sums
        });
    let a = sums[own] / (dense.sizes[own] - 1) as Energy;
    let b = sums
        .iter()
        .zip(dense.sizes.iter())
        .enumerate()
        .filter(|(c, _)| *c != own)
        .map(|(_, (sum, &size))| sum / size as Energy)
        .fold(Energy::INFINITY, Energy::min);
    match a.max(b) {
        m if m > 0. => (b - a) / m,
        _ => 0.,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_computed_line() {
        // clusters {0, 1} and {4}: s0 = (4 - 1) / 4, s1 = (3 - 1) / 3, singleton = 0
        let x = Matrix::from_rows(&[vec![0.], vec![1.], vec![4.]]);
        let s = silhouette(&x, &[0, 0, 1]).unwrap();
        let expected = (0.75 + 2. / 3. + 0.) / 3.;
        assert!((s - expected).abs() < 1e-12);
    }

    #[test]
    fn well_separated_pairs_score_high() {
        let x = Matrix::from_rows(&[vec![0., 0.], vec![0., 1.], vec![50., 0.], vec![50., 1.]]);
        let s = silhouette(&x, &[7, 7, 3, 3]).unwrap();
        assert!(s > 0.95 && s <= 1.);
    }

    #[test]
    fn bad_assignment_scores_negative() {
        let x = Matrix::from_rows(&[vec![0.], vec![10.], vec![0.1], vec![10.1]]);
        assert!(silhouette(&x, &[0, 0, 1, 1]).unwrap() < 0.);
    }

    #[test]
    fn undefined_for_one_or_n_clusters() {
        let x = Matrix::from_rows(&[vec![0.], vec![1.], vec![2.]]);
        assert_eq!(silhouette(&x, &[0, 0, 0]), None);
        assert_eq!(silhouette(&x, &[0, 1, 2]), None);
    }

    #[test]
    fn coincident_points_score_zero() {
        let x = Matrix::from_rows(&[vec![1.], vec![1.], vec![1.], vec![1.]]);
        assert_eq!(silhouette(&x, &[0, 0, 1, 1]), Some(0.));
    }
}
