use crate::matrix::Matrix;
use crate::Feature;

/// Per-column z-score transform fit on one feature matrix.
///
/// Uses the population standard deviation. A column whose spread is zero up
/// to round-off is degenerate: it carries no information, so it is emitted
/// as exact zeros instead of being divided by (near) zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    mean: Vec<Feature>,
    std: Vec<Feature>,
    degenerate: Vec<usize>,
}

impl Scaler {
    /// Fit column statistics with a two-pass mean/variance.
    ///
    /// A column is constant when its variance is within the round-off that
    /// summing `n` copies of its mean can produce: `var <= n·ε·var + (n·mean·ε)²`.
    pub fn fit(x: &Matrix) -> Self {
        let n = x.rows().max(1) as Feature;
        let mean = (0..x.cols())
            .map(|j| x.column(j).sum::<Feature>() / n)
            .collect::<Vec<_>>();
        let var = (0..x.cols())
            .map(|j| x.column(j).map(|v| (v - mean[j]).powi(2)).sum::<Feature>() / n)
            .collect::<Vec<_>>();
        let degenerate = (0..x.cols())
            .filter(|&j| var[j] <= n * Feature::EPSILON * var[j] + (n * mean[j] * Feature::EPSILON).powi(2))
            .collect::<Vec<_>>();
        let std = var.into_iter().map(Feature::sqrt).collect::<Vec<_>>();
        degenerate
            .iter()
            .for_each(|j| log::warn!("{:<32}{:<32}", "zero-variance feature column", j));
        Self {
            mean,
            std,
            degenerate,
        }
    }

    pub fn mean(&self) -> &[Feature] {
        &self.mean
    }
    pub fn std(&self) -> &[Feature] {
        &self.std
    }
    /// Columns emitted as constant zeros.
    pub fn degenerate(&self) -> &[usize] {
        &self.degenerate
    }

    pub fn transform(&self, x: &Matrix) -> Matrix {
        debug_assert_eq!(x.cols(), self.mean.len());
        let mut out = x.clone();
        for i in 0..out.rows() {
            out.row_mut(i)
                .iter_mut()
                .enumerate()
                .for_each(|(j, v)| *v = self.scale(j, *v));
        }
        out
    }

    fn scale(&self, j: usize, v: Feature) -> Feature {
        if self.degenerate.contains(&j) {
            0.
        } else {
            (v - self.mean[j]) / self.std[j]
        }
    }
}

/// Fit on `x` and transform it in one step.
pub fn standardize(x: &Matrix) -> (Matrix, Scaler) {
    let scaler = Scaler::fit(x);
    (scaler.transform(x), scaler)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moments(x: &Matrix, j: usize) -> (Feature, Feature) {
        let n = x.rows() as Feature;
        let mean = x.column(j).sum::<Feature>() / n;
        let var = x.column(j).map(|v| (v - mean).powi(2)).sum::<Feature>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn columns_become_zero_mean_unit_std() {
        let x = Matrix::from_rows(
            &(0..50)
                .map(|i| {
                    let t = i as Feature;
                    vec![t, 1e6 + 3. * t * t, (t * 0.37).sin() * 1e-3]
                })
                .collect::<Vec<_>>(),
        );
        let (z, scaler) = standardize(&x);
        assert!(scaler.degenerate().is_empty());
        for j in 0..z.cols() {
            let (mean, std) = moments(&z, j);
            assert!(mean.abs() < 1e-9, "column {} mean {}", j, mean);
            assert!((std - 1.).abs() < 1e-9, "column {} std {}", j, std);
        }
    }

    #[test]
    fn constant_columns_are_exact_zeros() {
        let x = Matrix::from_rows(&[vec![0.1, 1.], vec![0.1, 2.], vec![0.1, 4.]]);
        let (z, scaler) = standardize(&x);
        assert_eq!(scaler.degenerate(), &[0]);
        assert!(z.column(0).all(|v| v == 0.));
        assert!(z.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tiny_spread_is_not_degenerate() {
        let x = Matrix::from_rows(
            &(0..20)
                .map(|i| vec![i as Feature * 1e-16, 5e-15])
                .collect::<Vec<_>>(),
        );
        let (z, scaler) = standardize(&x);
        assert_eq!(scaler.degenerate(), &[1]);
        let (mean, std) = moments(&z, 0);
        assert!(mean.abs() < 1e-9, "mean {}", mean);
        assert!((std - 1.).abs() < 1e-9, "std {}", std);
        assert!(z.column(1).all(|v| v == 0.));
    }

    #[test]
    fn single_row_is_fully_degenerate() {
        let (z, scaler) = standardize(&Matrix::from_rows(&[vec![3., -7.]]));
        assert_eq!(scaler.degenerate(), &[0, 1]);
        assert_eq!(z.row(0), &[0., 0.]);
    }
}
