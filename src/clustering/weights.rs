use crate::Error;
use crate::Feature;
use crate::Result;
use crate::CENTROID_DIMS;

/// Column weights applied to standardized Layer-2 before refinement.
///
/// Density columns start at 1, the trailing centroid columns at
/// `weight_centroid`; the vector is then divided by its sum. Only the
/// density : centroid ratio affects clustering, since a uniform rescale of
/// every column leaves all distance ratios unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights(Vec<Feature>);

impl Weights {
    pub fn new(width: usize, weight_centroid: Feature) -> Result<Self> {
        if !weight_centroid.is_finite() || weight_centroid < 0. {
            return Err(Error::parameter(
                "weight_centroid",
                format!("must be finite and non-negative, got {}", weight_centroid),
            ));
        }
        if width <= CENTROID_DIMS {
            return Err(Error::parameter(
                "layer2 width",
                format!("needs more than {} columns, got {}", CENTROID_DIMS, width),
            ));
        }
        let raw = (0..width)
            .map(|j| match j >= width - CENTROID_DIMS {
                true => weight_centroid,
                false => 1.,
            })
            .collect::<Vec<Feature>>();
        let total = raw.iter().sum::<Feature>();
        Ok(Self(raw.into_iter().map(|w| w / total).collect()))
    }

    /// Uniformly rescaled copy. Clustering over `scale(c)` matches the unscaled weights.
    pub fn scale(&self, factor: Feature) -> Self {
        Self(self.0.iter().map(|w| w * factor).collect())
    }

    pub fn as_slice(&self) -> &[Feature] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LAYER2_DIM;

    #[test]
    fn sums_to_one() {
        for wc in [0., 0.25, 0.5, 1., 3., 100.] {
            let w = Weights::new(LAYER2_DIM, wc).unwrap();
            let total = w.as_slice().iter().sum::<Feature>();
            assert!((total - 1.).abs() < 1e-12, "wc {} sums to {}", wc, total);
        }
    }

    #[test]
    fn centroid_columns_keep_ratio() {
        let w = Weights::new(LAYER2_DIM, 0.5).unwrap();
        let w = w.as_slice();
        assert!(w[..16].iter().all(|&x| x == w[0]));
        assert!((w[16] / w[0] - 0.5).abs() < 1e-12);
        assert_eq!(w[16], w[17]);
        assert!((w[0] - 1. / 17.).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_silences_centroid() {
        let w = Weights::new(LAYER2_DIM, 0.).unwrap();
        assert_eq!(&w.as_slice()[16..], &[0., 0.]);
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(Weights::new(LAYER2_DIM, -0.1).is_err());
        assert!(Weights::new(LAYER2_DIM, Feature::NAN).is_err());
        assert!(Weights::new(2, 1.).is_err());
    }
}
