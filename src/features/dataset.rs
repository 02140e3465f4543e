use crate::error::Layer;
use crate::matrix::Matrix;
use crate::Error;
use crate::Feature;
use crate::Result;
use crate::CENTROID_DIMS;
use serde::Deserialize;
use serde::Serialize;

/// Feature vectors of one shape sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Source identifier, used for logging and output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Global shape descriptor.
    pub layer1: Vec<Feature>,
    /// Spatial descriptor; the last two entries are the normalized centroid.
    pub layer2: Vec<Feature>,
}

/// Ordered collection of samples handed to the clustering core.
///
/// Sample order is significant: it is the index space of every label
/// assignment the pipeline produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
    pub fn names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.samples.iter().map(|s| s.name.as_deref())
    }

    /// Checks shape consistency only; sample contents are trusted.
    pub fn validate(&self, d1: usize, d2: usize) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if d1 == 0 {
            return Err(Error::parameter("layer1 width", "needs at least one column"));
        }
        if d2 <= CENTROID_DIMS {
            return Err(Error::parameter(
                "layer2 width",
                format!("needs more than {} columns, got {}", CENTROID_DIMS, d2),
            ));
        }
        for (i, s) in self.samples.iter().enumerate() {
            for (layer, values, expected) in [(Layer::One, &s.layer1, d1), (Layer::Two, &s.layer2, d2)] {
                if values.len() != expected {
                    return Err(Error::Dimension {
                        layer,
                        sample: i,
                        expected,
                        got: values.len(),
                    });
                }
                if let Some(column) = values.iter().position(|v| !v.is_finite()) {
                    return Err(Error::NonFinite {
                        layer,
                        sample: i,
                        column,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn layer1(&self) -> Matrix {
        Matrix::from_rows(&self.samples.iter().map(|s| s.layer1.clone()).collect::<Vec<_>>())
    }
    pub fn layer2(&self) -> Matrix {
        Matrix::from_rows(&self.samples.iter().map(|s| s.layer2.clone()).collect::<Vec<_>>())
    }

    /// Pairs up separately produced layer matrices, row by row.
    pub fn from_layers(layer1: Vec<Vec<Feature>>, layer2: Vec<Vec<Feature>>) -> Result<Self> {
        if layer1.len() != layer2.len() {
            return Err(Error::SampleCount {
                layer1: layer1.len(),
                layer2: layer2.len(),
            });
        }
        Ok(layer1
            .into_iter()
            .zip(layer2)
            .map(|(layer1, layer2)| Sample {
                name: None,
                layer1,
                layer2,
            })
            .collect())
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Sample>> for Dataset {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(d1: usize, d2: usize) -> Sample {
        Sample {
            name: None,
            layer1: vec![1.; d1],
            layer2: vec![0.5; d2],
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(Dataset::default().validate(8, 18), Err(Error::EmptyDataset));
    }

    #[test]
    fn wrong_width_names_the_sample() {
        let data = Dataset::from(vec![sample(8, 18), sample(8, 17)]);
        assert_eq!(
            data.validate(8, 18),
            Err(Error::Dimension {
                layer: Layer::Two,
                sample: 1,
                expected: 18,
                got: 17,
            })
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut bad = sample(8, 18);
        bad.layer1[3] = Feature::NAN;
        let data = Dataset::from(vec![sample(8, 18), bad]);
        assert!(matches!(
            data.validate(8, 18),
            Err(Error::NonFinite { sample: 1, column: 3, .. })
        ));
    }

    #[test]
    fn mismatched_layer_lengths() {
        assert_eq!(
            Dataset::from_layers(vec![vec![1.]; 3], vec![vec![1.]; 2]),
            Err(Error::SampleCount { layer1: 3, layer2: 2 })
        );
    }

    #[test]
    fn json_roundtrip_keeps_order() {
        let data = Dataset::from(vec![sample(2, 3), sample(2, 3)]);
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(serde_json::from_str::<Dataset>(&json).unwrap(), data);
    }
}
