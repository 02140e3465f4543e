use super::*;
use crate::Feature;
use crate::CENTROID_DIMS;

/// Location and spread of one feature column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: Feature,
    pub std: Feature,
    pub min: Feature,
    pub max: Feature,
}

impl Spread {
    fn of(values: impl Iterator<Item = Feature> + Clone) -> Option<Self> {
        let n = values.clone().count();
        if n == 0 {
            return None;
        }
        let mean = values.clone().sum::<Feature>() / n as Feature;
        let var = values.clone().map(|v| (v - mean).powi(2)).sum::<Feature>() / n as Feature;
        let (min, max) = values.fold((Feature::INFINITY, Feature::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Some(Self {
            mean,
            std: var.sqrt(),
            min,
            max,
        })
    }
}

impl std::fmt::Display for Spread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean {:.4} std {:.4} range [{:.4}, {:.4}]",
            self.mean, self.std, self.min, self.max
        )
    }
}

/// Descriptive statistics of a dataset, logged before clustering.
///
/// Area is the last Layer-1 column; density spans every Layer-2 column
/// before the trailing centroid pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub area: Spread,
    pub density: Spread,
    pub centroid_x: Spread,
    pub centroid_y: Spread,
}

impl Summary {
    pub fn log(&self) {
        log::info!("{:<32}{}", "area", self.area);
        log::info!("{:<32}{}", "density", self.density);
        log::info!("{:<32}{}", "centroid x", self.centroid_x);
        log::info!("{:<32}{}", "centroid y", self.centroid_y);
    }
}

impl TryFrom<&Dataset> for Summary {
    type Error = crate::Error;
    fn try_from(data: &Dataset) -> crate::Result<Self> {
        let samples = data.samples();
        let first = samples.first().ok_or(crate::Error::EmptyDataset)?;
        let d1 = first.layer1.len();
        let d2 = first.layer2.len();
        data.validate(d1, d2)?;
        let cells = d2 - CENTROID_DIMS;
        let area = Spread::of(samples.iter().filter_map(|s| s.layer1.last().copied()));
        let density = Spread::of(samples.iter().flat_map(|s| s.layer2[..cells].iter().copied()));
        let centroid_x = Spread::of(samples.iter().map(|s| s.layer2[cells]));
        let centroid_y = Spread::of(samples.iter().map(|s| s.layer2[cells + 1]));
        match (area, density, centroid_x, centroid_y) {
            (Some(area), Some(density), Some(centroid_x), Some(centroid_y)) => Ok(Self {
                area,
                density,
                centroid_x,
                centroid_y,
            }),
            _ => Err(crate::Error::parameter("layer1 width", "needs an area column")),
        }
    }
}
