use super::*;
use crate::Result;
use crate::DENSITY_GRID;

/// Reference feature provider over in-memory rasters.
///
/// Samples are processed in name order so the index space is stable across
/// runs. A raster that cannot be described (e.g. smaller than the density
/// grid) is logged and dropped; the remaining samples still form a dataset.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    rasters: Vec<(String, Raster)>,
}

impl Extractor {
    pub fn push(&mut self, name: impl Into<String>, raster: Raster) {
        self.rasters.push((name.into(), raster));
    }

    /// Layer-1 = Hu moments then area. Layer-2 = grid densities then centroid.
    pub fn describe(name: &str, raster: &Raster) -> Result<Sample> {
        let moments = Moments::from(raster);
        let (cx, cy) = centroid(raster);
        let layer1 = moments
            .hu()
            .into_iter()
            .chain(std::iter::once(moments.area()))
            .collect();
        let layer2 = density(raster, DENSITY_GRID)?
            .into_iter()
            .chain([cx, cy])
            .collect();
        Ok(Sample {
            name: Some(name.to_string()),
            layer1,
            layer2,
        })
    }
}

impl FromIterator<(String, Raster)> for Extractor {
    fn from_iter<I: IntoIterator<Item = (String, Raster)>>(iter: I) -> Self {
        Self {
            rasters: iter.into_iter().collect(),
        }
    }
}

impl Provider for Extractor {
    fn provide(&self) -> Result<Dataset> {
        let mut order = self.rasters.iter().collect::<Vec<_>>();
        order.sort_by(|(a, _), (b, _)| a.cmp(b));
        let dataset = order
            .into_iter()
            .filter_map(|(name, raster)| match Self::describe(name, raster) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    log::warn!("skipping sample {}: {}", name, e);
                    None
                }
            })
            .collect::<Dataset>();
        log::info!("{:<32}{:<32}", "extracted samples", dataset.len());
        Ok(dataset)
    }
}
