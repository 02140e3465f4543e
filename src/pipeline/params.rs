use crate::Energy;
use crate::Error;
use crate::Feature;
use crate::Result;
use crate::HU_MOMENTS;
use crate::KMEANS_MAX_ITERATIONS;
use crate::KMEANS_SEED;
use crate::MIN_CLUSTER_SIZE;
use crate::SPLIT_BASELINE;
use crate::STAGE1_K;
use crate::STAGE1_RESTARTS;
use crate::STAGE2_RESTARTS;
use crate::WEIGHT_CENTROID;
use serde::Deserialize;
use serde::Serialize;

/// Tunable knobs of one clustering run.
///
/// Defaults come from the crate constants. Missing fields in a serialized
/// form fall back to those defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub stage1_k: usize,
    pub weight_centroid: Feature,
    pub min_cluster_size: usize,
    pub split_baseline: Energy,
    pub seed: u64,
    pub stage1_restarts: usize,
    pub stage2_restarts: usize,
    pub max_iterations: usize,
    /// Cluster stage 1 on the Hu moments alone, ignoring the area column.
    pub moments_only: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            stage1_k: STAGE1_K,
            weight_centroid: WEIGHT_CENTROID,
            min_cluster_size: MIN_CLUSTER_SIZE,
            split_baseline: SPLIT_BASELINE,
            seed: KMEANS_SEED,
            stage1_restarts: STAGE1_RESTARTS,
            stage2_restarts: STAGE2_RESTARTS,
            max_iterations: KMEANS_MAX_ITERATIONS,
            moments_only: false,
        }
    }
}

impl Params {
    /// Checks that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.stage1_k == 0 {
            return Err(Error::parameter("stage1_k", "must be positive"));
        }
        if !self.weight_centroid.is_finite() || self.weight_centroid < 0. {
            return Err(Error::parameter(
                "weight_centroid",
                format!("must be finite and non-negative, got {}", self.weight_centroid),
            ));
        }
        if self.min_cluster_size == 0 {
            return Err(Error::parameter("min_cluster_size", "must be positive"));
        }
        if !self.split_baseline.is_finite() {
            return Err(Error::parameter("split_baseline", "must be finite"));
        }
        for (name, value) in [
            ("stage1_restarts", self.stage1_restarts),
            ("stage2_restarts", self.stage2_restarts),
            ("max_iterations", self.max_iterations),
        ] {
            if value == 0 {
                return Err(Error::parameter(name, "must be positive"));
            }
        }
        Ok(())
    }

    /// Checks against a dataset of `n` samples with `d1` Layer-1 columns.
    pub fn validate_for(&self, n: usize, d1: usize) -> Result<()> {
        self.validate()?;
        if self.stage1_k > n {
            return Err(Error::TooManyClusters { k: self.stage1_k, n });
        }
        if self.moments_only && d1 < HU_MOMENTS {
            return Err(Error::parameter(
                "moments_only",
                format!("needs {} leading moment columns, layer-1 has {}", HU_MOMENTS, d1),
            ));
        }
        Ok(())
    }

    pub fn log(&self) {
        log::info!("{:<32}{:<32}", "stage1_k", self.stage1_k);
        log::info!("{:<32}{:<32}", "weight_centroid", self.weight_centroid);
        log::info!("{:<32}{:<32}", "min_cluster_size", self.min_cluster_size);
        log::info!("{:<32}{:<32}", "split_baseline", self.split_baseline);
        log::info!("{:<32}{:<32}", "seed", self.seed);
        log::debug!("{:<32}{:<32}", "stage1_restarts", self.stage1_restarts);
        log::debug!("{:<32}{:<32}", "stage2_restarts", self.stage2_restarts);
        log::debug!("{:<32}{:<32}", "max_iterations", self.max_iterations);
        log::debug!("{:<32}{:<32}", "moments_only", self.moments_only);
    }
}
