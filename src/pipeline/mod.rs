//! One end-to-end clustering run: validate, standardize, partition, refine, evaluate.
mod params;
pub use params::*;

use crate::clustering::*;
use crate::evaluation::QualityReport;
use crate::features::Dataset;
use crate::features::Provider;
use crate::features::Summary;
use crate::Error;
use crate::Label;
use crate::Result;
use crate::HU_MOMENTS;
use serde::Serialize;

/// Runs the two-stage clustering with a fixed set of [`Params`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pipeline {
    params: Params,
}

/// Everything a run produces, indexed by sample position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub params: Params,
    pub names: Vec<Option<String>>,
    /// Coarse labels in `[0, stage1_k)`.
    pub stage1: Vec<Label>,
    /// Final dense labels.
    pub stage2: Vec<Label>,
    pub decisions: Vec<Decision>,
    pub report: QualityReport,
    #[serde(skip)]
    pub layer1: Scaler,
    #[serde(skip)]
    pub layer2: Scaler,
}

impl Outcome {
    /// Number of final clusters.
    pub fn clusters(&self) -> usize {
        self.report.clusters
    }

    pub fn log(&self) {
        Groups::from(self.stage2.as_slice())
            .iter()
            .for_each(|(id, members)| log::info!("{:<32}{:<32}", format!("cluster {}", id), members.len()));
        self.report.log();
    }
}

impl Pipeline {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Pull features from `provider` and cluster them.
    pub fn run(&self, provider: &impl Provider) -> Result<Outcome> {
        self.cluster(&provider.provide()?)
    }

    pub fn cluster(&self, data: &Dataset) -> Result<Outcome> {
        let first = data.samples().first().ok_or(Error::EmptyDataset)?;
        let d1 = first.layer1.len();
        let d2 = first.layer2.len();
        data.validate(d1, d2)?;
        self.params.validate_for(data.len(), d1)?;
        self.params.log();
        log::info!("{:<32}{:<32}", "samples", format!("{} ({} + {} features)", data.len(), d1, d2));
        Summary::try_from(data)?.log();

        let (layer1, scaler1) = standardize(&data.layer1());
        let (layer2, scaler2) = standardize(&data.layer2());
        let layer1 = match self.params.moments_only {
            true => layer1.leading(HU_MOMENTS),
            false => layer1,
        };

        let stage1 = Partitioner::new(self.kmeans(self.params.stage1_k, self.params.stage1_restarts))
            .partition(&layer1)?;
        let weights = Weights::new(d2, self.params.weight_centroid)?;
        let refinement = Refiner::new(self.params.min_cluster_size, self.kmeans(2, self.params.stage2_restarts))
            .policy(SplitPolicy {
                baseline: self.params.split_baseline,
            })
            .refine(&stage1, &layer2, &weights)?;

        let (combined, _) = standardize(&layer1.hstack(&layer2));
        let report = QualityReport::evaluate(&combined, &refinement.labels);
        Ok(Outcome {
            params: self.params,
            names: data.names().map(|n| n.map(str::to_string)).collect(),
            stage1,
            stage2: refinement.labels,
            decisions: refinement.decisions,
            report,
            layer1: scaler1,
            layer2: scaler2,
        })
    }

    fn kmeans(&self, k: usize, restarts: usize) -> KMeans {
        KMeans::new(k)
            .restarts(restarts)
            .iterations(self.params.max_iterations)
            .seed(self.params.seed)
    }
}
