//! Command-line front end: read a feature file, run the pipeline, report.
use crate::features::Dataset;
use crate::pipeline::Params;
use crate::pipeline::Pipeline;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Two-stage adaptive clustering of shape features", long_about = None)]
pub struct Args {
    /// JSON feature file: `{"samples": [{"name", "layer1", "layer2"}, ...]}`
    #[arg(long, short)]
    pub features: PathBuf,
    /// Write labels, decisions and quality report here as JSON
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// JSON parameter file; flags below override its fields
    #[arg(long)]
    pub params: Option<PathBuf>,
    #[arg(long)]
    pub stage1_k: Option<usize>,
    #[arg(long)]
    pub weight_centroid: Option<f64>,
    #[arg(long)]
    pub min_cluster_size: Option<usize>,
    #[arg(long, allow_negative_numbers = true)]
    pub split_baseline: Option<f64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub stage1_restarts: Option<usize>,
    #[arg(long)]
    pub stage2_restarts: Option<usize>,
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Cluster stage 1 on Hu moments only, without the area column
    #[arg(long)]
    pub moments_only: bool,
}

impl Args {
    /// Parameter file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> anyhow::Result<Params> {
        let base = match self.params {
            Some(ref path) => serde_json::from_str::<Params>(
                &std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?,
            )
            .with_context(|| format!("parse {}", path.display()))?,
            None => Params::default(),
        };
        Ok(Params {
            stage1_k: self.stage1_k.unwrap_or(base.stage1_k),
            weight_centroid: self.weight_centroid.unwrap_or(base.weight_centroid),
            min_cluster_size: self.min_cluster_size.unwrap_or(base.min_cluster_size),
            split_baseline: self.split_baseline.unwrap_or(base.split_baseline),
            seed: self.seed.unwrap_or(base.seed),
            stage1_restarts: self.stage1_restarts.unwrap_or(base.stage1_restarts),
            stage2_restarts: self.stage2_restarts.unwrap_or(base.stage2_restarts),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            moments_only: self.moments_only || base.moments_only,
        })
    }
}

/// Parse the process arguments and run once.
pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let params = args.resolve()?;
    let path = &args.features;
    let dataset = serde_json::from_str::<Dataset>(
        &std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?,
    )
    .with_context(|| format!("parse {}", path.display()))?;
    log::info!("{:<32}{:<32}", "loaded features", path.display());
    let outcome = Pipeline::new(params).run(&dataset).context("clustering failed")?;
    outcome.log();
    if let Some(ref out) = args.output {
        std::fs::write(out, serde_json::to_string_pretty(&outcome)?)
            .with_context(|| format!("write {}", out.display()))?;
        log::info!("{:<32}{:<32}", "wrote output", out.display());
    }
    Ok(())
}
