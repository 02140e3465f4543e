//! Shape Clustering Binary
//!
//! Clusters a JSON feature file and optionally writes the run output.
//!
//! Usage: shapecluster --features <json> [--output <json>] [--stage1-k N] ...

fn main() -> anyhow::Result<()> {
    shapecluster::log()?;
    shapecluster::cli::run()
}
