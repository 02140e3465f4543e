//! Two-stage adaptive clustering of binary shape rasters.
//!
//! Samples are grouped coarsely by global shape (Hu moments and area), then
//! each coarse group is conditionally split by spatial layout (grid density
//! and normalized centroid). The final labeling is scored with internal
//! cluster-validity indices.
//!
//! ## Pipeline
//!
//! 1. **Features**: [`features::Provider`] yields one Layer-1 and one Layer-2 vector per sample
//! 2. **Standardize**: z-score each layer independently
//! 3. **Partition**: k-means over Layer-1 into `stage1_k` coarse groups
//! 4. **Refine**: per group, keep whole or split in two over weighted Layer-2
//! 5. **Evaluate**: silhouette, Davies–Bouldin, Calinski–Harabasz

pub mod clustering;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod matrix;
pub mod pipeline;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::Error;
pub use error::Result;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Feature values, standardized coordinates, and weights.
pub type Feature = f64;
/// Distances, inertia, and cluster-validity scores.
pub type Energy = f64;
/// Cluster identifier (stage-1 or stage-2).
pub type Label = usize;

// ============================================================================
// FEATURE LAYOUT
// Layer-1 = 7 Hu moments + area. Layer-2 = 4×4 density grid + centroid (x, y).
// ============================================================================
/// Number of Hu moment invariants.
pub const HU_MOMENTS: usize = 7;
/// Canonical Layer-1 width.
pub const LAYER1_DIM: usize = HU_MOMENTS + 1;
/// Density grid resolution along each axis.
pub const DENSITY_GRID: usize = 4;
/// Number of trailing Layer-2 columns holding the normalized centroid.
pub const CENTROID_DIMS: usize = 2;
/// Canonical Layer-2 width.
pub const LAYER2_DIM: usize = DENSITY_GRID * DENSITY_GRID + CENTROID_DIMS;
/// Grayscale values at or below this are foreground (dark ink on light paper).
pub const FOREGROUND_THRESHOLD: u8 = 127;

// ============================================================================
// STAGE 1
// Coarse partition over standardized Layer-1.
// ============================================================================
/// Default number of coarse clusters.
pub const STAGE1_K: usize = 3;
/// K-means restarts for the coarse partition.
pub const STAGE1_RESTARTS: usize = 30;

// ============================================================================
// STAGE 2
// Conditional two-way split over weighted Layer-2.
// ============================================================================
/// Relative weight of the centroid columns against each density column.
pub const WEIGHT_CENTROID: Feature = 0.5;
/// Groups smaller than this are never split.
pub const MIN_CLUSTER_SIZE: usize = 15;
/// K-means restarts for each candidate split.
pub const STAGE2_RESTARTS: usize = 10;
/// Score assigned to the no-split candidate. A split must beat it strictly.
pub const SPLIT_BASELINE: Energy = -1.0;

// ============================================================================
// K-MEANS
// ============================================================================
/// Lloyd iteration cap per restart.
pub const KMEANS_MAX_ITERATIONS: usize = 300;
/// Base seed; each restart derives its own stream from it.
pub const KMEANS_SEED: u64 = 42;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
