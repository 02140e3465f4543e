use crate::Energy;
use crate::SPLIT_BASELINE;
use serde::Serialize;

/// The fixed set of sub-partitions tried for each large stage-1 group.
///
/// Evaluated in declaration order; a later candidate replaces the current
/// best only with a strictly greater score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Candidate {
    /// Keep the group as one cluster.
    Whole,
    /// Two-way k-means split.
    Split,
}

impl Candidate {
    pub const ALL: [Self; 2] = [Self::Whole, Self::Split];

    /// Number of sub-clusters this candidate produces.
    pub const fn k(&self) -> usize {
        match self {
            Self::Whole => 1,
            Self::Split => 2,
        }
    }
}

/// How a split is judged against keeping a group whole.
///
/// The whole group scores `baseline`, since silhouette is undefined for a
/// single cluster. With the default of −1, the lowest possible silhouette,
/// practically every well-formed split wins. Raising the baseline (e.g. to 0)
/// demands a split with real separation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitPolicy {
    pub baseline: Energy,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            baseline: SPLIT_BASELINE,
        }
    }
}
