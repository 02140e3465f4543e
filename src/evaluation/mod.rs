//! Internal cluster-validity indices.
//!
//! All three indices are undefined for a partition with a single cluster or
//! with one cluster per sample; they return `None` there instead of a number.
mod calinski;
mod davies;
mod report;
mod silhouette;

pub use calinski::*;
pub use davies::*;
pub use report::*;
pub use silhouette::*;

use crate::Label;

/// Labels re-indexed densely as `0..k` in ascending order of the input ids.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dense {
    /// Dense id of each sample.
    ids: Vec<usize>,
    /// Member count of each dense id.
    sizes: Vec<usize>,
}

impl Dense {
    pub fn k(&self) -> usize {
        self.sizes.len()
    }
    pub fn n(&self) -> usize {
        self.ids.len()
    }
    /// Whether validity indices are defined for this partition.
    pub fn is_scorable(&self) -> bool {
        self.k() >= 2 && self.k() < self.n()
    }
}

impl From<&[Label]> for Dense {
    fn from(labels: &[Label]) -> Self {
        let distinct = labels
            .iter()
            .copied()
            .collect::<std::collections::BTreeSet<Label>>()
            .into_iter()
            .enumerate()
            .map(|(dense, label)| (label, dense))
            .collect::<std::collections::BTreeMap<Label, usize>>();
        let ids = labels.iter().map(|l| distinct[l]).collect::<Vec<_>>();
        let sizes = ids.iter().fold(vec![0; distinct.len()], |mut sizes, &id| {
            sizes[id] += 1;
            sizes
        });
        Self { ids, sizes }
    }
}
