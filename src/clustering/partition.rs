use super::*;
use crate::matrix::Matrix;
use crate::Label;
use crate::Result;

/// Stage 1: coarse partition of standardized Layer-1 vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partitioner {
    kmeans: KMeans,
}

impl Partitioner {
    pub fn new(kmeans: KMeans) -> Self {
        Self { kmeans }
    }

    /// One label in `[0, k)` per row.
    pub fn partition(&self, layer1: &Matrix) -> Result<Vec<Label>> {
        log::info!("{:<32}{:<32}", "stage 1 partitioning", format!("k = {}", self.kmeans.k()));
        let fit = self.kmeans.fit(layer1)?;
        Groups::from(fit.labels.as_slice())
            .iter()
            .for_each(|(id, members)| log::info!("{:<32}{:<32}", format!("stage 1 cluster {}", id), members.len()));
        Ok(fit.labels)
    }
}

/// Members of each label, in ascending label order.
///
/// Ids with no members are absent, so iteration visits only real groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups(std::collections::BTreeMap<Label, Vec<usize>>);

impl Groups {
    pub fn iter(&self) -> impl Iterator<Item = (Label, &[usize])> + '_ {
        self.0.iter().map(|(id, members)| (*id, members.as_slice()))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Sizes in ascending label order.
    pub fn sizes(&self) -> Vec<usize> {
        self.0.values().map(Vec::len).collect()
    }
}

impl From<&[Label]> for Groups {
    fn from(labels: &[Label]) -> Self {
        Self(labels.iter().enumerate().fold(
            std::collections::BTreeMap::new(),
            |mut groups, (i, &label)| {
                groups.entry(label).or_insert_with(Vec::new).push(i);
                groups
            },
        ))
    }
}
