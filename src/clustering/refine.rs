use super::*;
use crate::evaluation::silhouette;
use crate::matrix::Matrix;
use crate::Energy;
use crate::Label;
use crate::Result;
use serde::Serialize;

/// Stage 2: conditional splitting of each stage-1 group.
///
/// Groups are visited in ascending stage-1 id and each reserves a contiguous
/// block of global labels from a [`LabelCounter`], so the same inputs always
/// yield the same global ids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refiner {
    min_cluster_size: usize,
    kmeans: KMeans,
    policy: SplitPolicy,
}

/// What happened to one stage-1 group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    /// Stage-1 id.
    pub group: Label,
    pub size: usize,
    /// Sub-clusters kept (1 or 2).
    pub k: usize,
    /// Silhouette of the two-way split, when one was evaluated and defined.
    pub silhouette: Option<Energy>,
    /// Score of the chosen candidate: the baseline or the split silhouette.
    /// `None` for skipped groups.
    pub score: Option<Energy>,
    /// Below `min_cluster_size`, never evaluated.
    pub skipped: bool,
    /// First global label given to this group.
    pub first: Label,
}

/// Stage-2 output.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    /// Dense global labels, one per sample.
    pub labels: Vec<Label>,
    /// One entry per stage-1 group, in ascending group order.
    pub decisions: Vec<Decision>,
}

impl Refinement {
    /// Number of global labels allocated.
    pub fn clusters(&self) -> usize {
        self.decisions.iter().map(|d| d.k).sum()
    }
}

impl Refiner {
    /// `kmeans` supplies restarts, iteration cap and seed for candidate splits.
    pub fn new(min_cluster_size: usize, kmeans: KMeans) -> Self {
        Self {
            min_cluster_size,
            kmeans,
            policy: SplitPolicy::default(),
        }
    }
    pub fn policy(self, policy: SplitPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn refine(&self, stage1: &[Label], layer2: &Matrix, weights: &Weights) -> Result<Refinement> {
        debug_assert_eq!(stage1.len(), layer2.rows());
        log::info!("{:<32}{:<32}", "stage 2 refining", format!("min size {}", self.min_cluster_size));
        let weighted = layer2.clone().scale_columns(weights.as_slice());
        let mut labels = vec![0; stage1.len()];
        let mut decisions = Vec::new();
        let mut counter = LabelCounter::default();
        for (group, members) in Groups::from(stage1).iter() {
            let (decision, local) = self.group(group, members, &weighted, counter)?;
            members
                .iter()
                .zip(local)
                .for_each(|(&i, sub)| labels[i] = counter.global(sub));
            counter = counter.advance(decision.k);
            decisions.push(decision);
        }
        log::info!("{:<32}{:<32}", "stage 2 clusters", counter.peek());
        Ok(Refinement { labels, decisions })
    }

    /// Decide one group; returns the decision and group-local sub-labels.
    fn group(
        &self,
        group: Label,
        members: &[usize],
        weighted: &Matrix,
        counter: LabelCounter,
    ) -> Result<(Decision, Vec<Label>)> {
        let size = members.len();
        let mut decision = Decision {
            group,
            size,
            k: 1,
            silhouette: None,
            score: None,
            skipped: size < self.min_cluster_size,
            first: counter.peek(),
        };
        if decision.skipped {
            log::info!("{:<32}{:<32}", format!("stage 1 cluster {}", group), format!("{} samples, too small", size));
            return Ok((decision, vec![0; size]));
        }
        let rows = weighted.select(members);
        let mut best = (Candidate::Whole, self.policy.baseline, vec![0; size]);
        for candidate in Candidate::ALL {
            let Some((score, local)) = self.score(candidate, &rows)? else {
                continue;
            };
            if candidate == Candidate::Split {
                decision.silhouette = Some(score);
            }
            if score > best.1 {
                best = (candidate, score, local);
            }
        }
        decision.k = best.0.k();
        decision.score = Some(best.1);
        log::info!(
            "{:<32}{:<32}",
            format!("stage 1 cluster {}", group),
            format!("{} samples, k = {} ({:.4})", size, decision.k, best.1)
        );
        Ok((decision, best.2))
    }

    /// Score and sub-labels of a candidate, `None` when it cannot be formed.
    ///
    /// A split is only formable when k-means leaves both halves occupied,
    /// which is also when its silhouette is defined.
    fn score(&self, candidate: Candidate, rows: &Matrix) -> Result<Option<(Energy, Vec<Label>)>> {
        match candidate {
            Candidate::Whole => Ok(Some((self.policy.baseline, vec![0; rows.rows()]))),
            Candidate::Split if rows.rows() < candidate.k() => Ok(None),
            Candidate::Split => {
                let fit = self.kmeans.clusters(candidate.k()).fit(rows)?;
                if fit.occupied() < candidate.k() {
                    log::debug!("{:<32}{:<32}", "split collapsed", rows.rows());
                    return Ok(None);
                }
                Ok(silhouette(rows, &fit.labels).map(|s| (s, fit.labels)))
            }
        }
    }
}
