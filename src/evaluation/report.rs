use super::*;
use crate::matrix::Matrix;
use crate::Energy;
use serde::Serialize;

/// Cluster-validity summary of a final labeling.
///
/// Observational only: nothing here feeds back into label decisions.
/// An index is `None` when the partition has one cluster or one per sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityReport {
    pub silhouette: Option<Energy>,
    pub davies_bouldin: Option<Energy>,
    pub calinski_harabasz: Option<Energy>,
    /// Number of distinct final labels.
    pub clusters: usize,
}

impl QualityReport {
    pub fn evaluate(x: &Matrix, labels: &[Label]) -> Self {
        let dense = Dense::from(labels);
        if !dense.is_scorable() {
            log::warn!(
                "{:<32}{:<32}",
                "quality indices undefined",
                format!("{} clusters over {} samples", dense.k(), dense.n())
            );
        }
        Self {
            silhouette: silhouette(x, labels),
            davies_bouldin: davies_bouldin(x, labels),
            calinski_harabasz: calinski_harabasz(x, labels),
            clusters: dense.k(),
        }
    }

    pub fn log(&self) {
        log::info!("{:<32}{:<32}", "final clusters", self.clusters);
        log::info!("{:<32}{:<32}", "silhouette", show(self.silhouette, 4));
        log::info!("{:<32}{:<32}", "davies-bouldin", show(self.davies_bouldin, 4));
        log::info!("{:<32}{:<32}", "calinski-harabasz", show(self.calinski_harabasz, 1));
    }
}

fn show(score: Option<Energy>, precision: usize) -> String {
    score
        .map(|s| format!("{:.*}", precision, s))
        .unwrap_or_else(|| String::from("undefined"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_degenerate_partitions() {
        let x = Matrix::from_rows(&[vec![0.], vec![1.], vec![2.]]);
        let report = QualityReport::evaluate(&x, &[5, 5, 5]);
        assert_eq!(report.clusters, 1);
        assert_eq!(report.silhouette, None);
        assert_eq!(report.davies_bouldin, None);
        assert_eq!(report.calinski_harabasz, None);
    }

    #[test]
    fn scores_regular_partitions() {
        let x = Matrix::from_rows(&[vec![0.], vec![2.], vec![10.], vec![12.]]);
        let report = QualityReport::evaluate(&x, &[0, 0, 1, 1]);
        assert_eq!(report.clusters, 2);
        assert!(report.silhouette.is_some_and(|s| (-1. ..=1.).contains(&s)));
        assert!(report.davies_bouldin.is_some());
        assert!(report.calinski_harabasz.is_some());
    }

    #[test]
    fn serializes_undefined_as_null() {
        let x = Matrix::from_rows(&[vec![0.], vec![1.]]);
        let json = serde_json::to_value(QualityReport::evaluate(&x, &[0, 1])).unwrap();
        assert!(json["silhouette"].is_null());
        assert_eq!(json["clusters"], 2);
    }
}
