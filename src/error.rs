//! Error types for the clustering core.
//!
//! Only input problems are fatal. Degenerate feature columns and undefined
//! validity indices are recovered where they occur and surface through
//! logging and `Option` values instead of this enum.

use thiserror::Error;

/// Result alias for fallible core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which feature layer an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    One,
    Two,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "layer-1"),
            Self::Two => write!(f, "layer-2"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("{layer} vector of sample {sample} has {got} features, expected {expected}")]
    Dimension {
        layer: Layer,
        sample: usize,
        expected: usize,
        got: usize,
    },

    #[error("layer-1 has {layer1} samples but layer-2 has {layer2}")]
    SampleCount { layer1: usize, layer2: usize },

    #[error("{layer} value at sample {sample}, column {column} is not finite")]
    NonFinite {
        layer: Layer,
        sample: usize,
        column: usize,
    },

    #[error("cannot form {k} clusters from {n} samples")]
    TooManyClusters { k: usize, n: usize },

    #[error("invalid parameter {name}: {reason}")]
    Parameter { name: &'static str, reason: String },

    #[error("raster {0}")]
    Raster(String),
}

impl Error {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Parameter {
            name,
            reason: reason.into(),
        }
    }
}
