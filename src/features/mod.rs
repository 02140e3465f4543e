//! Per-sample feature vectors and the providers that produce them.
//!
//! The clustering core only depends on [`Provider`]: something that yields a
//! [`Dataset`] of Layer-1 (global shape) and Layer-2 (spatial layout) vectors
//! in a stable order. [`Extractor`] is the reference provider over binary
//! rasters; a [`Dataset`] read from disk is a provider of itself.
mod dataset;
mod density;
mod extractor;
mod moments;
mod raster;
mod summary;

pub use dataset::*;
pub use density::*;
pub use extractor::*;
pub use moments::*;
pub use raster::*;
pub use summary::*;

/// Source of per-sample feature vectors.
pub trait Provider {
    /// Produce every usable sample, in a deterministic order.
    fn provide(&self) -> crate::Result<Dataset>;
}

impl Provider for Dataset {
    fn provide(&self) -> crate::Result<Dataset> {
        Ok(self.clone())
    }
}
