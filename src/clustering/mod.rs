//! Standardization, k-means, and the two clustering stages.
pub mod absorb;
pub use absorb::*;

pub mod bounds;
pub use bounds::*;

pub mod candidate;
pub use candidate::*;

pub mod counter;
pub use counter::*;

pub mod elkan;
pub use elkan::*;

pub mod kmeans;
pub use kmeans::*;

pub mod partition;
pub use partition::*;

pub mod refine;
pub use refine::*;

pub mod standardize;
pub use standardize::*;

pub mod weights;
pub use weights::*;

#[cfg(test)]
mod tests;
#[cfg(test)]
pub use tests::*;
