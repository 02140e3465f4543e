use crate::Feature;

/// Trait for k-means centroid computation via incremental aggregation.
///
/// The "absorb" pattern generalizes mean computation: samples are folded
/// into an accumulator one at a time, starting from a neutral element.
///
/// # Invariant
///
/// Absorbing is associative and commutative up to floating-point rounding,
/// so callers fold in a fixed order whenever bitwise reproducibility matters.
pub trait Absorb {
    /// Returns the identity element.
    fn identity(&self) -> Self;
    /// Combines this accumulator with another.
    fn absorb(self, other: &Self) -> Self;
}

/// Running coordinate sum and member count of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    sum: Vec<Feature>,
    n: usize,
}

impl Centroid {
    /// Empty accumulator in `dims` dimensions.
    pub fn empty(dims: usize) -> Self {
        Self {
            sum: vec![0.; dims],
            n: 0,
        }
    }
    /// Arithmetic mean of absorbed points, `None` when nothing was absorbed.
    pub fn mean(&self) -> Option<Vec<Feature>> {
        match self.n {
            0 => None,
            n => Some(self.sum.iter().map(|s| s / n as Feature).collect()),
        }
    }
}

impl Absorb for Centroid {
    fn identity(&self) -> Self {
        Self::empty(self.sum.len())
    }
    fn absorb(mut self, other: &Self) -> Self {
        self.sum.iter_mut().zip(&other.sum).for_each(|(s, v)| *s += v);
        self.n += other.n;
        self
    }
}

impl From<&[Feature]> for Centroid {
    fn from(x: &[Feature]) -> Self {
        Self {
            sum: x.to_vec(),
            n: 1,
        }
    }
}
