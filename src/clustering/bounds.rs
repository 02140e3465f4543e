use crate::Energy;

/// Per-point metadata for Elkan's accelerated k-means algorithm.
///
/// Stores distance bounds that enable triangle inequality pruning,
/// so most point-centroid distances are never computed.
///
/// # Algorithm (Elkan 2003)
///
/// If d(x, c) ≤ u and d(c, c') ≥ 2u, then c' cannot be closer to x than c,
/// so d(x, c') is skipped.
///
/// # Fields
///
/// - `j`: Index of currently assigned centroid (c(x) in paper)
/// - `lower`: Lower bounds l(x, c) for each centroid c
/// - `error`: Upper bound u(x) on distance to assigned centroid
/// - `stale`: Whether upper bound needs refreshing after centroid drift
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    j: usize,
    lower: Vec<Energy>,
    error: Energy,
    stale: bool,
}

impl Bounds {
    /// Fresh bounds for a point assigned to `j` at distance `upper`.
    pub fn new(j: usize, k: usize, upper: Energy) -> Self {
        let mut lower = vec![0.; k];
        lower[j] = upper;
        Self {
            j,
            lower,
            error: upper,
            stale: false,
        }
    }
    /// Currently assigned centroid index.
    pub fn j(&self) -> usize {
        self.j
    }
    /// Upper bound on distance to assigned centroid.
    pub fn u(&self) -> Energy {
        self.error
    }
    /// Whether the upper bound may be outdated.
    pub fn stale(&self) -> bool {
        self.stale
    }
    /// Checks if centroid j could be closer than current assignment.
    ///
    /// Returns true (needs checking) if all triangle inequality filters fail:
    /// 1. j ≠ c(x): not currently assigned
    /// 2. u(x) > l(x,j): upper bound exceeds lower bound
    /// 3. u(x) > d(c(x),j)/2: upper bound exceeds half inter-centroid distance
    pub fn has_shifted(&self, pairs: &[Vec<Energy>], j: usize) -> bool {
        self.j != j && self.u() > self.lower[j] && self.u() > 0.5 * pairs[self.j][j]
    }
    /// Checks if this point can skip the reassignment pass entirely.
    /// True when u(x) ≤ s(c(x)) where s(c) = min_{c'≠c} d(c,c')/2.
    pub fn can_exclude(&self, midpoints: &[Energy]) -> bool {
        self.u() <= midpoints[self.j]
    }
    /// Updates bounds after centroids move.
    /// Lowers are decreased by movement; upper is increased.
    pub fn update(&mut self, movements: &[Energy]) {
        self.lower
            .iter_mut()
            .zip(movements)
            .for_each(|(lower, movement)| *lower = (*lower - movement).max(0.));
        self.error += movements[self.j];
        self.stale = movements.iter().any(|&m| m > 0.) || self.stale;
    }
    /// Refreshes upper bound by computing actual distance.
    pub fn refresh(&mut self, distance: Energy) {
        self.lower[self.j] = distance;
        self.error = distance;
        self.stale = false;
    }
    /// Records distance to centroid j, reassigning if strictly closer.
    pub fn witness(&mut self, distance: Energy, j: usize) {
        self.lower[j] = distance;
        if distance < self.u() {
            self.j = j;
            self.error = distance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn witness_reassigns_only_when_closer() {
        let mut b = Bounds::new(0, 3, 2.);
        b.witness(2., 1);
        assert_eq!(b.j(), 0);
        b.witness(1., 2);
        assert_eq!(b.j(), 2);
        assert_eq!(b.u(), 1.);
    }

    #[test]
    fn drift_loosens_bounds() {
        let mut b = Bounds::new(1, 2, 1.);
        b.witness(1.5, 0);
        b.update(&[1., 0.5]);
        assert!(b.stale());
        assert_eq!(b.u(), 1.5);
        assert!(b.has_shifted(&[vec![0., 2.], vec![2., 0.]], 0));
        assert!(!b.has_shifted(&[vec![0., 10.], vec![10., 0.]], 0));
        assert!(!b.has_shifted(&[vec![0., 2.], vec![2., 0.]], 1));
    }

    #[test]
    fn exclusion_uses_assigned_midpoint() {
        let b = Bounds::new(1, 2, 1.);
        assert!(b.can_exclude(&[0.5, 1.]));
        assert!(!b.can_exclude(&[5., 0.9]));
    }
}
