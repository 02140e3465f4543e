use super::*;
use crate::matrix::euclidean;
use crate::matrix::Matrix;
use crate::Energy;
use crate::Feature;
use rayon::prelude::*;

/// Triangle-inequality accelerated k-means clustering.
///
/// Implements Elkan (2003) to reduce the O(N × K × T) naive algorithm's
/// distance computations. By maintaining upper/lower bounds on point-centroid
/// distances, most distance evaluations are skipped while assignments stay
/// identical to naive Lloyd iterations.
///
/// # Implementation
///
/// - `step_elkan()`: Single iteration with bound maintenance
/// - `step_naive()`: Reference implementation for verification
/// - `init_kmeans()`: Initial centroids (k-means++ for real restarts)
///
/// Every floating-point reduction runs sequentially in point order, so an
/// iteration is bit-for-bit reproducible regardless of the rayon pool size.
pub trait Elkan: Sync {
    /// Number of clusters.
    fn k(&self) -> usize;
    /// Returns the data points to cluster, one per row.
    fn points(&self) -> &Matrix;
    /// Returns current centroid positions.
    fn kmeans(&self) -> &[Vec<Feature>];
    /// Initializes centroids.
    fn init_kmeans(&self) -> Vec<Vec<Feature>>;

    /// Initializes bounds by computing all point-centroid distances.
    fn init_bounds(&self) -> Vec<Bounds> {
        (0..self.n())
            .into_par_iter()
            .map(|i| self.neighbor(i))
            .map(|(j, d)| Bounds::new(j, self.k(), d))
            .collect()
    }

    /// Number of data points.
    fn n(&self) -> usize {
        self.points().rows()
    }
    /// Distance between two points.
    fn distance(&self, a: &[Feature], b: &[Feature]) -> Energy {
        euclidean(a, b)
    }
    /// Gets point by index.
    fn point(&self, i: usize) -> &[Feature] {
        self.points().row(i)
    }
    /// Gets centroid by index.
    fn kmean(&self, j: usize) -> &[Feature] {
        &self.kmeans()[j]
    }

    /// Finds nearest centroid for a point (O(K) distance calls).
    /// Ties resolve to the lowest centroid index.
    fn neighbor(&self, i: usize) -> (usize, Energy) {
        let x = self.point(i);
        self.kmeans()
            .iter()
            .enumerate()
            .map(|(j, c)| (j, self.distance(c, x)))
            .inspect(|(_, d)| debug_assert!(d.is_finite()))
            .fold((0, Energy::INFINITY), |best, (j, d)| match d < best.1 {
                true => (j, d),
                false => best,
            })
    }

    /// Computes pairwise distances between all centroids.
    fn pairwises(&self) -> Vec<Vec<Energy>> {
        (0..self.k())
            .into_par_iter()
            .map(|i| (0..self.k()).map(|j| self.pairwise(i, j)).collect())
            .collect()
    }

    /// Computes distance between two centroids.
    fn pairwise(&self, i: usize, j: usize) -> Energy {
        if i == j {
            0.
        } else {
            self.distance(self.kmean(i), self.kmean(j))
        }
    }

    /// Computes s(c) = (1/2) min_{c'≠c} d(c, c') for each centroid.
    fn midpoints(&self, pairwise: &[Vec<Energy>]) -> Vec<Energy> {
        pairwise
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, &d)| d * 0.5)
                    .fold(Energy::INFINITY, Energy::min)
            })
            .collect()
    }

    /// Computes how far each centroid moved this iteration.
    fn drift(&self, news: &[Vec<Feature>]) -> Vec<Energy> {
        news.iter()
            .enumerate()
            .map(|(j, new)| self.distance(new, self.kmean(j)))
            .collect()
    }

    /// Refreshes stale upper bound before triangle inequality check.
    fn refresh(&self, b: &mut Bounds, x: &[Feature]) {
        if b.stale() {
            b.refresh(self.distance(x, self.kmean(b.j())));
        }
    }
    /// Updates bound for point-centroid pair, possibly reassigning.
    fn rebound(&self, b: &mut Bounds, j: usize, pairwise: &[Vec<Energy>], x: &[Feature]) {
        if b.has_shifted(pairwise, j) {
            b.witness(self.distance(x, self.kmean(j)), j);
        }
    }

    /// Computes new centroids from assignments.
    ///
    /// A centroid left without members is moved onto one of the points
    /// farthest from their current centroid, farthest first.
    fn centroids(&self, assigned: &[usize]) -> Vec<Vec<Feature>> {
        let dims = self.points().cols();
        let means = (0..self.k())
            .into_par_iter()
            .map(|j| {
                assigned
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| **a == j)
                    .map(|(i, _)| Centroid::from(self.point(i)))
                    .fold(Centroid::empty(dims), |sum, x| sum.absorb(&x))
                    .mean()
            })
            .collect::<Vec<Option<Vec<Feature>>>>();
        if means.iter().all(Option::is_some) {
            return means.into_iter().flatten().collect();
        }
        let mut far = (0..self.n())
            .map(|i| (i, self.distance(self.point(i), self.kmean(assigned[i]))))
            .collect::<Vec<_>>();
        far.sort_by(|(i, a), (j, b)| b.total_cmp(a).then(i.cmp(j)));
        let mut far = far.into_iter().map(|(i, _)| self.point(i).to_vec());
        means
            .into_iter()
            .enumerate()
            .map(|(j, mean)| {
                mean.or_else(|| far.next())
                    .unwrap_or_else(|| self.kmean(j).to_vec())
            })
            .collect()
    }

    /// Executes one Elkan iteration with bound maintenance.
    ///
    /// 1. Update bounds and reassign points using current centroids
    /// 2. Compute new centroids from updated assignments
    /// 3. Compute drift (how far each centroid moved)
    /// 4. Shift bounds to account for centroid movement
    fn step_elkan(&self, bounds: &mut [Bounds]) -> Vec<Vec<Feature>> {
        let pairwise = self.pairwises();
        let midpoints = self.midpoints(&pairwise);
        bounds
            .par_iter_mut()
            .enumerate()
            .filter(|(_, b)| !b.can_exclude(&midpoints))
            .for_each(|(i, b)| {
                let x = self.point(i);
                self.refresh(b, x);
                (0..self.k()).for_each(|j| self.rebound(b, j, &pairwise, x))
            });
        let assigned = bounds.iter().map(Bounds::j).collect::<Vec<_>>();
        let kmeans = self.centroids(&assigned);
        let drifts = self.drift(&kmeans);
        bounds.par_iter_mut().for_each(|b| b.update(&drifts));
        kmeans
    }

    /// Executes one naive iteration (for verification/benchmarking).
    fn step_naive(&self) -> Vec<Vec<Feature>> {
        let assigned = (0..self.n())
            .into_par_iter()
            .map(|i| self.neighbor(i).0)
            .collect::<Vec<usize>>();
        self.centroids(&assigned)
    }

    /// Nearest-centroid label of every point.
    fn labels(&self) -> Vec<usize> {
        (0..self.n())
            .into_par_iter()
            .map(|i| self.neighbor(i).0)
            .collect()
    }

    /// Sum of squared distances from each point to its nearest centroid.
    fn inertia(&self) -> Energy {
        (0..self.n())
            .into_par_iter()
            .map(|i| self.neighbor(i).1)
            .map(|d| d * d)
            .collect::<Vec<Energy>>()
            .into_iter()
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::Elkan;
    use super::TestLayer;

    #[test]
    /// Elkan pruning is exact, so every iteration must land on the same
    /// centroids as the naive algorithm.
    fn elkan_naive_equivalence() {
        let km = TestLayer::new(4, 600, 7);
        let mut elkan = km.clone();
        let mut naive = km.clone();
        for _ in 0..TestLayer::t() {
            elkan.step();
            naive.naive();
            assert_eq!(elkan.kmeans(), naive.kmeans());
        }
    }

    #[test]
    fn elkan_inertia_never_increases() {
        let mut km = TestLayer::new(5, 500, 11);
        let mut inertia = vec![km.inertia()];
        for _ in 0..TestLayer::t() {
            km.step();
            inertia.push(km.inertia());
        }
        for window in inertia.windows(2) {
            assert!(
                window[0] + 1e-9 >= window[1],
                "inertia increasing: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn empty_clusters_are_relocated() {
        let mut km = TestLayer::new(3, 60, 3);
        km.collapse();
        km.naive();
        let distinct = km
            .kmeans()
            .iter()
            .enumerate()
            .filter(|(j, c)| km.kmeans()[..*j].iter().all(|o| o != *c))
            .count();
        assert_eq!(distinct, 3);
    }
}
