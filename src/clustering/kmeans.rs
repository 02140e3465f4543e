use super::*;
use crate::matrix::Matrix;
use crate::Energy;
use crate::Error;
use crate::Feature;
use crate::Label;
use crate::Result;
use crate::KMEANS_MAX_ITERATIONS;
use crate::KMEANS_SEED;
use rayon::prelude::*;

/// Multi-restart k-means configuration.
///
/// Each restart draws its own k-means++ seeding from `seed` and the restart
/// index, runs Elkan iterations until no centroid moves or the iteration cap
/// is hit, and the restart with lowest inertia wins. Hitting the cap is not
/// an error. Restarts run in parallel but are compared in restart order, so
/// the winner never depends on scheduling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    k: usize,
    restarts: usize,
    iterations: usize,
    seed: u64,
}

/// Outcome of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    /// Nearest final centroid per point.
    pub labels: Vec<Label>,
    pub centroids: Vec<Vec<Feature>>,
    /// Sum of squared distances to the assigned centroid.
    pub inertia: Energy,
    /// Lloyd iterations run by the winning restart.
    pub iterations: usize,
    /// Index of the winning restart.
    pub restart: usize,
}

impl Fit {
    /// Number of clusters that received at least one point.
    pub fn occupied(&self) -> usize {
        (0..self.centroids.len())
            .filter(|j| self.labels.contains(j))
            .count()
    }
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            restarts: 1,
            iterations: KMEANS_MAX_ITERATIONS,
            seed: KMEANS_SEED,
        }
    }
    pub fn clusters(self, k: usize) -> Self {
        Self { k, ..self }
    }
    pub fn restarts(self, restarts: usize) -> Self {
        Self { restarts, ..self }
    }
    pub fn iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }
    pub fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn fit(&self, x: &Matrix) -> Result<Fit> {
        if self.k == 0 || self.k > x.rows() {
            return Err(Error::TooManyClusters {
                k: self.k,
                n: x.rows(),
            });
        }
        if self.restarts == 0 {
            return Err(Error::parameter("restarts", "must be positive"));
        }
        if self.iterations == 0 {
            return Err(Error::parameter("iterations", "must be positive"));
        }
        let fits = (0..self.restarts)
            .into_par_iter()
            .map(|r| Restart::new(x, self.k, self.seed.wrapping_add(r as u64)).run(r, self.iterations))
            .collect::<Vec<Fit>>();
        let best = fits
            .into_iter()
            .reduce(|best, fit| match fit.inertia < best.inertia {
                true => fit,
                false => best,
            })
            .ok_or_else(|| Error::parameter("restarts", "must be positive"))?;
        log::debug!(
            "{:<32}{:<16}{:<16.6}{:<16}",
            "kmeans best restart",
            best.restart,
            best.inertia,
            best.iterations
        );
        Ok(best)
    }
}

/// One seeded k-means run over a borrowed matrix.
struct Restart<'a> {
    k: usize,
    seed: u64,
    points: &'a Matrix,
    kmeans: Vec<Vec<Feature>>,
}

impl<'a> Restart<'a> {
    fn new(points: &'a Matrix, k: usize, seed: u64) -> Self {
        let mut restart = Self {
            k,
            seed,
            points,
            kmeans: vec![],
        };
        restart.kmeans = restart.init_kmeans();
        restart
    }

    fn run(mut self, restart: usize, t: usize) -> Fit {
        let mut bounds = self.init_bounds();
        let mut iterations = 0;
        while iterations < t {
            let next = self.step_elkan(&mut bounds);
            iterations += 1;
            let settled = next == self.kmeans;
            self.kmeans = next;
            if settled {
                break;
            }
        }
        log::trace!("{:<32}{:<16}{:<16}", "kmeans restart settled", restart, iterations);
        let labels = self.labels();
        let inertia = labels
            .iter()
            .enumerate()
            .map(|(i, &j)| self.distance(self.point(i), self.kmean(j)))
            .map(|d| d * d)
            .sum();
        Fit {
            labels,
            centroids: self.kmeans,
            inertia,
            iterations,
            restart,
        }
    }
}

impl Elkan for Restart<'_> {
    fn k(&self) -> usize {
        self.k
    }
    fn points(&self) -> &Matrix {
        self.points
    }
    fn kmeans(&self) -> &[Vec<Feature>] {
        &self.kmeans
    }

    /// k-means++ seeding: the first centroid is drawn uniformly, each next
    /// one with probability proportional to its squared distance from the
    /// nearest chosen one.
    fn init_kmeans(&self) -> Vec<Vec<Feature>> {
        use rand::Rng;
        use rand::SeedableRng;
        use rand::distr::Distribution;
        use rand::distr::weighted::WeightedIndex;
        use rand::rngs::SmallRng;
        let ref mut rng = SmallRng::seed_from_u64(self.seed);
        let mut potentials = vec![Energy::INFINITY; self.n()];
        let mut kmeans = Vec::with_capacity(self.k);
        while kmeans.len() < self.k {
            let i = match kmeans.is_empty() {
                true => rng.random_range(0..self.n()),
                false => match WeightedIndex::new(potentials.iter()) {
                    Ok(weights) => weights.sample(rng),
                    Err(_) => rng.random_range(0..self.n()),
                },
            };
            let x = self.point(i);
            kmeans.push(x.to_vec());
            potentials = self
                .points()
                .iter()
                .map(|h| self.distance(x, h))
                .map(|d| d * d)
                .zip(potentials.iter())
                .map(|(d0, d1)| Energy::min(d0, *d1))
                .collect::<Vec<Energy>>();
        }
        kmeans
    }
}

#[cfg(test)]
mod tests {
    use super::super::blobs;
    use super::*;

    fn three_blobs() -> Matrix {
        blobs(
            &[
                (vec![0., 0.], 30),
                (vec![10., 0.], 20),
                (vec![0., 10.], 10),
            ],
            1.,
            5,
        )
    }

    #[test]
    fn recovers_separated_blobs() {
        let x = three_blobs();
        let fit = KMeans::new(3).restarts(8).fit(&x).unwrap();
        assert_eq!(fit.occupied(), 3);
        let ranges = [0..30, 30..50, 50..60];
        for r in ranges.iter() {
            let first = fit.labels[r.start];
            assert!(fit.labels[r.clone()].iter().all(|&l| l == first));
        }
        let mut firsts = ranges.iter().map(|r| fit.labels[r.start]).collect::<Vec<_>>();
        firsts.sort();
        assert_eq!(firsts, vec![0, 1, 2]);
    }

    #[test]
    fn restarts_are_deterministic() {
        let x = three_blobs();
        let a = KMeans::new(3).restarts(6).fit(&x).unwrap();
        let b = KMeans::new(3).restarts(6).fit(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn more_restarts_never_worse() {
        let x = blobs(&[(vec![0., 0., 0.], 80)], 3., 9);
        let one = KMeans::new(4).restarts(1).fit(&x).unwrap();
        let many = KMeans::new(4).restarts(12).fit(&x).unwrap();
        assert!(many.inertia <= one.inertia);
    }

    #[test]
    fn iteration_cap_is_not_an_error() {
        let x = blobs(&[(vec![0., 0.], 50)], 5., 2);
        let fit = KMeans::new(3).iterations(1).fit(&x).unwrap();
        assert_eq!(fit.iterations, 1);
        assert_eq!(fit.labels.len(), 50);
    }

    #[test]
    fn identical_points_occupy_one_cluster() {
        let x = Matrix::from_rows(&vec![vec![1., 2.]; 12]);
        let fit = KMeans::new(2).restarts(3).fit(&x).unwrap();
        assert_eq!(fit.occupied(), 1);
        assert_eq!(fit.inertia, 0.);
    }

    #[test]
    fn seeding_weighs_squared_distance() {
        let x = Matrix::from_rows(
            &std::iter::repeat(vec![0.])
                .take(20)
                .chain(std::iter::repeat(vec![1.5]).take(20))
                .chain(std::iter::once(vec![1000.]))
                .collect::<Vec<_>>(),
        );
        let seeded = (0..200)
            .filter(|&seed| Restart::new(&x, 2, seed).kmeans.contains(&vec![1000.]))
            .count();
        assert!(seeded >= 195, "outlier seeded in {} of 200", seeded);
    }

    #[test]
    fn rejects_more_clusters_than_points() {
        let x = Matrix::from_rows(&[vec![0.], vec![1.]]);
        assert_eq!(
            KMeans::new(3).fit(&x),
            Err(Error::TooManyClusters { k: 3, n: 2 })
        );
        assert!(KMeans::new(0).fit(&x).is_err());
    }
}
