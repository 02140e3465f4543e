use super::*;
use crate::matrix::Matrix;
use crate::Feature;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Points scattered uniformly within `spread` of each center.
///
/// Rows are emitted blob by blob, so blob membership is a contiguous
/// index range. Deterministic for a given seed.
pub fn blobs(centers: &[(Vec<Feature>, usize)], spread: Feature, seed: u64) -> Matrix {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    Matrix::from_rows(
        &centers
            .iter()
            .flat_map(|(c, n)| std::iter::repeat(c).take(*n))
            .map(|c| {
                c.iter()
                    .map(|x| x + rng.random_range(-spread..=spread))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>(),
    )
}

/// Test fixture for Elkan algorithm verification.
///
/// Clusters uniformly random points in a small cube with random initial
/// centroids drawn from the data.
#[derive(Clone)]
pub struct TestLayer {
    k: usize,
    points: Matrix,
    kmeans: Vec<Vec<Feature>>,
    bounds: Vec<Bounds>,
}

impl TestLayer {
    /// Number of iterations for test runs.
    pub const fn t() -> usize {
        12
    }
    /// Creates a new test layer with `n` random points in 4 dimensions.
    pub fn new(k: usize, n: usize, seed: u64) -> Self {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let points = Matrix::from_rows(
            &(0..n)
                .map(|_| (0..4).map(|_| rng.random_range(-1.0..1.0)).collect())
                .collect::<Vec<Vec<Feature>>>(),
        );
        let mut km = Self {
            k,
            points,
            kmeans: vec![],
            bounds: vec![],
        };
        km.kmeans = km.init_kmeans();
        km.bounds = km.init_bounds();
        km
    }

    /// Runs one Elkan iteration.
    pub fn step(&mut self) {
        let mut bounds = std::mem::take(&mut self.bounds);
        self.kmeans = Elkan::step_elkan(self, &mut bounds);
        self.bounds = bounds;
    }

    /// Runs one naive iteration.
    pub fn naive(&mut self) {
        self.kmeans = Elkan::step_naive(self);
    }

    /// Stacks every centroid on the first point.
    pub fn collapse(&mut self) {
        let first = self.points.row(0).to_vec();
        self.kmeans.iter_mut().for_each(|c| *c = first.clone());
    }
}

impl Elkan for TestLayer {
    fn k(&self) -> usize {
        self.k
    }
    fn points(&self) -> &Matrix {
        &self.points
    }
    fn kmeans(&self) -> &[Vec<Feature>] {
        &self.kmeans
    }
    fn init_kmeans(&self) -> Vec<Vec<Feature>> {
        (0..self.k)
            .map(|j| self.points.row(j * self.points.rows() / self.k).to_vec())
            .collect()
    }
}
