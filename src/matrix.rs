use crate::Feature;

/// Dense row-major matrix of feature values.
///
/// One row per sample, one column per feature. Every stage of the pipeline
/// reads and produces these; rows are borrowed as slices so distance kernels
/// never copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Feature>,
}

impl Matrix {
    /// Build from equally-sized rows. Callers validate widths beforehand.
    pub fn from_rows(rows: &[Vec<Feature>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == cols));
        Self {
            rows: rows.len(),
            cols,
            data: rows.iter().flatten().copied().collect(),
        }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
    pub fn row(&self, i: usize) -> &[Feature] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn row_mut(&mut self, i: usize) -> &mut [Feature] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }
    pub fn get(&self, i: usize, j: usize) -> Feature {
        self.data[i * self.cols + j]
    }
    /// Iterates rows in sample order.
    pub fn iter(&self) -> impl Iterator<Item = &[Feature]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }
    /// Iterates one column top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = Feature> + '_ {
        (0..self.rows).map(move |i| self.get(i, j))
    }
    /// Copy of the listed rows, in the listed order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            rows: indices.len(),
            cols: self.cols,
            data: indices
                .iter()
                .flat_map(|&i| self.row(i).iter().copied())
                .collect(),
        }
    }
    /// Copy of the leading `n` columns.
    pub fn leading(&self, n: usize) -> Self {
        let n = n.min(self.cols);
        Self {
            rows: self.rows,
            cols: n,
            data: self.iter().flat_map(|r| r[..n].iter().copied()).collect(),
        }
    }
    /// Horizontal concatenation `[self | other]`.
    pub fn hstack(&self, other: &Self) -> Self {
        debug_assert_eq!(self.rows, other.rows);
        Self {
            rows: self.rows,
            cols: self.cols + other.cols,
            data: self
                .iter()
                .zip(other.iter())
                .flat_map(|(a, b)| a.iter().chain(b.iter()).copied())
                .collect(),
        }
    }
    /// Multiplies each column by its factor, broadcast over all rows.
    pub fn scale_columns(mut self, factors: &[Feature]) -> Self {
        debug_assert_eq!(factors.len(), self.cols);
        self.data
            .chunks_mut(self.cols.max(1))
            .for_each(|row| row.iter_mut().zip(factors).for_each(|(x, w)| *x *= w));
        self
    }
    /// Row-major backing storage.
    pub fn as_slice(&self) -> &[Feature] {
        &self.data
    }
}

/// Euclidean distance between two rows.
pub fn euclidean(a: &[Feature], b: &[Feature]) -> Feature {
    squared(a, b).sqrt()
}

/// Squared Euclidean distance between two rows.
pub fn squared(a: &[Feature], b: &[Feature]) -> Feature {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(&[vec![1., 2.], vec![3., 4.], vec![5., 6.]])
    }

    #[test]
    fn select_keeps_requested_order() {
        let m = sample().select(&[2, 0]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.row(0), &[5., 6.]);
        assert_eq!(m.row(1), &[1., 2.]);
    }

    #[test]
    fn hstack_appends_columns() {
        let m = sample().hstack(&sample().leading(1));
        assert_eq!(m.cols(), 3);
        assert_eq!(m.row(1), &[3., 4., 3.]);
    }

    #[test]
    fn scale_columns_broadcasts() {
        let m = sample().scale_columns(&[2., 0.5]);
        assert_eq!(m.column(0).collect::<Vec<_>>(), vec![2., 6., 10.]);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![1., 2., 3.]);
    }

    #[test]
    fn distances() {
        assert_eq!(squared(&[0., 0.], &[3., 4.]), 25.);
        assert_eq!(euclidean(&[0., 0.], &[3., 4.]), 5.);
    }
}
