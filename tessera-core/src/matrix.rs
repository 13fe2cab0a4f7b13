//! Ratings matrix representations.
//!
//! A built matrix is immutable; rebuilding requires a fresh record set. The
//! dense and sparse variants expose identical logical content for identical
//! input, differing only in storage cost.

use crate::error::{MatrixError, Result};
use crate::shape::ShapeSpec;

/// A two-dimensional ratings array, dense or coordinate-list backed.
///
/// # Examples
/// ```
/// use tessera_core::{Interactions, MatrixBuilder, MatrixLayout, ShapeSpec};
///
/// let interactions = Interactions::try_new(vec![0, 1], vec![1, 0], vec![3.0, 4.0])?;
/// let matrix = MatrixBuilder::new()
///     .with_layout(MatrixLayout::Sparse)
///     .build(&interactions, ShapeSpec::new(2, 2))?;
/// assert_eq!(matrix.get(0, 1), Some(3.0));
/// assert_eq!(matrix.get(0, 0), Some(0.0));
/// assert_eq!(matrix.get(2, 0), None);
/// # Ok::<(), tessera_core::MatrixError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RatingsMatrix {
    /// Fully materialized row-major storage.
    Dense(DenseRatings),
    /// Coordinate-list storage of nonzero cells.
    Sparse(SparseRatings),
}

impl RatingsMatrix {
    /// Returns the matrix dimensions.
    #[must_use]
    pub fn shape(&self) -> ShapeSpec {
        match self {
            Self::Dense(dense) => dense.shape(),
            Self::Sparse(sparse) => sparse.shape(),
        }
    }

    /// Returns the rating at `(row, col)`, or `None` outside the shape.
    ///
    /// Cells no record wrote read as `0.0` in both variants.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        match self {
            Self::Dense(dense) => dense.get(row, col),
            Self::Sparse(sparse) => sparse.get(row, col),
        }
    }

    /// Returns the number of stored nonzero cells.
    #[must_use]
    pub fn nnz(&self) -> usize {
        match self {
            Self::Dense(dense) => dense.nnz(),
            Self::Sparse(sparse) => sparse.nnz(),
        }
    }

    /// Fully materializes the matrix, whichever variant backs it.
    ///
    /// # Errors
    /// Returns [`MatrixError::CapacityOverflow`] when the dense cell count
    /// exceeds the host pointer width.
    pub fn to_dense(&self) -> Result<DenseRatings> {
        match self {
            Self::Dense(dense) => Ok(dense.clone()),
            Self::Sparse(sparse) => sparse.to_dense(),
        }
    }
}

/// Row-major dense ratings storage, zero-filled between written cells.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseRatings {
    shape: ShapeSpec,
    values: Vec<f64>,
}

impl DenseRatings {
    pub(crate) fn from_parts(shape: ShapeSpec, values: Vec<f64>) -> Self {
        debug_assert_eq!(
            values.len(),
            shape.num_rows.saturating_mul(shape.num_cols)
        );
        Self { shape, values }
    }

    /// Returns the matrix dimensions.
    #[must_use]
    pub fn shape(&self) -> ShapeSpec {
        self.shape
    }

    /// Returns the row-major cell buffer.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns one row as a contiguous slice, or `None` out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.shape.num_rows {
            return None;
        }
        let start = row.checked_mul(self.shape.num_cols)?;
        let end = start.checked_add(self.shape.num_cols)?;
        self.values.get(start..end)
    }

    /// Returns the rating at `(row, col)`, or `None` outside the shape.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.shape.num_cols {
            return None;
        }
        self.row(row).and_then(|cells| cells.get(col)).copied()
    }

    /// Returns the number of nonzero cells.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.iter().filter(|&&value| value != 0.0).count()
    }
}

/// Coordinate-list sparse ratings storage.
///
/// Coordinates are sorted by `(row, col)` with no duplicates, so lookups are
/// binary searches and iteration is deterministic.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseRatings {
    shape: ShapeSpec,
    coords: Vec<(usize, usize)>,
    values: Vec<f64>,
}

impl SparseRatings {
    pub(crate) fn from_sorted(
        shape: ShapeSpec,
        coords: Vec<(usize, usize)>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(coords.len(), values.len());
        debug_assert!(coords.windows(2).all(|pair| pair[0] < pair[1]));
        Self {
            shape,
            coords,
            values,
        }
    }

    /// Returns the matrix dimensions.
    #[must_use]
    pub fn shape(&self) -> ShapeSpec {
        self.shape
    }

    /// Returns the number of stored cells.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the rating at `(row, col)`, or `None` outside the shape.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.shape.num_rows || col >= self.shape.num_cols {
            return None;
        }
        match self.coords.binary_search(&(row, col)) {
            Ok(position) => self.values.get(position).copied(),
            Err(_) => Some(0.0),
        }
    }

    /// Iterates stored cells as `(row, col, value)` in coordinate order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.coords
            .iter()
            .zip(&self.values)
            .map(|(&(row, col), &value)| (row, col, value))
    }

    /// Materializes the full dense equivalent.
    ///
    /// # Errors
    /// Returns [`MatrixError::CapacityOverflow`] when the dense cell count
    /// exceeds the host pointer width.
    pub fn to_dense(&self) -> Result<DenseRatings> {
        let cells = self.shape.cells().ok_or(MatrixError::CapacityOverflow {
            num_rows: self.shape.num_rows,
            num_cols: self.shape.num_cols,
        })?;
        let mut values = vec![0.0; cells];
        for (row, col, value) in self.entries() {
            if let Some(slot) = values.get_mut(row * self.shape.num_cols + col) {
                *slot = value;
            }
        }
        Ok(DenseRatings::from_parts(self.shape, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sparse() -> SparseRatings {
        SparseRatings::from_sorted(
            ShapeSpec::new(3, 4),
            vec![(0, 1), (2, 0), (2, 3)],
            vec![1.5, 2.0, 4.0],
        )
    }

    #[test]
    fn sparse_get_distinguishes_zero_cells_from_out_of_bounds() {
        let sparse = sample_sparse();
        assert_eq!(sparse.get(0, 1), Some(1.5));
        assert_eq!(sparse.get(1, 1), Some(0.0));
        assert_eq!(sparse.get(3, 0), None);
        assert_eq!(sparse.get(0, 4), None);
    }

    #[test]
    fn sparse_to_dense_places_every_entry() {
        let dense = sample_sparse().to_dense().expect("3x4 fits in memory");
        assert_eq!(
            dense.values(),
            &[0.0, 1.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 4.0]
        );
        assert_eq!(dense.nnz(), 3);
    }

    #[test]
    fn dense_row_access_is_bounds_checked() {
        let dense = DenseRatings::from_parts(ShapeSpec::new(2, 2), vec![1.0, 0.0, 0.0, 2.0]);
        assert_eq!(dense.row(1), Some(&[0.0, 2.0][..]));
        assert_eq!(dense.row(2), None);
        assert_eq!(dense.get(0, 2), None);
    }
}
