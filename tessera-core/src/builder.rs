//! Builder for materializing interaction records into ratings matrices.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::{MatrixAxis, MatrixError, Result},
    interactions::Interactions,
    matrix::{DenseRatings, RatingsMatrix, SparseRatings},
    shape::ShapeSpec,
};

/// Physical representation of the matrix to build.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatrixLayout {
    /// Fully materialized row-major array; memory cost is
    /// `num_rows * num_cols` cells.
    #[default]
    Dense,
    /// Coordinate list of nonzero cells; memory cost is proportional to the
    /// number of records.
    Sparse,
}

/// How duplicate `(user, item)` pairs combine into their single cell.
///
/// The matrix holds exactly one cell per pair, but a record set may mention
/// a pair more than once. This is a policy choice, not an input error;
/// downstream consumers differ on which they need.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FillPolicy {
    /// The record encountered last in input order wins.
    #[default]
    Overwrite,
    /// Duplicate ratings accumulate into the cell.
    Sum,
}

/// Configures and runs matrix construction.
///
/// # Examples
/// ```
/// use tessera_core::{Interactions, MatrixBuilder, MatrixLayout, ShapeSpec};
///
/// let interactions = Interactions::try_new(vec![0, 2], vec![1, 0], vec![5.0, 3.0])?;
/// let shape = ShapeSpec::resolve(interactions.user_ids(), interactions.item_ids(), None, None)?;
/// let matrix = MatrixBuilder::new()
///     .with_layout(MatrixLayout::Dense)
///     .build(&interactions, shape)?;
/// assert_eq!(matrix.shape(), ShapeSpec::new(3, 2));
/// assert_eq!(matrix.get(0, 1), Some(5.0));
/// # Ok::<(), tessera_core::MatrixError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MatrixBuilder {
    layout: MatrixLayout,
    fill: FillPolicy,
}

impl MatrixBuilder {
    /// Creates a builder with the default dense layout and overwrite policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the physical representation to build.
    #[must_use]
    pub fn with_layout(mut self, layout: MatrixLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Selects how duplicate `(user, item)` pairs combine.
    #[must_use]
    pub fn with_fill_policy(mut self, fill: FillPolicy) -> Self {
        self.fill = fill;
        self
    }

    /// Returns the configured layout.
    #[must_use]
    pub fn layout(&self) -> MatrixLayout {
        self.layout
    }

    /// Returns the configured fill policy.
    #[must_use]
    pub fn fill_policy(&self) -> FillPolicy {
        self.fill
    }

    /// Builds an all-zero matrix of `shape` and writes every record's rating
    /// into its `(user_id, item_id)` cell.
    ///
    /// Identifiers outside `shape` are always fatal; an out-of-bounds write
    /// would otherwise silently corrupt whatever trains on the matrix.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeOverflow`] when a record's identifier
    /// falls outside `shape`, and [`MatrixError::CapacityOverflow`] when a
    /// dense build's cell count exceeds the host pointer width.
    pub fn build(&self, interactions: &Interactions, shape: ShapeSpec) -> Result<RatingsMatrix> {
        let matrix = match self.layout {
            MatrixLayout::Dense => RatingsMatrix::Dense(self.build_dense(interactions, shape)?),
            MatrixLayout::Sparse => RatingsMatrix::Sparse(self.build_sparse(interactions, shape)?),
        };
        debug!(
            num_rows = shape.num_rows,
            num_cols = shape.num_cols,
            records = interactions.len(),
            nnz = matrix.nnz(),
            "built ratings matrix"
        );
        Ok(matrix)
    }

    fn build_dense(&self, interactions: &Interactions, shape: ShapeSpec) -> Result<DenseRatings> {
        let cells = shape.cells().ok_or(MatrixError::CapacityOverflow {
            num_rows: shape.num_rows,
            num_cols: shape.num_cols,
        })?;
        let mut values = vec![0.0; cells];
        for (user, item, rating) in interactions.iter() {
            let (row, col) = cell_coordinates(shape, user, item)?;
            if let Some(slot) = values.get_mut(row * shape.num_cols + col) {
                combine(slot, rating, self.fill);
            }
        }
        Ok(DenseRatings::from_parts(shape, values))
    }

    fn build_sparse(
        &self,
        interactions: &Interactions,
        shape: ShapeSpec,
    ) -> Result<SparseRatings> {
        // BTreeMap collapses duplicate pairs and leaves the coordinate list
        // already sorted for binary-search lookups.
        let mut cells: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (user, item, rating) in interactions.iter() {
            let coordinate = cell_coordinates(shape, user, item)?;
            match self.fill {
                FillPolicy::Overwrite => {
                    cells.insert(coordinate, rating);
                }
                FillPolicy::Sum => {
                    combine(cells.entry(coordinate).or_insert(0.0), rating, self.fill);
                }
            }
        }
        let (coords, values): (Vec<_>, Vec<_>) = cells
            .into_iter()
            .filter(|&(_, value)| value != 0.0)
            .unzip();
        Ok(SparseRatings::from_sorted(shape, coords, values))
    }
}

/// Maps one record's identifiers onto matrix coordinates, rejecting anything
/// outside `shape`.
fn cell_coordinates(shape: ShapeSpec, user: u64, item: u64) -> Result<(usize, usize)> {
    let row = usize::try_from(user)
        .ok()
        .filter(|&row| row < shape.num_rows)
        .ok_or(MatrixError::ShapeOverflow {
            axis: MatrixAxis::Users,
            id: user,
            bound: shape.num_rows,
        })?;
    let col = usize::try_from(item)
        .ok()
        .filter(|&col| col < shape.num_cols)
        .ok_or(MatrixError::ShapeOverflow {
            axis: MatrixAxis::Items,
            id: item,
            bound: shape.num_cols,
        })?;
    Ok((row, col))
}

#[expect(clippy::float_arithmetic, reason = "rating accumulation")]
fn combine(slot: &mut f64, rating: f64, fill: FillPolicy) {
    match fill {
        FillPolicy::Overwrite => *slot = rating,
        FillPolicy::Sum => *slot += rating,
    }
}
