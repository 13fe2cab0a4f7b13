//! Matrix shape resolution from identifier collections.

use crate::error::{MatrixAxis, MatrixError, Result};

/// Dimensions of a ratings matrix.
///
/// A `ShapeSpec` is a plain value; resolve it once and pass it by value to
/// every build that must share the same identifier space.
///
/// # Examples
/// ```
/// use tessera_core::ShapeSpec;
///
/// let shape = ShapeSpec::new(6, 10);
/// assert_eq!(shape.num_rows, 6);
/// assert_eq!(shape.num_cols, 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ShapeSpec {
    /// Number of rows, one per addressable user identifier.
    pub num_rows: usize,
    /// Number of columns, one per addressable item identifier.
    pub num_cols: usize,
}

impl ShapeSpec {
    /// Creates a shape with the given dimensions.
    #[must_use]
    pub const fn new(num_rows: usize, num_cols: usize) -> Self {
        Self { num_rows, num_cols }
    }

    /// Total cell count, or `None` when the product overflows.
    pub(crate) fn cells(self) -> Option<usize> {
        self.num_rows.checked_mul(self.num_cols)
    }

    /// Resolves matrix dimensions from identifier columns.
    ///
    /// Explicit counts are used verbatim per axis; the caller asserts they
    /// are sufficient, and oversized counts merely yield trailing all-zero
    /// rows or columns. An inferred axis resolves to `max(id) + 1`, so gaps
    /// and nonzero minimum identifiers keep their structurally-zero rows and
    /// columns instead of being compacted away.
    ///
    /// # Errors
    /// Returns [`MatrixError::EmptyInput`] when an axis must be inferred
    /// from an empty identifier column, and [`MatrixError::ShapeOverflow`]
    /// when an identifier does not fit the host pointer width.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::ShapeSpec;
    ///
    /// let inferred = ShapeSpec::resolve(&[1, 4, 2], &[0, 9], None, None)?;
    /// assert_eq!(inferred, ShapeSpec::new(5, 10));
    ///
    /// let explicit = ShapeSpec::resolve(&[1, 4, 2], &[0, 9], Some(100), Some(50))?;
    /// assert_eq!(explicit, ShapeSpec::new(100, 50));
    /// # Ok::<(), tessera_core::MatrixError>(())
    /// ```
    pub fn resolve(
        user_ids: &[u64],
        item_ids: &[u64],
        explicit_num_users: Option<usize>,
        explicit_num_items: Option<usize>,
    ) -> Result<Self> {
        let num_rows = match explicit_num_users {
            Some(count) => count,
            None => axis_extent(user_ids, MatrixAxis::Users)?,
        };
        let num_cols = match explicit_num_items {
            Some(count) => count,
            None => axis_extent(item_ids, MatrixAxis::Items)?,
        };
        Ok(Self { num_rows, num_cols })
    }
}

/// Smallest extent that can address every identifier in `ids`.
fn axis_extent(ids: &[u64], axis: MatrixAxis) -> Result<usize> {
    let max = ids.iter().copied().max().ok_or(MatrixError::EmptyInput)?;
    usize::try_from(max)
        .ok()
        .and_then(|index| index.checked_add(1))
        .ok_or(MatrixError::ShapeOverflow {
            axis,
            id: max,
            bound: usize::MAX,
        })
}
