//! Error types for the tessera core library.

use std::fmt;

use thiserror::Error;

/// Matrix axis an identifier indexes into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatrixAxis {
    /// Row axis, addressed by user identifiers.
    Users,
    /// Column axis, addressed by item identifiers.
    Items,
}

impl fmt::Display for MatrixAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => f.write_str("user"),
            Self::Items => f.write_str("item"),
        }
    }
}

/// An error produced while resolving shapes or building ratings matrices.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// No identifiers were available to infer a matrix dimension from.
    #[error("no interactions to infer a shape from")]
    EmptyInput,
    /// The three interaction columns had unequal lengths.
    #[error("column lengths differ: {users} user ids, {items} item ids, {ratings} ratings")]
    LengthMismatch {
        /// Length of the user identifier column.
        users: usize,
        /// Length of the item identifier column.
        items: usize,
        /// Length of the ratings column.
        ratings: usize,
    },
    /// An identifier addressed a cell outside the declared shape.
    #[error("{axis} id {id} exceeds the matrix bound {bound}")]
    ShapeOverflow {
        /// Axis the offending identifier indexes into.
        axis: MatrixAxis,
        /// The identifier that fell outside the shape.
        id: u64,
        /// The exclusive bound it had to stay below.
        bound: usize,
    },
    /// The dense cell count overflowed the host pointer width.
    #[error("matrix with {num_rows} rows and {num_cols} columns exceeds capacity limits")]
    CapacityOverflow {
        /// Requested row count.
        num_rows: usize,
        /// Requested column count.
        num_cols: usize,
    },
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MatrixError>;
