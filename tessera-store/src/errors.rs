//! Error types for container persistence and reloading.

use arrow_schema::{ArrowError, DataType};
use tessera_core::MatrixError;
use thiserror::Error;

/// An error produced while writing, reading, or interpreting a container.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The requested block key is not present in the container index.
    #[error("block `{key}` not found in container")]
    BlockNotFound {
        /// The key that was requested.
        key: String,
    },
    /// The file does not start with the container magic.
    #[error("not a tessera container (bad magic)")]
    BadMagic,
    /// The container's index or footer is malformed.
    #[error("container is corrupt: {reason}")]
    Corrupt {
        /// Human-readable description of the inconsistency.
        reason: String,
    },
    /// A required column is missing from a block's schema.
    #[error("column `{column}` not found in block schema")]
    ColumnNotFound {
        /// The caller-supplied column name.
        column: String,
    },
    /// A column's Arrow type is not supported for its role.
    #[error("column `{column}` has unsupported type {actual:?}")]
    InvalidColumnType {
        /// The caller-supplied column name.
        column: String,
        /// The Arrow type actually found.
        actual: DataType,
    },
    /// An identifier column held a negative value.
    #[error("column `{column}` holds a negative identifier at row {row}")]
    NegativeId {
        /// The caller-supplied column name.
        column: String,
        /// Row of the first negative identifier.
        row: usize,
    },
    /// A column held a null where a value is required.
    #[error("column `{column}` holds a null at row {row}")]
    NullValue {
        /// The caller-supplied column name.
        column: String,
        /// Row of the first null.
        row: usize,
    },
    /// The metadata block did not hold exactly one row.
    #[error("meta block must hold exactly one row, found {rows}")]
    MalformedMeta {
        /// Number of rows actually found.
        rows: usize,
    },
    /// A matrix operation failed while reconstructing from the container.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// An Arrow operation failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// A Parquet encode or decode failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// The container index could not be serialized or parsed.
    #[error("index error: {0}")]
    Index(#[from] serde_json::Error),
    /// A filesystem operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
