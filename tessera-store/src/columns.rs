//! Typed column extraction from container blocks.
//!
//! Identifier columns may arrive as any Arrow integer width (other writers,
//! pandas exports, and older containers all differ); ratings as floats or
//! integers. Anything else is rejected rather than coerced.

use arrow_array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, RecordBatch, UInt32Array,
    UInt64Array,
};
use arrow_schema::DataType;

use crate::errors::ContainerError;

/// Reads a non-negative identifier column as `u64` values.
pub(crate) fn id_column(batch: &RecordBatch, column: &str) -> Result<Vec<u64>, ContainerError> {
    let array = column_array(batch, column)?;
    ensure_no_nulls(array, column)?;
    match array.data_type() {
        DataType::UInt64 => Ok(downcast::<UInt64Array>(array, column)?.values().to_vec()),
        DataType::UInt32 => Ok(downcast::<UInt32Array>(array, column)?
            .values()
            .iter()
            .map(|&value| u64::from(value))
            .collect()),
        DataType::Int64 => signed_ids(downcast::<Int64Array>(array, column)?.values(), column),
        DataType::Int32 => signed_ids(
            &downcast::<Int32Array>(array, column)?
                .values()
                .iter()
                .map(|&value| i64::from(value))
                .collect::<Vec<_>>(),
            column,
        ),
        other => Err(ContainerError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

/// Reads a numeric ratings column as `f64` values.
#[expect(clippy::cast_precision_loss, reason = "ratings are small numbers")]
pub(crate) fn rating_column(
    batch: &RecordBatch,
    column: &str,
) -> Result<Vec<f64>, ContainerError> {
    let array = column_array(batch, column)?;
    ensure_no_nulls(array, column)?;
    match array.data_type() {
        DataType::Float64 => Ok(downcast::<Float64Array>(array, column)?.values().to_vec()),
        DataType::Float32 => Ok(downcast::<Float32Array>(array, column)?
            .values()
            .iter()
            .map(|&value| f64::from(value))
            .collect()),
        DataType::Int64 => Ok(downcast::<Int64Array>(array, column)?
            .values()
            .iter()
            .map(|&value| value as f64)
            .collect()),
        DataType::Int32 => Ok(downcast::<Int32Array>(array, column)?
            .values()
            .iter()
            .map(|&value| f64::from(value))
            .collect()),
        other => Err(ContainerError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

fn column_array<'a>(
    batch: &'a RecordBatch,
    column: &str,
) -> Result<&'a dyn Array, ContainerError> {
    batch
        .column_by_name(column)
        .map(AsRef::as_ref)
        .ok_or_else(|| ContainerError::ColumnNotFound {
            column: column.to_owned(),
        })
}

fn downcast<'a, T: Array + 'static>(
    array: &'a dyn Array,
    column: &str,
) -> Result<&'a T, ContainerError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ContainerError::InvalidColumnType {
            column: column.to_owned(),
            actual: array.data_type().clone(),
        })
}

fn ensure_no_nulls(array: &dyn Array, column: &str) -> Result<(), ContainerError> {
    if array.null_count() > 0 {
        let row = (0..array.len()).find(|&index| array.is_null(index)).unwrap_or(0);
        return Err(ContainerError::NullValue {
            column: column.to_owned(),
            row,
        });
    }
    Ok(())
}

fn signed_ids(values: &[i64], column: &str) -> Result<Vec<u64>, ContainerError> {
    values
        .iter()
        .enumerate()
        .map(|(row, &value)| {
            u64::try_from(value).map_err(|_| ContainerError::NegativeId {
                column: column.to_owned(),
                row,
            })
        })
        .collect()
}
