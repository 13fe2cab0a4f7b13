//! Parquet encoding and decoding of container blocks.

use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::ArrowError;
use arrow_select::concat::concat_batches;
use bytes::Bytes;
use parquet::arrow::{ArrowWriter, arrow_reader::ParquetRecordBatchReaderBuilder};

use crate::errors::ContainerError;

/// Serializes one record batch into a self-contained Parquet blob.
///
/// The Arrow schema travels inside the Parquet metadata, so names, dtypes,
/// and nullability survive the round trip exactly.
pub(crate) fn encode_block(batch: &RecordBatch) -> Result<Vec<u8>, ContainerError> {
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None)?;
        writer.write(batch)?;
        writer.close()?;
    }
    Ok(buffer)
}

/// Deserializes a Parquet blob back into a single record batch.
pub(crate) fn decode_block(blob: Bytes) -> Result<RecordBatch, ContainerError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(blob)?.build()?;
    let schema = reader.schema();
    // The reader may chunk large blocks; restore the one-table shape.
    let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, batches.iter())?)
}
