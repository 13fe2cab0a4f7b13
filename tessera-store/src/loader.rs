//! Interaction and metadata block helpers.
//!
//! The metadata block lets a container carry its matrix shape explicitly, so
//! reloading reproduces the exact dimensions even when the stored identifier
//! range has gaps or a nonzero minimum. Without it, the loader falls back to
//! inferring the shape from the identifier columns themselves.

use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use tracing::debug;

use tessera_core::{Interactions, MatrixBuilder, RatingsMatrix, ShapeSpec};

use crate::{
    columns::{id_column, rating_column},
    container::Container,
    errors::ContainerError,
};

/// Conventional key of the interaction table block.
pub const INTERACTIONS_KEY: &str = "interactions";
/// Key of the optional shape metadata block.
pub const META_KEY: &str = "meta";
/// Row-count field of the metadata block.
pub const META_NUM_USERS: &str = "num_users";
/// Column-count field of the metadata block.
pub const META_NUM_ITEMS: &str = "num_items";

/// Caller-supplied column names of an interactions block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InteractionColumns<'a> {
    /// Name of the user identifier column.
    pub user: &'a str,
    /// Name of the item identifier column.
    pub item: &'a str,
    /// Name of the ratings column.
    pub rating: &'a str,
}

impl Default for InteractionColumns<'static> {
    fn default() -> Self {
        Self {
            user: "user_id",
            item: "item_id",
            rating: "rating",
        }
    }
}

/// Writes an interaction set as a block of `key`, with the identifier
/// columns encoded as `UInt64` and ratings as `Float64`.
///
/// # Errors
/// Returns any container or Parquet error from the underlying write.
pub fn write_interactions(
    container: &Container,
    key: &str,
    columns: &InteractionColumns<'_>,
    interactions: &Interactions,
) -> Result<(), ContainerError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(columns.user, DataType::UInt64, false),
        Field::new(columns.item, DataType::UInt64, false),
        Field::new(columns.rating, DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(UInt64Array::from(interactions.user_ids().to_vec())) as ArrayRef,
            Arc::new(UInt64Array::from(interactions.item_ids().to_vec())),
            Arc::new(Float64Array::from(interactions.ratings().to_vec())),
        ],
    )?;
    container.write_block(&batch, key)
}

/// Reads an interaction set back from the block under `key`.
///
/// Accepts any supported integer width for the identifier columns and any
/// supported numeric type for ratings, so containers written by other tools
/// reload as long as the column names match.
///
/// # Errors
/// Returns [`ContainerError::BlockNotFound`] when the key is absent,
/// [`ContainerError::ColumnNotFound`] or
/// [`ContainerError::InvalidColumnType`] when a named column is missing or
/// untyped for its role, and [`ContainerError::NegativeId`] for signed
/// identifier columns holding negative values.
pub fn read_interactions(
    container: &Container,
    key: &str,
    columns: &InteractionColumns<'_>,
) -> Result<Interactions, ContainerError> {
    let batch = container.read_block(key)?;
    let user_ids = id_column(&batch, columns.user)?;
    let item_ids = id_column(&batch, columns.item)?;
    let ratings = rating_column(&batch, columns.rating)?;
    Ok(Interactions::try_new(user_ids, item_ids, ratings)?)
}

/// Writes the one-row shape metadata block under [`META_KEY`].
///
/// # Errors
/// Returns any container or Parquet error from the underlying write.
pub fn write_meta(container: &Container, shape: ShapeSpec) -> Result<(), ContainerError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(META_NUM_USERS, DataType::UInt64, false),
        Field::new(META_NUM_ITEMS, DataType::UInt64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(UInt64Array::from(vec![shape.num_rows as u64])) as ArrayRef,
            Arc::new(UInt64Array::from(vec![shape.num_cols as u64])),
        ],
    )?;
    container.write_block(&batch, META_KEY)
}

/// Reads the shape metadata block, or `None` when the container has none.
///
/// # Errors
/// Returns [`ContainerError::MalformedMeta`] when the block exists but does
/// not hold exactly one row, and column errors when its fields are missing
/// or mistyped. A missing block is not an error.
pub fn read_meta(container: &Container) -> Result<Option<ShapeSpec>, ContainerError> {
    let batch = match container.read_block(META_KEY) {
        Ok(batch) => batch,
        Err(ContainerError::BlockNotFound { .. }) => return Ok(None),
        Err(err) => return Err(err),
    };
    if batch.num_rows() != 1 {
        return Err(ContainerError::MalformedMeta {
            rows: batch.num_rows(),
        });
    }
    let num_rows = meta_field(&batch, META_NUM_USERS)?;
    let num_cols = meta_field(&batch, META_NUM_ITEMS)?;
    Ok(Some(ShapeSpec::new(num_rows, num_cols)))
}

fn meta_field(batch: &RecordBatch, column: &str) -> Result<usize, ContainerError> {
    let values = id_column(batch, column)?;
    let value = values
        .first()
        .copied()
        .ok_or(ContainerError::MalformedMeta { rows: 0 })?;
    usize::try_from(value).map_err(|_| ContainerError::Corrupt {
        reason: format!("meta field `{column}` exceeds the host pointer width"),
    })
}

/// Reconstructs a ratings matrix from a container.
///
/// The shape comes from the `meta` block when present; otherwise it is
/// inferred by scanning the interaction identifier columns, exactly as
/// [`ShapeSpec::resolve`] would at first construction.
///
/// # Errors
/// Returns the same errors as [`read_interactions`] and [`read_meta`], plus
/// any [`tessera_core::MatrixError`] from shape resolution or the build.
pub fn load_matrix(
    container: &Container,
    key: &str,
    columns: &InteractionColumns<'_>,
    builder: MatrixBuilder,
) -> Result<RatingsMatrix, ContainerError> {
    let interactions = read_interactions(container, key, columns)?;
    let (shape, from_meta) = match read_meta(container)? {
        Some(shape) => (shape, true),
        None => (
            ShapeSpec::resolve(interactions.user_ids(), interactions.item_ids(), None, None)?,
            false,
        ),
    };
    debug!(
        num_rows = shape.num_rows,
        num_cols = shape.num_cols,
        from_meta,
        "resolved matrix shape from container"
    );
    Ok(builder.build(&interactions, shape)?)
}
