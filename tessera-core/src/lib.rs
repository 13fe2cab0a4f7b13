//! Tessera core library.
//!
//! Materializes column-aligned `(user_id, item_id, rating)` interaction
//! records into dense or sparse ratings matrices. Shape resolution is a
//! separate pure step so a single resolved [`ShapeSpec`] can be shared
//! across several builds (for example train and test record sets that must
//! agree on one global identifier space).

mod builder;
mod error;
mod interactions;
mod matrix;
mod shape;

pub use crate::{
    builder::{FillPolicy, MatrixBuilder, MatrixLayout},
    error::{MatrixAxis, MatrixError, Result},
    interactions::Interactions,
    matrix::{DenseRatings, RatingsMatrix, SparseRatings},
    shape::ShapeSpec,
};
