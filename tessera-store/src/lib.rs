//! Tessera container store.
//!
//! Persists named tabular blocks (Arrow record batches encoded as Parquet)
//! inside a single footer-indexed container file, and reloads interaction
//! tables together with the shape their ratings matrix must be rebuilt at.

mod codec;
mod columns;
mod container;
mod errors;
mod loader;

pub use crate::{
    container::Container,
    errors::ContainerError,
    loader::{
        INTERACTIONS_KEY, InteractionColumns, META_KEY, META_NUM_ITEMS, META_NUM_USERS,
        load_matrix, read_interactions, read_meta, write_interactions, write_meta,
    },
};

#[cfg(test)]
mod tests;
