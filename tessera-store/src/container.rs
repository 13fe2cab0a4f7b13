//! Footer-indexed single-file block container.
//!
//! File layout, data-first:
//! ```text
//! [magic]
//! [Parquet blobs for all blocks]
//! [index: JSON table of contents listing keys, offsets, lengths]
//! [footer: index_offset (u64 LE) + index_len (u64 LE) + magic]
//! ```
//!
//! A write appends the new blob over the superseded index region, then
//! rewrites the index and footer behind it; committed blobs are never
//! touched, and the footer write is the commit point. Re-pointing an
//! existing key leaves its old blob behind as dead space.

use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use arrow_array::RecordBatch;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    codec::{decode_block, encode_block},
    errors::ContainerError,
};

const MAGIC: [u8; 4] = *b"TSR1";
const HEADER_LEN: u64 = MAGIC.len() as u64;
/// Index offset (8) + index length (8) + magic (4).
const FOOTER_LEN: u64 = 20;

#[derive(Debug, Default, Deserialize, Serialize)]
struct ContainerIndex {
    blocks: Vec<BlockEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct BlockEntry {
    key: String,
    offset: u64,
    length: u64,
}

impl ContainerIndex {
    fn find(&self, key: &str) -> Option<&BlockEntry> {
        self.blocks.iter().find(|entry| entry.key == key)
    }

    /// Re-points an existing key or appends a new entry.
    fn upsert(&mut self, key: &str, offset: u64, length: u64) {
        if let Some(entry) = self.blocks.iter_mut().find(|entry| entry.key == key) {
            entry.offset = offset;
            entry.length = length;
        } else {
            self.blocks.push(BlockEntry {
                key: key.to_owned(),
                offset,
                length,
            });
        }
    }
}

/// Handle to one container file holding named tabular blocks.
///
/// Blocks are independent: writing one never disturbs the others, and the
/// store only ever appends blobs or re-points same-named keys. Callers must
/// serialize concurrent writes to the same path themselves.
///
/// # Examples
/// ```no_run
/// use arrow_array::{ArrayRef, Int64Array, RecordBatch};
/// use std::sync::Arc;
/// use tessera_store::Container;
///
/// let container = Container::at("ratings.tsr");
/// let batch = RecordBatch::try_from_iter([(
///     "user_id",
///     Arc::new(Int64Array::from(vec![0, 1])) as ArrayRef,
/// )])?;
/// container.write_block(&batch, "interactions")?;
/// assert_eq!(container.read_block("interactions")?, batch);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Container {
    path: PathBuf,
}

impl Container {
    /// Creates a handle for the container at `path`. The file itself is
    /// created lazily by the first write.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the container's file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `batch` under `key`, creating the file if absent and
    /// overwriting any existing block of the same key. All other blocks are
    /// left untouched.
    ///
    /// # Errors
    /// Returns [`ContainerError::BadMagic`] or [`ContainerError::Corrupt`]
    /// when the path holds something other than a well-formed container,
    /// and I/O, Parquet, or index errors from the write itself.
    pub fn write_block(&self, batch: &RecordBatch, key: &str) -> Result<(), ContainerError> {
        let blob = encode_block(batch)?;
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        let (mut index, blob_offset) = if file.metadata()?.len() == 0 {
            file.write_all(&MAGIC)?;
            (ContainerIndex::default(), HEADER_LEN)
        } else {
            read_index(&mut file)?
        };

        file.seek(SeekFrom::Start(blob_offset))?;
        file.write_all(&blob)?;
        index.upsert(key, blob_offset, blob.len() as u64);

        let index_offset = blob_offset + blob.len() as u64;
        let index_bytes = serde_json::to_vec(&index)?;
        file.write_all(&index_bytes)?;
        file.write_all(&index_offset.to_le_bytes())?;
        file.write_all(&(index_bytes.len() as u64).to_le_bytes())?;
        file.write_all(&MAGIC)?;
        // Drop anything left over from a longer superseded index.
        file.set_len(index_offset + index_bytes.len() as u64 + FOOTER_LEN)?;

        debug!(key, len = blob.len(), path = %self.path.display(), "wrote container block");
        Ok(())
    }

    /// Reads the block previously written under `key`.
    ///
    /// # Errors
    /// Returns [`ContainerError::BlockNotFound`] when the key is absent, and
    /// [`ContainerError::BadMagic`] or [`ContainerError::Corrupt`] when the
    /// file is not a well-formed container.
    pub fn read_block(&self, key: &str) -> Result<RecordBatch, ContainerError> {
        let mut file = File::open(&self.path)?;
        let (index, _) = read_index(&mut file)?;
        let entry = index
            .find(key)
            .ok_or_else(|| ContainerError::BlockNotFound {
                key: key.to_owned(),
            })?;

        file.seek(SeekFrom::Start(entry.offset))?;
        let length = usize::try_from(entry.length)
            .map_err(|_| corrupt("block length exceeds addressable memory"))?;
        let mut blob = vec![0_u8; length];
        file.read_exact(&mut blob)?;

        debug!(key, len = length, path = %self.path.display(), "read container block");
        decode_block(Bytes::from(blob))
    }

    /// Lists the block keys currently indexed, in first-write order.
    ///
    /// # Errors
    /// Returns the same errors as [`Container::read_block`] for malformed
    /// containers.
    pub fn keys(&self) -> Result<Vec<String>, ContainerError> {
        let mut file = File::open(&self.path)?;
        let (index, _) = read_index(&mut file)?;
        Ok(index.blocks.into_iter().map(|entry| entry.key).collect())
    }
}

/// Reads and validates the table of contents. Returns the index and its
/// offset, which doubles as the write position for the next blob.
fn read_index(file: &mut File) -> Result<(ContainerIndex, u64), ContainerError> {
    let total = file.metadata()?.len();
    if total < HEADER_LEN + FOOTER_LEN {
        return Err(corrupt("file too short for header and footer"));
    }

    let mut header = [0_u8; 4];
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut header)?;
    if header != MAGIC {
        return Err(ContainerError::BadMagic);
    }

    file.seek(SeekFrom::Start(total - FOOTER_LEN))?;
    let mut offset_bytes = [0_u8; 8];
    let mut len_bytes = [0_u8; 8];
    let mut magic_bytes = [0_u8; 4];
    file.read_exact(&mut offset_bytes)?;
    file.read_exact(&mut len_bytes)?;
    file.read_exact(&mut magic_bytes)?;
    if magic_bytes != MAGIC {
        return Err(corrupt("footer magic mismatch"));
    }

    let index_offset = u64::from_le_bytes(offset_bytes);
    let index_len = u64::from_le_bytes(len_bytes);
    if index_offset < HEADER_LEN
        || index_offset
            .checked_add(index_len)
            .and_then(|end| end.checked_add(FOOTER_LEN))
            .is_none_or(|end| end != total)
    {
        return Err(corrupt("index does not fit the file"));
    }

    file.seek(SeekFrom::Start(index_offset))?;
    let length = usize::try_from(index_len)
        .map_err(|_| corrupt("index length exceeds addressable memory"))?;
    let mut index_bytes = vec![0_u8; length];
    file.read_exact(&mut index_bytes)?;
    let index = serde_json::from_slice(&index_bytes)?;
    Ok((index, index_offset))
}

fn corrupt(reason: &str) -> ContainerError {
    ContainerError::Corrupt {
        reason: reason.to_owned(),
    }
}
