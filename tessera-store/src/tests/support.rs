use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, Int64Array, RecordBatch};
use tempfile::TempDir;

use crate::Container;

pub(crate) fn temp_container() -> (TempDir, Container) {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let container = Container::at(dir.path().join("ratings.tsr"));
    (dir, container)
}

/// Two-row batch whose contents identify the `tag` it was built with.
pub(crate) fn tagged_batch(tag: i64) -> RecordBatch {
    RecordBatch::try_from_iter([
        (
            "tag",
            Arc::new(Int64Array::from(vec![tag, tag + 1])) as ArrayRef,
        ),
        (
            "score",
            Arc::new(Float64Array::from(vec![0.5, 1.5])) as ArrayRef,
        ),
    ])
    .expect("tagged batch must construct")
}
