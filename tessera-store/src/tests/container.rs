use std::sync::Arc;

use arrow_array::{
    ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, RecordBatch, UInt32Array,
};
use rstest::rstest;

use super::support::{tagged_batch, temp_container};
use crate::ContainerError;

fn mixed_dtype_batch() -> RecordBatch {
    RecordBatch::try_from_iter([
        (
            "i64",
            Arc::new(Int64Array::from(vec![3, 1, 2])) as ArrayRef,
        ),
        ("i32", Arc::new(Int32Array::from(vec![9, 8, 7])) as ArrayRef),
        (
            "u32",
            Arc::new(UInt32Array::from(vec![0, 1, 2])) as ArrayRef,
        ),
        (
            "f32",
            Arc::new(Float32Array::from(vec![0.5, 1.5, 2.5])) as ArrayRef,
        ),
        (
            "f64",
            Arc::new(Float64Array::from(vec![5.0, 4.0, 3.0])) as ArrayRef,
        ),
    ])
    .expect("mixed batch must construct")
}

#[rstest]
fn round_trip_preserves_columns_dtypes_and_row_order() {
    let (_dir, container) = temp_container();
    let batch = mixed_dtype_batch();
    container
        .write_block(&batch, "interactions")
        .expect("write must succeed");
    let read = container
        .read_block("interactions")
        .expect("read must succeed");
    assert_eq!(read, batch);
}

#[rstest]
fn missing_block_is_reported_by_key() {
    let (_dir, container) = temp_container();
    container
        .write_block(&tagged_batch(1), "interactions")
        .expect("write must succeed");
    let err = container
        .read_block("meta")
        .expect_err("absent key must fail");
    assert!(matches!(err, ContainerError::BlockNotFound { key } if key == "meta"));
}

#[rstest]
fn blocks_are_independent() {
    let (_dir, container) = temp_container();
    let first = tagged_batch(1);
    let second = tagged_batch(100);
    container
        .write_block(&first, "interactions")
        .expect("first write must succeed");
    container
        .write_block(&second, "meta")
        .expect("second write must succeed");

    assert_eq!(
        container.read_block("interactions").expect("read first"),
        first,
    );
    assert_eq!(container.read_block("meta").expect("read second"), second);
    assert_eq!(
        container.keys().expect("keys must be listable"),
        vec!["interactions".to_owned(), "meta".to_owned()],
    );
}

#[rstest]
fn overwriting_a_key_leaves_other_blocks_untouched() {
    let (_dir, container) = temp_container();
    let original = tagged_batch(1);
    let bystander = tagged_batch(50);
    let replacement = tagged_batch(99);
    container
        .write_block(&original, "interactions")
        .expect("write must succeed");
    container
        .write_block(&bystander, "meta")
        .expect("write must succeed");
    container
        .write_block(&replacement, "interactions")
        .expect("overwrite must succeed");

    assert_eq!(
        container.read_block("interactions").expect("read replaced"),
        replacement,
    );
    assert_eq!(
        container.read_block("meta").expect("read bystander"),
        bystander,
    );
    // Overwriting re-points the key; it does not grow the key list.
    assert_eq!(container.keys().expect("keys").len(), 2);
}

#[rstest]
fn rejects_files_without_the_container_magic() {
    let (_dir, container) = temp_container();
    std::fs::write(container.path(), vec![0xAB_u8; 64]).expect("junk file must be writable");
    let err = container
        .read_block("interactions")
        .expect_err("junk must be rejected");
    assert!(matches!(err, ContainerError::BadMagic));
}

#[rstest]
fn rejects_truncated_containers() {
    let (_dir, container) = temp_container();
    std::fs::write(container.path(), b"TSR1\x00\x00").expect("stub file must be writable");
    let err = container
        .read_block("interactions")
        .expect_err("truncated file must be rejected");
    assert!(matches!(err, ContainerError::Corrupt { .. }));
}

#[rstest]
fn first_write_initializes_an_existing_empty_file() {
    let (_dir, container) = temp_container();
    std::fs::File::create(container.path()).expect("empty file must be creatable");
    let batch = tagged_batch(7);
    container
        .write_block(&batch, "interactions")
        .expect("write into empty file must succeed");
    assert_eq!(
        container.read_block("interactions").expect("read"),
        batch,
    );
}

#[rstest]
fn reading_a_missing_file_is_an_io_error() {
    let (_dir, container) = temp_container();
    let err = container
        .read_block("interactions")
        .expect_err("missing file must fail");
    assert!(matches!(err, ContainerError::Io(_)));
}
