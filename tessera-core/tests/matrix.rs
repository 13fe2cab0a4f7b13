//! Tests building ratings matrices from the canonical interaction fixtures.

use rstest::rstest;
use tessera_core::{
    DenseRatings, Interactions, MatrixBuilder, MatrixLayout, RatingsMatrix, ShapeSpec,
};
use tessera_test_support::fixtures;

fn build(interactions: &Interactions, layout: MatrixLayout) -> RatingsMatrix {
    let shape = ShapeSpec::resolve(interactions.user_ids(), interactions.item_ids(), None, None)
        .expect("fixture columns are non-empty");
    MatrixBuilder::new()
        .with_layout(layout)
        .build(interactions, shape)
        .expect("fixture records fit their resolved shape")
}

fn assert_rows(dense: &DenseRatings, expected: &[[f64; 10]; 6]) {
    assert_eq!(dense.shape(), ShapeSpec::new(6, 10));
    for (row, cells) in expected.iter().enumerate() {
        assert_eq!(
            dense.row(row),
            Some(&cells[..]),
            "row {row} differs from the fixture",
        );
    }
}

#[rstest]
#[case::dense(MatrixLayout::Dense)]
#[case::sparse(MatrixLayout::Sparse)]
fn canonical_records_build_the_fixture_matrix(#[case] layout: MatrixLayout) {
    let matrix = build(&fixtures::interactions(), layout);
    let dense = matrix.to_dense().expect("6x10 fits in memory");
    assert_rows(&dense, &fixtures::DENSE_ROWS);
}

#[rstest]
#[case::dense(MatrixLayout::Dense)]
#[case::sparse(MatrixLayout::Sparse)]
fn missing_item_id_leaves_its_column_zero(#[case] layout: MatrixLayout) {
    // Item 7 never occurs, but item 9 still pins the width to 10; column 7
    // stays addressable and entirely zero.
    let matrix = build(&fixtures::interactions_with_missing_item(), layout);
    assert_eq!(matrix.shape(), ShapeSpec::new(6, 10));
    for row in 0..6 {
        assert_eq!(matrix.get(row, 7), Some(0.0), "column 7 must be zero");
    }
    let dense = matrix.to_dense().expect("6x10 fits in memory");
    assert_rows(&dense, &fixtures::DENSE_ROWS_MISSING_ITEM);
}

#[rstest]
#[case::users(1, 0)]
#[case::items(0, 1)]
#[case::both(1, 1)]
fn nonzero_minimum_ids_keep_leading_rows_and_columns(
    #[case] user_offset: u64,
    #[case] item_offset: u64,
) {
    let interactions = fixtures::interactions_starting_at(user_offset, item_offset);
    let matrix = build(&interactions, MatrixLayout::Dense);
    let shape = matrix.shape();
    assert_eq!(shape.num_rows, 6 + usize::try_from(user_offset).expect("small offset"));
    assert_eq!(shape.num_cols, 10 + usize::try_from(item_offset).expect("small offset"));

    if user_offset > 0 {
        for col in 0..shape.num_cols {
            assert_eq!(matrix.get(0, col), Some(0.0), "leading row must be zero");
        }
    }
    if item_offset > 0 {
        for row in 0..shape.num_rows {
            assert_eq!(matrix.get(row, 0), Some(0.0), "leading column must be zero");
        }
    }
    // The shifted cells carry the original values.
    let row = usize::try_from(user_offset).expect("small offset");
    let col = 1 + usize::try_from(item_offset).expect("small offset");
    assert_eq!(matrix.get(row, col), Some(1.0));
}

#[rstest]
fn dense_and_sparse_builds_are_logically_identical() {
    let dense = build(&fixtures::interactions(), MatrixLayout::Dense);
    let sparse = build(&fixtures::interactions(), MatrixLayout::Sparse);
    assert_eq!(dense.shape(), sparse.shape());
    assert_eq!(dense.nnz(), sparse.nnz());
    assert_eq!(
        dense.to_dense().expect("6x10 fits in memory"),
        sparse.to_dense().expect("6x10 fits in memory"),
    );
}

#[rstest]
fn repeated_builds_are_deterministic() {
    let first = build(&fixtures::interactions(), MatrixLayout::Sparse);
    let second = build(&fixtures::interactions(), MatrixLayout::Sparse);
    assert_eq!(first, second);
}
