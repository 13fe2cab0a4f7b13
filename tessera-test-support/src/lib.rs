//! Shared test fixtures used across tessera crates.

pub mod fixtures {
    //! The canonical 12-record interaction set and its expected matrices.
    //!
    //! Every rating in the set is nonzero and every `(user, item)` pair is
    //! unique, so the dense and sparse builds must agree cell for cell.

    use tessera_core::{Interactions, ShapeSpec};

    /// User identifier column of the canonical record set.
    pub const USER_IDS: [u64; 12] = [0, 0, 1, 1, 2, 2, 2, 3, 3, 3, 4, 5];
    /// Item identifier column of the canonical record set.
    pub const ITEM_IDS: [u64; 12] = [1, 2, 2, 3, 4, 5, 6, 7, 8, 9, 0, 3];
    /// Ratings column of the canonical record set.
    pub const RATINGS: [f64; 12] = [
        1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.0,
    ];

    /// Shape the canonical set resolves to.
    pub const SHAPE: ShapeSpec = ShapeSpec::new(6, 10);

    /// Dense matrix the canonical set must build into.
    pub const DENSE_ROWS: [[f64; 10]; 6] = [
        [0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 4.0, 5.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 3.0, 4.0],
        [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ];

    /// Dense matrix for [`interactions_with_missing_item`]: item id 7 never
    /// occurs, so column 7 is structurally zero while the shape stays 6x10
    /// (item 9 still pins the column count).
    pub const DENSE_ROWS_MISSING_ITEM: [[f64; 10]; 6] = [
        [0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 4.0, 5.0, 1.0, 0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 4.0],
        [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ];

    /// Builds the canonical record set.
    ///
    /// # Panics
    /// Never; the fixture columns are equal-length by construction.
    #[must_use]
    pub fn interactions() -> Interactions {
        Interactions::try_new(USER_IDS.to_vec(), ITEM_IDS.to_vec(), RATINGS.to_vec())
            .expect("fixture columns are aligned")
    }

    /// The canonical set with every `item_id == 7` replaced by `0`, leaving
    /// a gap at item 7. Matches [`DENSE_ROWS_MISSING_ITEM`].
    ///
    /// # Panics
    /// Never; the fixture columns are equal-length by construction.
    #[must_use]
    pub fn interactions_with_missing_item() -> Interactions {
        let item_ids = ITEM_IDS
            .iter()
            .map(|&item| if item == 7 { 0 } else { item })
            .collect();
        Interactions::try_new(USER_IDS.to_vec(), item_ids, RATINGS.to_vec())
            .expect("fixture columns are aligned")
    }

    /// The canonical set with the identifier columns shifted up by the given
    /// offsets, leaving the leading rows and columns structurally zero.
    ///
    /// # Panics
    /// Never; the fixture columns are equal-length by construction.
    #[must_use]
    pub fn interactions_starting_at(user_offset: u64, item_offset: u64) -> Interactions {
        let user_ids = USER_IDS.iter().map(|&user| user + user_offset).collect();
        let item_ids = ITEM_IDS.iter().map(|&item| item + item_offset).collect();
        Interactions::try_new(user_ids, item_ids, RATINGS.to_vec())
            .expect("fixture columns are aligned")
    }
}
