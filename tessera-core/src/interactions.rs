//! Column-aligned interaction records.

use crate::error::{MatrixError, Result};

/// An ordered set of `(user_id, item_id, rating)` records, stored as three
/// column-aligned sequences.
///
/// The set is transient input: builds consume it by reference and the
/// resulting matrix does not retain it.
///
/// # Examples
/// ```
/// use tessera_core::Interactions;
///
/// let interactions = Interactions::try_new(
///     vec![0, 0, 1],
///     vec![1, 2, 2],
///     vec![1.0, 1.0, 2.0],
/// )?;
/// assert_eq!(interactions.len(), 3);
/// # Ok::<(), tessera_core::MatrixError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interactions {
    user_ids: Vec<u64>,
    item_ids: Vec<u64>,
    ratings: Vec<f64>,
}

impl Interactions {
    /// Creates an interaction set after validating column alignment.
    ///
    /// An empty set is representable; shape inference over it fails instead.
    ///
    /// # Errors
    /// Returns [`MatrixError::LengthMismatch`] when the three columns have
    /// unequal lengths.
    pub fn try_new(user_ids: Vec<u64>, item_ids: Vec<u64>, ratings: Vec<f64>) -> Result<Self> {
        if user_ids.len() != item_ids.len() || user_ids.len() != ratings.len() {
            return Err(MatrixError::LengthMismatch {
                users: user_ids.len(),
                items: item_ids.len(),
                ratings: ratings.len(),
            });
        }
        Ok(Self {
            user_ids,
            item_ids,
            ratings,
        })
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.user_ids.len()
    }

    /// Returns whether the set contains no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }

    /// Returns the user identifier column.
    #[must_use]
    pub fn user_ids(&self) -> &[u64] {
        &self.user_ids
    }

    /// Returns the item identifier column.
    #[must_use]
    pub fn item_ids(&self) -> &[u64] {
        &self.item_ids
    }

    /// Returns the ratings column.
    #[must_use]
    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    /// Iterates records as `(user_id, item_id, rating)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64, f64)> + '_ {
        self.user_ids
            .iter()
            .zip(&self.item_ids)
            .zip(&self.ratings)
            .map(|((&user, &item), &rating)| (user, item, rating))
    }
}
