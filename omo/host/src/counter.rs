use crate::{Item, StdError, StdResult, Storage};

/// A single number that is monotonically incremented by one.
///
/// Internally, this is an abstraction over an [`Item`](crate::Item).
pub struct Counter<'a> {
    item: Item<'a, u64>,
    base: u64,
}

impl<'a> Counter<'a> {
    pub const fn new(storage_key: &'a str, base: u64) -> Self {
        Self {
            item: Item::new(storage_key),
            base,
        }
    }

    /// Load the current counter value.
    pub fn current(&self, storage: &dyn Storage) -> StdResult<u64> {
        self.item
            .may_load(storage)
            .map(|maybe_value| maybe_value.unwrap_or(self.base))
    }

    /// Increment the value by one; return the values before and after
    /// incrementing.
    pub fn increment(&self, storage: &mut dyn Storage) -> StdResult<(u64, u64)> {
        let old_value = self.current(storage)?;
        let new_value = old_value.checked_add(1).ok_or_else(|| StdError::Overflow {
            key: String::from_utf8_lossy(self.item.storage_key()).into_owned(),
        })?;

        self.item.save(storage, &new_value)?;

        Ok((old_value, new_value))
    }
}

// ----------------------------------- tests -----------------------------------
