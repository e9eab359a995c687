use {
    crate::{Map, MapKey, StdResult, Storage},
    omo_types::Empty,
};

/// Mimic the behavior of a `BTreeSet`.
///
/// Internally, this is basically a `Map<T, Empty>`.
pub struct Set<'a, T> {
    map: Map<'a, T, Empty>,
}

impl<'a, T> Set<'a, T> {
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            map: Map::new(namespace),
        }
    }
}

impl<T> Set<'_, T>
where
    T: MapKey,
{
    pub fn has(&self, storage: &dyn Storage, item: T) -> bool {
        self.map.has(storage, item)
    }

    pub fn insert(&self, storage: &mut dyn Storage, item: T) -> StdResult<()> {
        self.map.save(storage, item, &Empty {})
    }

    pub fn remove(&self, storage: &mut dyn Storage, item: T) {
        self.map.remove(storage, item)
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        start_after: Option<T>,
    ) -> Box<dyn Iterator<Item = StdResult<T>> + 'b>
    where
        T: 'b,
    {
        self.map.keys(storage, start_after)
    }
}
