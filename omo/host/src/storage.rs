use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    std::{collections::BTreeMap, ops::Bound},
};

/// A key-value store, one per contract.
pub trait Storage {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn write(&mut self, key: &[u8], value: &[u8]);

    fn remove(&mut self, key: &[u8]);

    /// Iterate over records in ascending key order. `min` is inclusive, `max`
    /// is exclusive.
    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemStorage {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStorage {
    pub const fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Storage for MemStorage {
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.data.insert(key.to_vec(), value.to_vec());
    }

    fn remove(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a> {
        let min = min.map_or(Bound::Unbounded, |min| Bound::Included(min.to_vec()));
        let max = max.map_or(Bound::Unbounded, |max| Bound::Excluded(max.to_vec()));

        // `BTreeMap::range` panics if the lower bound is above the upper one.
        if let (Bound::Included(min), Bound::Excluded(max)) = (&min, &max) {
            if min >= max {
                return Box::new(std::iter::empty());
            }
        }

        Box::new(
            self.data
                .range::<Vec<u8>, _>((min, max))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}

// ----------------------------------- codec -----------------------------------

pub(crate) fn encode<T>(data: &T) -> StdResult<Vec<u8>>
where
    T: BorshSerialize,
{
    borsh::to_vec(data).map_err(StdError::serialize::<T>)
}

pub(crate) fn decode<T>(data: &[u8]) -> StdResult<T>
where
    T: BorshDeserialize,
{
    borsh::from_slice(data).map_err(StdError::deserialize::<T>)
}

// ----------------------------------- utils -----------------------------------

/// Prefix a key with the length-prefixed namespace, so that keys under
/// different namespaces never collide.
pub(crate) fn namespaced(namespace: &[u8], key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(namespace.len() + key.len() + 2);
    out.extend_from_slice(&(namespace.len() as u16).to_be_bytes());
    out.extend_from_slice(namespace);
    out.extend_from_slice(key);
    out
}

/// The smallest byte string greater than every string starting with `prefix`.
/// `None` if no such string exists, i.e. the prefix is all `0xff`.
pub(crate) fn increment_last_byte(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut out = prefix.to_vec();
    while let Some(last) = out.pop() {
        if last < u8::MAX {
            out.push(last + 1);
            return Some(out);
        }
    }
    None
}

// ----------------------------------- tests -----------------------------------
