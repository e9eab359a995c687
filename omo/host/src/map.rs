use {
    crate::{
        storage::{decode, encode, increment_last_byte, namespaced},
        MapKey, StdError, StdResult, Storage,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    std::marker::PhantomData,
};

pub struct Map<'a, K, T> {
    namespace: &'a [u8],
    key: PhantomData<K>,
    data: PhantomData<T>,
}

impl<'a, K, T> Map<'a, K, T> {
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace: namespace.as_bytes(),
            key: PhantomData,
            data: PhantomData,
        }
    }
}

impl<K, T> Map<'_, K, T>
where
    K: MapKey,
    T: BorshSerialize + BorshDeserialize,
{
    fn storage_key(&self, key: &K) -> Vec<u8> {
        namespaced(self.namespace, &key.to_key_bytes())
    }

    pub fn has(&self, storage: &dyn Storage, key: K) -> bool {
        storage.read(&self.storage_key(&key)).is_some()
    }

    pub fn may_load(&self, storage: &dyn Storage, key: K) -> StdResult<Option<T>> {
        storage
            .read(&self.storage_key(&key))
            .map(|val| decode(&val))
            .transpose()
    }

    pub fn load(&self, storage: &dyn Storage, key: K) -> StdResult<T> {
        let storage_key = self.storage_key(&key);
        storage
            .read(&storage_key)
            .ok_or_else(|| StdError::data_not_found::<T>(&storage_key))
            .and_then(|val| decode(&val))
    }

    pub fn save(&self, storage: &mut dyn Storage, key: K, data: &T) -> StdResult<()> {
        let data_raw = encode(data)?;
        storage.write(&self.storage_key(&key), &data_raw);
        Ok(())
    }

    pub fn remove(&self, storage: &mut dyn Storage, key: K) {
        storage.remove(&self.storage_key(&key));
    }

    /// Iterate records in ascending key order, starting after the given key.
    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        start_after: Option<K>,
    ) -> Box<dyn Iterator<Item = StdResult<(K, T)>> + 'b>
    where
        K: 'b,
        T: 'b,
    {
        let prefix = namespaced(self.namespace, &[]);
        let min = match start_after {
            // Appending a zero byte gives the smallest key after this one.
            Some(key) => {
                let mut min = self.storage_key(&key);
                min.push(0);
                min
            },
            None => prefix.clone(),
        };
        let max = increment_last_byte(&prefix);
        let prefix_len = prefix.len();

        Box::new(
            storage
                .scan(Some(&min), max.as_deref())
                .map(move |(k, v)| -> StdResult<(K, T)> {
                    Ok((K::from_key_bytes(&k[prefix_len..])?, decode(&v)?))
                }),
        )
    }

    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        start_after: Option<K>,
    ) -> Box<dyn Iterator<Item = StdResult<K>> + 'b>
    where
        K: 'b,
        T: 'b,
    {
        Box::new(self.range(storage, start_after).map(|res| res.map(|(k, _)| k)))
    }
}

// ----------------------------------- tests -----------------------------------
