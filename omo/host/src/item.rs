use {
    crate::{
        storage::{decode, encode},
        StdError, StdResult, Storage,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    std::marker::PhantomData,
};

/// A single value stored under a fixed key.
pub struct Item<'a, T> {
    storage_key: &'a [u8],
    data: PhantomData<T>,
}

impl<'a, T> Item<'a, T> {
    pub const fn new(storage_key: &'a str) -> Self {
        Self {
            storage_key: storage_key.as_bytes(),
            data: PhantomData,
        }
    }

    pub fn storage_key(&self) -> &[u8] {
        self.storage_key
    }
}

impl<T> Item<'_, T>
where
    T: BorshSerialize + BorshDeserialize,
{
    pub fn exists(&self, storage: &dyn Storage) -> bool {
        storage.read(self.storage_key).is_some()
    }

    pub fn may_load(&self, storage: &dyn Storage) -> StdResult<Option<T>> {
        storage
            .read(self.storage_key)
            .map(|val| decode(&val))
            .transpose()
    }

    pub fn load(&self, storage: &dyn Storage) -> StdResult<T> {
        storage
            .read(self.storage_key)
            .ok_or_else(|| StdError::data_not_found::<T>(self.storage_key))
            .and_then(|val| decode(&val))
    }

    pub fn save(&self, storage: &mut dyn Storage, data: &T) -> StdResult<()> {
        let data_raw = encode(data)?;
        storage.write(self.storage_key, &data_raw);
        Ok(())
    }

    pub fn remove(&self, storage: &mut dyn Storage) {
        storage.remove(self.storage_key);
    }

    pub fn update<F, E>(&self, storage: &mut dyn Storage, action: F) -> Result<T, E>
    where
        F: FnOnce(T) -> Result<T, E>,
        E: From<StdError>,
    {
        let data = action(self.load(storage)?)?;

        self.save(storage, &data)?;

        Ok(data)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::MemStorage};

    #[derive(BorshSerialize, BorshDeserialize, PartialEq, Debug)]
    struct Config {
        owner: String,
        threshold: u32,
    }

    const CONFIG: Item<Config> = Item::new("config");

    #[test]
    fn save_load_remove() {
        let mut storage = MemStorage::new();

        assert!(CONFIG.load(&storage).is_err());
        assert_eq!(CONFIG.may_load(&storage).unwrap(), None);

        let cfg = Config {
            owner: "larry".to_string(),
            threshold: 2,
        };
        CONFIG.save(&mut storage, &cfg).unwrap();

        assert!(CONFIG.exists(&storage));
        assert_eq!(CONFIG.load(&storage).unwrap(), cfg);

        CONFIG
            .update(&mut storage, |mut cfg| -> StdResult<_> {
                cfg.threshold += 1;
                Ok(cfg)
            })
            .unwrap();
        assert_eq!(CONFIG.load(&storage).unwrap().threshold, 3);

        CONFIG.remove(&mut storage);
        assert!(!CONFIG.exists(&storage));
    }
}
