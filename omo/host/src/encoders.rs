use {
    crate::{StdError, StdResult},
    serde::{de::DeserializeOwned, Serialize},
};

pub trait JsonSerExt {
    fn to_json_vec(&self) -> StdResult<Vec<u8>>;
}

impl<T> JsonSerExt for T
where
    T: Serialize,
{
    fn to_json_vec(&self) -> StdResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(StdError::serialize::<T>)
    }
}

pub trait JsonDeExt {
    fn deserialize_json<T>(&self) -> StdResult<T>
    where
        T: DeserializeOwned;
}

impl<B> JsonDeExt for B
where
    B: AsRef<[u8]> + ?Sized,
{
    fn deserialize_json<T>(&self) -> StdResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(self.as_ref()).map_err(StdError::deserialize::<T>)
    }
}
