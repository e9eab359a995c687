use {
    crate::{JsonDeExt, JsonSerExt, StdResult},
    omo_types::TypedEvent,
    serde::{de::DeserializeOwned, Serialize},
};

/// What a contract returns from a successful `instantiate` or `execute` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    pub(crate) events: Vec<(&'static str, Vec<u8>)>,
    pub data: Option<Vec<u8>>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event<E>(mut self, event: E) -> StdResult<Self>
    where
        E: TypedEvent,
    {
        self.events.push((E::NAME, event.to_json_vec()?));
        Ok(self)
    }

    pub fn set_data<T>(mut self, data: &T) -> StdResult<Self>
    where
        T: Serialize,
    {
        self.data = Some(data.to_json_vec()?);
        Ok(self)
    }

    /// Interpret the returned data as the given type.
    pub fn data_as<T>(&self) -> StdResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.data.as_ref().map(|data| data.deserialize_json()).transpose()
    }
}
