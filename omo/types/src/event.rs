use {
    crate::Addr,
    serde::{de::DeserializeOwned, Deserialize, Serialize},
};

/// An event type that a contract may emit, identified by a fixed name.
pub trait TypedEvent: Serialize + DeserializeOwned {
    const NAME: &'static str;
}

/// Implement [`TypedEvent`](crate::TypedEvent) for a struct.
#[macro_export]
macro_rules! event {
    ($ty:ty, $name:literal) => {
        impl $crate::TypedEvent for $ty {
            const NAME: &'static str = $name;
        }
    };
}

/// An event as recorded in the host's event log: the emitting contract, the
/// event name, and the JSON-encoded body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractEvent {
    pub contract: Addr,
    pub ty: String,
    pub data: Vec<u8>,
}

impl ContractEvent {
    pub fn new<E>(contract: Addr, event: &E) -> serde_json::Result<Self>
    where
        E: TypedEvent,
    {
        Ok(Self {
            contract,
            ty: E::NAME.to_string(),
            data: serde_json::to_vec(event)?,
        })
    }

    /// Interpret the event as the given type, if the names match.
    pub fn as_typed<E>(&self) -> Option<E>
    where
        E: TypedEvent,
    {
        if self.ty != E::NAME {
            return None;
        }

        serde_json::from_slice(&self.data).ok()
    }
}

/// Search an event log for events of a given type.
pub trait SearchEvent {
    fn search_event<E>(&self) -> Vec<E>
    where
        E: TypedEvent;
}

impl SearchEvent for [ContractEvent] {
    fn search_event<E>(&self) -> Vec<E>
    where
        E: TypedEvent,
    {
        self.iter().filter_map(ContractEvent::as_typed).collect()
    }
}

impl SearchEvent for Vec<ContractEvent> {
    fn search_event<E>(&self) -> Vec<E>
    where
        E: TypedEvent,
    {
        self.as_slice().search_event()
    }
}
