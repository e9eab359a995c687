use {
    crate::{HostError, ImmutableCtx, JsonDeExt, MutableCtx, Response},
    omo_types::Empty,
    serde::de::DeserializeOwned,
    std::{marker::PhantomData, sync::Arc},
};

/// The entry points of a contract. Messages are JSON-encoded.
pub trait Contract: Send + Sync {
    fn instantiate(&self, ctx: MutableCtx, msg: &[u8]) -> anyhow::Result<Response>;

    fn execute(&self, ctx: MutableCtx, msg: &[u8]) -> anyhow::Result<Response>;

    fn query(&self, ctx: ImmutableCtx, msg: &[u8]) -> anyhow::Result<Vec<u8>>;
}

pub type InstantiateFn<M> = fn(MutableCtx, M) -> anyhow::Result<Response>;

pub type ExecuteFn<M> = fn(MutableCtx, M) -> anyhow::Result<Response>;

pub type QueryFn<M> = fn(ImmutableCtx, M) -> anyhow::Result<Vec<u8>>;

// ---------------------------------- builder ----------------------------------

/// Assembles typed entry point functions into a [`Contract`].
pub struct ContractBuilder<M1, M2 = Empty, M3 = Empty> {
    instantiate_fn: InstantiateFn<M1>,
    execute_fn: Option<ExecuteFn<M2>>,
    query_fn: Option<QueryFn<M3>>,
}

impl<M1> ContractBuilder<M1>
where
    M1: DeserializeOwned + 'static,
{
    pub fn new(instantiate_fn: InstantiateFn<M1>) -> Self {
        Self {
            instantiate_fn,
            execute_fn: None,
            query_fn: None,
        }
    }
}

impl<M1, M2, M3> ContractBuilder<M1, M2, M3>
where
    M1: DeserializeOwned + 'static,
    M2: DeserializeOwned + 'static,
    M3: DeserializeOwned + 'static,
{
    pub fn with_execute<M2A>(self, execute_fn: ExecuteFn<M2A>) -> ContractBuilder<M1, M2A, M3>
    where
        M2A: DeserializeOwned + 'static,
    {
        ContractBuilder {
            instantiate_fn: self.instantiate_fn,
            execute_fn: Some(execute_fn),
            query_fn: self.query_fn,
        }
    }

    pub fn with_query<M3A>(self, query_fn: QueryFn<M3A>) -> ContractBuilder<M1, M2, M3A>
    where
        M3A: DeserializeOwned + 'static,
    {
        ContractBuilder {
            instantiate_fn: self.instantiate_fn,
            execute_fn: self.execute_fn,
            query_fn: Some(query_fn),
        }
    }

    pub fn build(self) -> Arc<dyn Contract> {
        Arc::new(ContractImpl {
            instantiate_fn: self.instantiate_fn,
            execute_fn: self.execute_fn,
            query_fn: self.query_fn,
            msgs: PhantomData,
        })
    }
}

// ----------------------------------- impl ------------------------------------

struct ContractImpl<M1, M2, M3> {
    instantiate_fn: InstantiateFn<M1>,
    execute_fn: Option<ExecuteFn<M2>>,
    query_fn: Option<QueryFn<M3>>,
    msgs: PhantomData<fn() -> (M1, M2, M3)>,
}

impl<M1, M2, M3> Contract for ContractImpl<M1, M2, M3>
where
    M1: DeserializeOwned + 'static,
    M2: DeserializeOwned + 'static,
    M3: DeserializeOwned + 'static,
{
    fn instantiate(&self, ctx: MutableCtx, msg: &[u8]) -> anyhow::Result<Response> {
        let msg = msg.deserialize_json().map_err(HostError::from)?;

        (self.instantiate_fn)(ctx, msg)
    }

    fn execute(&self, ctx: MutableCtx, msg: &[u8]) -> anyhow::Result<Response> {
        let Some(execute_fn) = &self.execute_fn else {
            return Err(HostError::FunctionNotFound { name: "execute" }.into());
        };

        let msg = msg.deserialize_json().map_err(HostError::from)?;

        execute_fn(ctx, msg)
    }

    fn query(&self, ctx: ImmutableCtx, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        let Some(query_fn) = &self.query_fn else {
            return Err(HostError::FunctionNotFound { name: "query" }.into());
        };

        let msg = msg.deserialize_json().map_err(HostError::from)?;

        query_fn(ctx, msg)
    }
}
