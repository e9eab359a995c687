use {
    crate::{HostResult, HostState, JsonDeExt, JsonSerExt, MemStorage, Response, Storage},
    omo_types::Addr,
    serde::{de::DeserializeOwned, Serialize},
};

static EMPTY_STORAGE: MemStorage = MemStorage::new();

/// Read-only access to the domain: contract queries, token and native
/// balances.
#[derive(Clone, Copy)]
pub struct Querier<'a> {
    host: &'a HostState,
}

impl<'a> Querier<'a> {
    pub(crate) fn new(host: &'a HostState) -> Self {
        Self { host }
    }

    pub fn query<M, R>(&self, contract: Addr, msg: &M) -> anyhow::Result<R>
    where
        M: Serialize,
        R: DeserializeOwned,
    {
        let res = self.host.query_contract(contract, &msg.to_json_vec()?)?;
        Ok(res.deserialize_json()?)
    }

    pub fn token_balance(&self, token: Addr, owner: Addr) -> HostResult<u128> {
        self.host.token_balance(token, owner)
    }

    pub fn allowance(&self, token: Addr, owner: Addr, spender: Addr) -> HostResult<u128> {
        self.host.allowance(token, owner, spender)
    }

    pub fn native_balance(&self, owner: Addr) -> u128 {
        self.host.native_balance(owner)
    }

    pub fn is_contract(&self, address: Addr) -> bool {
        self.host.is_contract(address)
    }
}

// -------------------------------- immutable ----------------------------------

pub struct ImmutableCtx<'a> {
    pub(crate) host: &'a HostState,
    pub contract: Addr,
}

impl<'a> ImmutableCtx<'a> {
    pub fn storage(&self) -> &'a dyn Storage {
        self.host
            .storages
            .get(&self.contract)
            .unwrap_or(&EMPTY_STORAGE)
    }

    pub fn querier(&self) -> Querier<'a> {
        Querier::new(self.host)
    }
}

// --------------------------------- mutable -----------------------------------

pub struct MutableCtx<'a> {
    pub(crate) host: &'a mut HostState,
    pub contract: Addr,
    pub sender: Addr,
    /// Native funds attached to the call, already credited to the contract.
    pub funds: u128,
}

impl MutableCtx<'_> {
    pub fn storage(&mut self) -> &mut dyn Storage {
        self.host.storages.entry(self.contract).or_default()
    }

    pub fn querier(&self) -> Querier<'_> {
        Querier::new(self.host)
    }

    /// Execute another contract, with this contract as the sender. An error
    /// aborts the whole transaction.
    pub fn call<M>(&mut self, contract: Addr, msg: &M, funds: u128) -> anyhow::Result<Response>
    where
        M: Serialize,
    {
        self.call_raw(contract, &msg.to_json_vec()?, funds)
    }

    pub fn call_raw(
        &mut self,
        contract: Addr,
        msg: &[u8],
        funds: u128,
    ) -> anyhow::Result<Response> {
        self.host
            .execute_contract(self.contract, contract, msg, funds)
    }

    /// Execute another contract, and undo all of its effects if it fails.
    /// The error is handed back instead of aborting the transaction.
    pub fn try_call_raw(
        &mut self,
        contract: Addr,
        msg: &[u8],
        funds: u128,
    ) -> anyhow::Result<Response> {
        let snapshot = self.host.clone();

        match self.call_raw(contract, msg, funds) {
            Ok(response) => Ok(response),
            Err(err) => {
                *self.host = snapshot;
                Err(err)
            },
        }
    }

    pub fn token_balance(&self, token: Addr, owner: Addr) -> HostResult<u128> {
        self.host.token_balance(token, owner)
    }

    /// Transfer tokens held by this contract.
    pub fn transfer_token(&mut self, token: Addr, to: Addr, amount: u128) -> HostResult<()> {
        self.host.transfer_token(token, self.contract, to, amount)
    }

    /// Transfer tokens out of `from`, using an allowance granted to this
    /// contract.
    pub fn transfer_token_from(
        &mut self,
        token: Addr,
        from: Addr,
        to: Addr,
        amount: u128,
    ) -> HostResult<()> {
        self.host
            .transfer_token_from(token, self.contract, from, to, amount)
    }

    pub fn approve_token(&mut self, token: Addr, spender: Addr, amount: u128) -> HostResult<()> {
        self.host
            .approve_token(token, self.contract, spender, amount)
    }

    /// Mint new tokens. Used by the mock token messenger and transmitter.
    pub fn mint_token(&mut self, token: Addr, to: Addr, amount: u128) -> HostResult<()> {
        self.host.mint_token(token, to, amount)
    }

    pub fn native_balance(&self, owner: Addr) -> u128 {
        self.host.native_balance(owner)
    }

    pub fn send_native(&mut self, to: Addr, amount: u128) -> HostResult<()> {
        self.host.send_native(self.contract, to, amount)
    }

    pub fn is_contract(&self, address: Addr) -> bool {
        self.host.is_contract(address)
    }
}
