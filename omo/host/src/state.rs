use {
    crate::{
        Contract, HostError, HostResult, ImmutableCtx, MemStorage, MutableCtx, Response, StdError,
    },
    omo_types::{
        token::{Approval, NativeTransfer, Transfer},
        Addr, ContractEvent, TypedEvent,
    },
    std::{collections::BTreeMap, sync::Arc},
};

/// Nested calls deeper than this are rejected.
pub const MAX_CALL_DEPTH: usize = 16;

#[derive(Clone)]
pub(crate) struct ContractInfo {
    pub code: Arc<dyn Contract>,
    pub label: String,
}

/// An ERC20-style fungible token ledger.
#[derive(Debug, Default, Clone)]
pub struct TokenLedger {
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: u128,
    balances: BTreeMap<Addr, u128>,
    allowances: BTreeMap<(Addr, Addr), u128>,
}

impl TokenLedger {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            ..Default::default()
        }
    }

    pub fn balance_of(&self, owner: Addr) -> u128 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: Addr, spender: Addr) -> u128 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(0)
    }
}

/// The complete state of a domain. Cloned to take a snapshot; restoring the
/// snapshot reverts everything, including the event log.
#[derive(Clone, Default)]
pub struct HostState {
    pub(crate) contracts: BTreeMap<Addr, ContractInfo>,
    pub(crate) storages: BTreeMap<Addr, MemStorage>,
    pub(crate) tokens: BTreeMap<Addr, TokenLedger>,
    pub(crate) natives: BTreeMap<Addr, u128>,
    pub(crate) events: Vec<ContractEvent>,
    pub(crate) depth: usize,
}

impl HostState {
    pub fn is_contract(&self, address: Addr) -> bool {
        self.contracts.contains_key(&address)
    }

    pub fn contract_label(&self, address: Addr) -> Option<&str> {
        self.contracts.get(&address).map(|info| info.label.as_str())
    }

    pub fn token(&self, token: Addr) -> HostResult<&TokenLedger> {
        self.tokens
            .get(&token)
            .ok_or(HostError::TokenNotFound { token })
    }

    fn token_mut(&mut self, token: Addr) -> HostResult<&mut TokenLedger> {
        self.tokens
            .get_mut(&token)
            .ok_or(HostError::TokenNotFound { token })
    }

    pub fn token_balance(&self, token: Addr, owner: Addr) -> HostResult<u128> {
        self.token(token).map(|ledger| ledger.balance_of(owner))
    }

    pub fn allowance(&self, token: Addr, owner: Addr, spender: Addr) -> HostResult<u128> {
        self.token(token)
            .map(|ledger| ledger.allowance(owner, spender))
    }

    pub fn native_balance(&self, owner: Addr) -> u128 {
        self.natives.get(&owner).copied().unwrap_or(0)
    }

    pub(crate) fn emit<E>(&mut self, contract: Addr, event: &E) -> HostResult<()>
    where
        E: TypedEvent,
    {
        let event = ContractEvent::new(contract, event).map_err(StdError::serialize::<E>)?;
        self.events.push(event);
        Ok(())
    }

    // ---------------------------------- tokens -----------------------------------

    pub(crate) fn mint_token(&mut self, token: Addr, to: Addr, amount: u128) -> HostResult<()> {
        let ledger = self.token_mut(token)?;
        let balance = ledger.balance_of(to);

        ledger.total_supply = ledger
            .total_supply
            .checked_add(amount)
            .ok_or(HostError::BalanceOverflow { account: token })?;
        ledger.balances.insert(
            to,
            balance
                .checked_add(amount)
                .ok_or(HostError::BalanceOverflow { account: to })?,
        );

        self.emit(token, &Transfer {
            token,
            from: Addr::ZERO,
            to,
            amount,
        })
    }

    pub(crate) fn transfer_token(
        &mut self,
        token: Addr,
        from: Addr,
        to: Addr,
        amount: u128,
    ) -> HostResult<()> {
        let ledger = self.token_mut(token)?;
        let from_balance = ledger.balance_of(from);

        let Some(new_from_balance) = from_balance.checked_sub(amount) else {
            return Err(HostError::InsufficientBalance {
                token,
                owner: from,
                balance: from_balance,
                amount,
            });
        };

        ledger.balances.insert(from, new_from_balance);

        let to_balance = ledger.balance_of(to);
        ledger.balances.insert(
            to,
            to_balance
                .checked_add(amount)
                .ok_or(HostError::BalanceOverflow { account: to })?,
        );

        self.emit(token, &Transfer {
            token,
            from,
            to,
            amount,
        })
    }

    pub(crate) fn transfer_token_from(
        &mut self,
        token: Addr,
        spender: Addr,
        from: Addr,
        to: Addr,
        amount: u128,
    ) -> HostResult<()> {
        let ledger = self.token_mut(token)?;
        let allowance = ledger.allowance(from, spender);

        let Some(new_allowance) = allowance.checked_sub(amount) else {
            return Err(HostError::InsufficientAllowance {
                token,
                owner: from,
                spender,
                allowance,
                amount,
            });
        };

        ledger.allowances.insert((from, spender), new_allowance);

        self.transfer_token(token, from, to, amount)
    }

    pub(crate) fn approve_token(
        &mut self,
        token: Addr,
        owner: Addr,
        spender: Addr,
        amount: u128,
    ) -> HostResult<()> {
        let ledger = self.token_mut(token)?;

        if amount == 0 {
            ledger.allowances.remove(&(owner, spender));
        } else {
            ledger.allowances.insert((owner, spender), amount);
        }

        self.emit(token, &Approval {
            token,
            owner,
            spender,
            amount,
        })
    }

    // ---------------------------------- native -----------------------------------

    pub(crate) fn send_native(&mut self, from: Addr, to: Addr, amount: u128) -> HostResult<()> {
        let from_balance = self.native_balance(from);

        let Some(new_from_balance) = from_balance.checked_sub(amount) else {
            return Err(HostError::InsufficientNative {
                owner: from,
                balance: from_balance,
                amount,
            });
        };

        self.natives.insert(from, new_from_balance);

        let to_balance = self.native_balance(to);
        self.natives.insert(
            to,
            to_balance
                .checked_add(amount)
                .ok_or(HostError::BalanceOverflow { account: to })?,
        );

        self.emit(Addr::ZERO, &NativeTransfer { from, to, amount })
    }

    // --------------------------------- contracts ---------------------------------

    fn code_of(&self, address: Addr) -> HostResult<Arc<dyn Contract>> {
        self.contracts
            .get(&address)
            .map(|info| info.code.clone())
            .ok_or(HostError::ContractNotFound { address })
    }

    fn enter(&mut self) -> HostResult<()> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(HostError::ExceedMaxCallDepth);
        }

        self.depth += 1;

        Ok(())
    }

    /// Record the events of a successful call, and strip them from the
    /// response handed back to the caller.
    fn commit_response(&mut self, contract: Addr, mut response: Response) -> Response {
        for (ty, data) in response.events.drain(..) {
            self.events.push(ContractEvent {
                contract,
                ty: ty.to_string(),
                data,
            });
        }

        response
    }

    pub(crate) fn instantiate_contract(
        &mut self,
        sender: Addr,
        code: Arc<dyn Contract>,
        label: &str,
        msg: &[u8],
        funds: u128,
    ) -> anyhow::Result<Addr> {
        let contract = Addr::derive(sender, label.as_bytes());

        if self.contracts.contains_key(&contract) || self.tokens.contains_key(&contract) {
            return Err(HostError::AccountExists { address: contract }.into());
        }

        self.contracts.insert(contract, ContractInfo {
            code: code.clone(),
            label: label.to_string(),
        });
        self.storages.insert(contract, MemStorage::new());

        self.enter()?;
        let res = self.run(sender, contract, funds, |ctx| code.instantiate(ctx, msg));
        self.depth -= 1;

        match res {
            Ok(response) => {
                self.commit_response(contract, response);

                #[cfg(feature = "tracing")]
                tracing::info!(address = contract.to_string(), label, "Instantiated contract");

                Ok(contract)
            },
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(err = err.to_string(), "Failed to instantiate contract");

                Err(err)
            },
        }
    }

    pub(crate) fn execute_contract(
        &mut self,
        sender: Addr,
        contract: Addr,
        msg: &[u8],
        funds: u128,
    ) -> anyhow::Result<Response> {
        let code = self.code_of(contract)?;

        self.enter()?;
        let res = self.run(sender, contract, funds, |ctx| code.execute(ctx, msg));
        self.depth -= 1;

        match res {
            Ok(response) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(contract = contract.to_string(), "Executed contract");

                Ok(self.commit_response(contract, response))
            },
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    contract = contract.to_string(),
                    err = err.to_string(),
                    "Failed to execute contract"
                );

                Err(err)
            },
        }
    }

    fn run<F>(
        &mut self,
        sender: Addr,
        contract: Addr,
        funds: u128,
        action: F,
    ) -> anyhow::Result<Response>
    where
        F: FnOnce(MutableCtx) -> anyhow::Result<Response>,
    {
        if funds > 0 {
            self.send_native(sender, contract, funds)?;
        }

        action(MutableCtx {
            host: self,
            contract,
            sender,
            funds,
        })
    }

    pub(crate) fn query_contract(&self, contract: Addr, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        let code = self.code_of(contract)?;

        code.query(ImmutableCtx {
            host: self,
            contract,
        }, msg)
    }
}
