use {
    crate::{Contract, HostResult, HostState, JsonSerExt, Querier, TokenLedger},
    omo_types::{Addr, ContractEvent},
    serde::{de::DeserializeOwned, Serialize},
    std::sync::Arc,
};

/// The result of a successful transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSuccess {
    pub events: Vec<ContractEvent>,
    pub data: Option<Vec<u8>>,
}

/// A single domain. Every externally triggered operation runs as a
/// transaction: it either completes, or none of its effects remain.
#[derive(Clone, Default)]
pub struct Host {
    state: HostState,
    token_count: u32,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    pub fn querier(&self) -> Querier<'_> {
        Querier::new(&self.state)
    }

    fn transact<T, F>(&mut self, action: F) -> anyhow::Result<(T, Vec<ContractEvent>)>
    where
        F: FnOnce(&mut HostState) -> anyhow::Result<T>,
    {
        let snapshot = self.state.clone();

        match action(&mut self.state) {
            Ok(value) => Ok((value, std::mem::take(&mut self.state.events))),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(err = err.to_string(), "Transaction failed, state reverted");

                self.state = snapshot;

                Err(err)
            },
        }
    }

    // ---------------------------------- setup ------------------------------------

    /// Create a new fungible token ledger; return its address.
    pub fn create_token(&mut self, symbol: &str, decimals: u8) -> Addr {
        self.token_count += 1;

        let salt = format!("token/{}/{symbol}", self.token_count);
        let token = Addr::derive(Addr::ZERO, salt.as_bytes());

        self.state
            .tokens
            .insert(token, TokenLedger::new(symbol, decimals));

        token
    }

    pub fn mint_token(&mut self, token: Addr, to: Addr, amount: u128) -> anyhow::Result<()> {
        self.transact(|state| Ok(state.mint_token(token, to, amount)?))
            .map(|_| ())
    }

    pub fn set_native_balance(&mut self, owner: Addr, amount: u128) {
        self.state.natives.insert(owner, amount);
    }

    // ------------------------------- transactions --------------------------------

    pub fn instantiate<M>(
        &mut self,
        sender: Addr,
        code: Arc<dyn Contract>,
        label: &str,
        msg: &M,
        funds: u128,
    ) -> anyhow::Result<Addr>
    where
        M: Serialize,
    {
        let msg = msg.to_json_vec()?;

        self.transact(|state| state.instantiate_contract(sender, code, label, &msg, funds))
            .map(|(contract, _)| contract)
    }

    pub fn execute<M>(
        &mut self,
        sender: Addr,
        contract: Addr,
        msg: &M,
        funds: u128,
    ) -> anyhow::Result<TxSuccess>
    where
        M: Serialize,
    {
        let msg = msg.to_json_vec()?;

        self.execute_raw(sender, contract, &msg, funds)
    }

    pub fn execute_raw(
        &mut self,
        sender: Addr,
        contract: Addr,
        msg: &[u8],
        funds: u128,
    ) -> anyhow::Result<TxSuccess> {
        self.transact(|state| state.execute_contract(sender, contract, msg, funds))
            .map(|(response, events)| TxSuccess {
                events,
                data: response.data,
            })
    }

    pub fn transfer_token(
        &mut self,
        sender: Addr,
        token: Addr,
        to: Addr,
        amount: u128,
    ) -> anyhow::Result<TxSuccess> {
        self.transact(|state| Ok(state.transfer_token(token, sender, to, amount)?))
            .map(|(_, events)| TxSuccess { events, data: None })
    }

    pub fn approve_token(
        &mut self,
        sender: Addr,
        token: Addr,
        spender: Addr,
        amount: u128,
    ) -> anyhow::Result<TxSuccess> {
        self.transact(|state| Ok(state.approve_token(token, sender, spender, amount)?))
            .map(|(_, events)| TxSuccess { events, data: None })
    }

    pub fn send_native(
        &mut self,
        sender: Addr,
        to: Addr,
        amount: u128,
    ) -> anyhow::Result<TxSuccess> {
        self.transact(|state| Ok(state.send_native(sender, to, amount)?))
            .map(|(_, events)| TxSuccess { events, data: None })
    }

    // ---------------------------------- queries ----------------------------------

    pub fn query<M, R>(&self, contract: Addr, msg: &M) -> anyhow::Result<R>
    where
        M: Serialize,
        R: DeserializeOwned,
    {
        self.querier().query(contract, msg)
    }

    pub fn token_balance(&self, token: Addr, owner: Addr) -> HostResult<u128> {
        self.state.token_balance(token, owner)
    }

    pub fn allowance(&self, token: Addr, owner: Addr, spender: Addr) -> HostResult<u128> {
        self.state.allowance(token, owner, spender)
    }

    pub fn native_balance(&self, owner: Addr) -> u128 {
        self.state.native_balance(owner)
    }

    pub fn is_contract(&self, address: Addr) -> bool {
        self.state.is_contract(address)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{ContractBuilder, Item, JsonSerExt, MutableCtx, ImmutableCtx, Response, ResultExt},
        omo_types::{event, token::Transfer, Empty, SearchEvent},
        serde::Deserialize,
    };

    const COUNT: Item<u64> = Item::new("count");

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum ExecuteMsg {
        Increment {},
        IncrementThenFail {},
        /// Increment the other contract with `try_call`, then increment self.
        Nudge { other: Addr },
        Pay { token: Addr, to: Addr, amount: u128 },
    }

    #[derive(Serialize, Deserialize)]
    struct Incremented {
        count: u64,
    }

    event!(Incremented, "incremented");

    fn instantiate(mut ctx: MutableCtx, _: Empty) -> anyhow::Result<Response> {
        COUNT.save(ctx.storage(), &0)?;
        Ok(Response::new())
    }

    fn increment(ctx: &mut MutableCtx) -> anyhow::Result<u64> {
        let count = COUNT.load(ctx.storage())? + 1;
        COUNT.save(ctx.storage(), &count)?;
        Ok(count)
    }

    fn execute(mut ctx: MutableCtx, msg: ExecuteMsg) -> anyhow::Result<Response> {
        match msg {
            ExecuteMsg::Increment {} => {
                let count = increment(&mut ctx)?;
                Ok(Response::new().add_event(Incremented { count })?)
            },
            ExecuteMsg::IncrementThenFail {} => {
                increment(&mut ctx)?;
                anyhow::bail!("intentional failure");
            },
            ExecuteMsg::Nudge { other } => {
                let msg = ExecuteMsg::IncrementThenFail {}.to_json_vec()?;
                let res = ctx.try_call_raw(other, &msg, 0);
                increment(&mut ctx)?;
                Ok(Response::new().set_data(&res.is_err())?)
            },
            ExecuteMsg::Pay { token, to, amount } => {
                ctx.transfer_token(token, to, amount)?;
                Ok(Response::new())
            },
        }
    }

    fn query(ctx: ImmutableCtx, _: Empty) -> anyhow::Result<Vec<u8>> {
        Ok(COUNT.load(ctx.storage())?.to_json_vec()?)
    }

    fn setup() -> (Host, Addr, Addr) {
        let code = ContractBuilder::new(instantiate)
            .with_execute(execute)
            .with_query(query)
            .build();

        let mut host = Host::new();
        let a = host
            .instantiate(Addr::mock(1), code.clone(), "a", &Empty {}, 0)
            .should_succeed();
        let b = host
            .instantiate(Addr::mock(1), code, "b", &Empty {}, 0)
            .should_succeed();

        (host, a, b)
    }

    #[test]
    fn failed_transactions_revert_everything() {
        let (mut host, a, _) = setup();

        host.execute(Addr::mock(1), a, &ExecuteMsg::Increment {}, 0)
            .should_succeed_and(|res| res.events.search_event::<Incremented>().len() == 1);

        host.execute(Addr::mock(1), a, &ExecuteMsg::IncrementThenFail {}, 0)
            .should_fail_with_error("intentional failure");

        host.query::<_, u64>(a, &Empty {}).should_succeed_and_equal(1);
    }

    #[test]
    fn try_call_rolls_back_only_the_callee() {
        let (mut host, a, b) = setup();

        let res = host
            .execute(Addr::mock(1), a, &ExecuteMsg::Nudge { other: b }, 0)
            .should_succeed();
        assert_eq!(res.data, Some(b"true".to_vec()));

        host.query::<_, u64>(a, &Empty {}).should_succeed_and_equal(1);
        host.query::<_, u64>(b, &Empty {}).should_succeed_and_equal(0);
    }

    #[test]
    fn token_ledger() {
        let (mut host, a, _) = setup();
        let token = host.create_token("USDC", 6);

        host.mint_token(token, a, 100).should_succeed();

        host.execute(
            Addr::mock(1),
            a,
            &ExecuteMsg::Pay {
                token,
                to: Addr::mock(2),
                amount: 101,
            },
            0,
        )
        .should_fail_with_error("ERC20: transfer amount exceeds balance");

        let res = host
            .execute(
                Addr::mock(1),
                a,
                &ExecuteMsg::Pay {
                    token,
                    to: Addr::mock(2),
                    amount: 40,
                },
                0,
            )
            .should_succeed();

        assert_eq!(res.events.search_event::<Transfer>(), [Transfer {
            token,
            from: a,
            to: Addr::mock(2),
            amount: 40,
        }]);
        assert_eq!(host.token_balance(token, a).unwrap(), 60);
        assert_eq!(host.token_balance(token, Addr::mock(2)).unwrap(), 40);
    }

    #[test]
    fn allowances() {
        let (mut host, ..) = setup();
        let token = host.create_token("USDC", 6);
        let (owner, spender) = (Addr::mock(1), Addr::mock(2));

        host.mint_token(token, owner, 10).should_succeed();
        host.approve_token(owner, token, spender, 4).should_succeed();

        let mut state = host.state().clone();
        state
            .transfer_token_from(token, spender, owner, spender, 5)
            .should_fail_with_error("ERC20: insufficient allowance");
        state
            .transfer_token_from(token, spender, owner, spender, 4)
            .should_succeed();

        assert_eq!(state.allowance(token, owner, spender).unwrap(), 0);
        assert_eq!(state.token_balance(token, spender).unwrap(), 4);
    }

    #[test]
    fn native_funds_are_credited_before_execution() {
        let (mut host, a, _) = setup();
        host.set_native_balance(Addr::mock(1), 5);

        host.execute(Addr::mock(1), a, &ExecuteMsg::Increment {}, 3)
            .should_succeed();
        assert_eq!(host.native_balance(a), 3);
        assert_eq!(host.native_balance(Addr::mock(1)), 2);

        host.execute(Addr::mock(1), a, &ExecuteMsg::Increment {}, 3)
            .should_fail();
        assert_eq!(host.native_balance(Addr::mock(1)), 2);
    }
}
