use {
    crate::{Addressable, BalanceTracker},
    omo_host::Host,
    omo_types::Addr,
    std::{
        collections::BTreeMap,
        ops::{Deref, DerefMut},
    },
};

/// An asset whose balance the suite can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    Native,
    Token(Addr),
}

/// A host with bookkeeping for tests. Dereferences to the [`Host`].
#[derive(Default)]
pub struct TestSuite {
    host: Host,
    tokens: Vec<Addr>,
    pub(crate) balances: BTreeMap<Addr, BTreeMap<Asset, u128>>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token whose balances are tracked by the balance tracker.
    pub fn create_token(&mut self, symbol: &str, decimals: u8) -> Addr {
        let token = self.host.create_token(symbol, decimals);
        self.tokens.push(token);
        token
    }

    /// Native balance and the balance of every token created through the suite.
    pub fn query_balances<A>(&self, account: &A) -> BTreeMap<Asset, u128>
    where
        A: Addressable,
    {
        let account = account.address();

        self.tokens
            .iter()
            .map(|token| {
                let balance = self.host.token_balance(*token, account).unwrap();
                (Asset::Token(*token), balance)
            })
            .chain([(Asset::Native, self.host.native_balance(account))])
            .collect()
    }

    pub fn balances(&mut self) -> BalanceTracker<'_> {
        BalanceTracker { suite: self }
    }
}

impl Deref for TestSuite {
    type Target = Host;

    fn deref(&self) -> &Self::Target {
        &self.host
    }
}

impl DerefMut for TestSuite {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.host
    }
}
