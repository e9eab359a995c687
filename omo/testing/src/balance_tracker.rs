use {
    crate::{Addressable, Asset, TestSuite},
    std::{
        cmp::Ordering,
        collections::{BTreeMap, BTreeSet},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceChange {
    Increased(u128),
    Decreased(u128),
    Unchanged,
}

pub struct BalanceTracker<'a> {
    pub(crate) suite: &'a mut TestSuite,
}

impl BalanceTracker<'_> {
    /// Record the current balance of a list of accounts.
    pub fn record_many<'a, I, A>(&mut self, accounts: I)
    where
        I: IntoIterator<Item = &'a A>,
        A: Addressable + 'a,
    {
        let new_balances = accounts
            .into_iter()
            .map(|account| (account.address(), self.suite.query_balances(account)))
            // collect is needed to avoid borrowing issues
            .collect::<BTreeMap<_, _>>();

        self.suite.balances.extend(new_balances);
    }

    /// Record the current balance of a single account.
    pub fn record<A>(&mut self, account: &A)
    where
        A: Addressable,
    {
        let balances = self.suite.query_balances(account);
        self.suite.balances.insert(account.address(), balances);
    }

    /// Refresh all recorded balances.
    pub fn refresh_all(&mut self) {
        let addresses: Vec<_> = self.suite.balances.keys().copied().collect();
        for address in addresses {
            let balances = self.suite.query_balances(&address);
            self.suite.balances.insert(address, balances);
        }
    }

    /// Clear all recorded balances.
    pub fn clear(&mut self) {
        self.suite.balances.clear();
    }

    /// Get the changes in balances of an account since the last recorded balances.
    pub fn changes<A>(&self, account: &A) -> BTreeMap<Asset, BalanceChange>
    where
        A: Addressable,
    {
        let old_balances = self.suite.balances.get(&account.address()).unwrap();
        let new_balances = self.suite.query_balances(account);

        old_balances
            .keys()
            .chain(new_balances.keys())
            // Take assets only once
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|asset| {
                let old_balance = old_balances.get(asset).copied().unwrap_or(0);
                let new_balance = new_balances.get(asset).copied().unwrap_or(0);
                let change = match new_balance.cmp(&old_balance) {
                    Ordering::Greater => BalanceChange::Increased(new_balance - old_balance),
                    Ordering::Less => BalanceChange::Decreased(old_balance - new_balance),
                    Ordering::Equal => BalanceChange::Unchanged,
                };

                (*asset, change)
            })
            .collect()
    }

    /// Assert a list of balance changes for an account.
    pub fn should_change<A>(&self, account: &A, changes: BTreeMap<Asset, BalanceChange>)
    where
        A: Addressable,
    {
        let delta = self.changes(account);

        for (asset, change) in changes {
            let diff = delta.get(&asset).unwrap();
            if change != *diff {
                panic!(
                    "incorrect balance! account: {}, asset: {:?}, expected: {:?}, actual: {:?}",
                    account.address(),
                    asset,
                    change,
                    diff
                );
            }
        }
    }
}
