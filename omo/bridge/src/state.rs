use {
    omo_host::{Counter, Item, Map, Set},
    omo_types::{
        bridge::{Config, Domain},
        Addr, Addr32,
    },
};

pub const CONFIG: Item<Config> = Item::new("config");

pub const PAUSED: Item<bool> = Item::new("paused");

// destination_domain => remote bridge
pub const BOUND_BRIDGES: Map<Domain, Addr32> = Map::new("bound_bridge");

pub const DISABLED_TOKENS: Set<Addr> = Set::new("disabled_token");

// (token, destination_domain)
pub const DISABLED_ROUTES: Set<(Addr, Domain)> = Set::new("disabled_route");

pub const ATTESTERS: Set<Addr> = Set::new("attester");

pub const SIGNATURE_THRESHOLD: Item<u32> = Item::new("signature_threshold");

pub const NEXT_SEQUENCE: Counter = Counter::new("next_sequence", 0);

/// Native fees received from `bridge_out` and not yet collected.
pub const ACCRUED_FEES: Item<u128> = Item::new("accrued_fees");
