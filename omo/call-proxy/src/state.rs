use {omo_host::Item, omo_types::call_proxy::Config};

pub const CONFIG: Item<Config> = Item::new("config");
