use soroban_sdk::{symbol_short, Address, Env};

pub fn activated(env: &Env, created_at: u64) {
    env.events()
        .publish((symbol_short!("activated"),), created_at);
}

pub fn allocation_added(env: &Env, beneficiary: &Address, amount: i128, allocated: i128) {
    env.events().publish(
        (symbol_short!("alloc"), beneficiary.clone()),
        (amount, allocated),
    );
}

pub fn unlocked(env: &Env, beneficiary: &Address, amount: i128, vested_bps: u32) {
    env.events().publish(
        (symbol_short!("unlock"), beneficiary.clone()),
        (amount, vested_bps),
    );
}

pub fn killed(env: &Env, owner: &Address, reclaimed: i128) {
    env.events()
        .publish((symbol_short!("killed"),), (owner.clone(), reclaimed));
}

pub fn owner_changed(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("owner_chg"),),
        (previous.clone(), new_owner.clone()),
    );
}
