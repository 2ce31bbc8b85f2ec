use crate::types::{ContributionRecord, FinalDistribution};
use soroban_sdk::{symbol_short, Address, Env};

pub fn sale_initialized(env: &Env, owner: &Address, start_time: u64, end_time: u64) {
    env.events().publish(
        (symbol_short!("sale_init"),),
        (owner.clone(), start_time, end_time),
    );
}

pub fn token_purchase(env: &Env, record: &ContributionRecord) {
    env.events().publish(
        (symbol_short!("purchase"), record.beneficiary.clone()),
        record.clone(),
    );
}

pub fn private_investor_purchase(
    env: &Env,
    investor: &Address,
    rate: i128,
    discount: u32,
    amount: i128,
    tokens: i128,
) {
    env.events().publish(
        (symbol_short!("priv_buy"), investor.clone()),
        (rate, discount, amount, tokens),
    );
}

pub fn rate_changed(env: &Env, old_rate: i128, new_rate: i128) {
    env.events()
        .publish((symbol_short!("rate_chg"),), (old_rate, new_rate));
}

pub fn sale_paused(env: &Env) {
    env.events().publish((symbol_short!("paused"),), ());
}

pub fn sale_unpaused(env: &Env) {
    env.events().publish((symbol_short!("unpaused"),), ());
}

pub fn ownership_transferred(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("owner_chg"),),
        (previous.clone(), new_owner.clone()),
    );
}

pub fn finalized(env: &Env, distribution: &FinalDistribution) {
    env.events()
        .publish((symbol_short!("finalized"),), distribution.clone());
}
