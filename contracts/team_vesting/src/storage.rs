use crate::types::*;
use soroban_sdk::{Address, Env, Map};

// The ledger lives for years; keep its entries alive on every write.
const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 120_960;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Result<Address, VestingError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(VestingError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_token(env: &Env) -> Result<Address, VestingError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(VestingError::NotInitialized)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn get_funder(env: &Env) -> Result<Address, VestingError> {
    env.storage()
        .instance()
        .get(&DataKey::Funder)
        .ok_or(VestingError::NotInitialized)
}

pub fn set_funder(env: &Env, funder: &Address) {
    env.storage().instance().set(&DataKey::Funder, funder);
}

pub fn get_schedule(env: &Env) -> Result<VestingSchedule, VestingError> {
    env.storage()
        .instance()
        .get(&DataKey::Schedule)
        .ok_or(VestingError::NotInitialized)
}

pub fn set_schedule(env: &Env, schedule: &VestingSchedule) {
    env.storage().instance().set(&DataKey::Schedule, schedule);
}

pub fn get_created_at(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DataKey::CreatedAt)
}

pub fn set_created_at(env: &Env, timestamp: u64) {
    env.storage().instance().set(&DataKey::CreatedAt, &timestamp);
}

pub fn get_total_allocated(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalAllocated)
        .unwrap_or(0)
}

pub fn set_total_allocated(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalAllocated, &amount);
}

pub fn get_total_transferred(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalTransferred)
        .unwrap_or(0)
}

pub fn set_total_transferred(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalTransferred, &amount);
}

pub fn is_killed(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Killed)
        .unwrap_or(false)
}

pub fn set_killed(env: &Env) {
    env.storage().instance().set(&DataKey::Killed, &true);
}

pub fn get_allocations(env: &Env) -> Map<Address, Allocation> {
    env.storage()
        .persistent()
        .get(&DataKey::Allocations)
        .unwrap_or(Map::new(env))
}

pub fn set_allocations(env: &Env, allocations: &Map<Address, Allocation>) {
    env.storage()
        .persistent()
        .set(&DataKey::Allocations, allocations);
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::Allocations, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn clear_allocations(env: &Env) {
    env.storage().persistent().remove(&DataKey::Allocations);
}

/// Authenticates `caller` and checks it is the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Address, VestingError> {
    caller.require_auth();
    let owner = get_owner(env)?;
    if *caller != owner {
        return Err(VestingError::Unauthorized);
    }
    Ok(owner)
}
