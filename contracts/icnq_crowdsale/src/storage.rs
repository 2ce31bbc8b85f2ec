use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_accounts(env: &Env) -> Result<SaleAccounts, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Accounts)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_accounts(env: &Env, accounts: &SaleAccounts) {
    env.storage().instance().set(&DataKey::Accounts, accounts);
}

pub fn get_owner(env: &Env) -> Result<Address, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_raise(env: &Env) -> Result<RaiseState, SaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Raise)
        .ok_or(SaleError::NotInitialized)
}

pub fn set_raise(env: &Env, raise: &RaiseState) {
    env.storage().instance().set(&DataKey::Raise, raise);
}

/// Authenticates `caller` and checks it is the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), SaleError> {
    caller.require_auth();
    if *caller != get_owner(env)? {
        return Err(SaleError::Unauthorized);
    }
    Ok(())
}
