#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Env, Vec,
};

contractmeta!(
    key = "Description",
    val = "Owner-managed whitelist for the ICNQ crowdsale"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WhitelistError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
}

#[contracttype]
pub enum DataKey {
    Owner,
    Member(Address),
}

#[contract]
pub struct Whitelist;

fn require_owner(env: &Env, caller: &Address) -> Result<(), WhitelistError> {
    caller.require_auth();
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(WhitelistError::NotInitialized)?;
    if *caller != owner {
        return Err(WhitelistError::Unauthorized);
    }
    Ok(())
}

fn set_membership(env: &Env, addrs: &Vec<Address>, member: bool) {
    for addr in addrs.iter() {
        let key = DataKey::Member(addr.clone());
        if member {
            env.storage().persistent().set(&key, &true);
        } else {
            env.storage().persistent().remove(&key);
        }
        env.events()
            .publish((symbol_short!("wl_upd"), addr), member);
    }
}

#[contractimpl]
impl Whitelist {
    pub fn initialize(env: Env, owner: Address) -> Result<(), WhitelistError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(WhitelistError::AlreadyInitialized);
        }
        owner.require_auth();
        env.storage().instance().set(&DataKey::Owner, &owner);
        Ok(())
    }

    pub fn add_to_whitelist(
        env: Env,
        caller: Address,
        addrs: Vec<Address>,
    ) -> Result<(), WhitelistError> {
        require_owner(&env, &caller)?;
        set_membership(&env, &addrs, true);
        Ok(())
    }

    pub fn remove_from_whitelist(
        env: Env,
        caller: Address,
        addrs: Vec<Address>,
    ) -> Result<(), WhitelistError> {
        require_owner(&env, &caller)?;
        set_membership(&env, &addrs, false);
        Ok(())
    }

    pub fn is_whitelisted(env: Env, addr: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Member(addr))
            .unwrap_or(false)
    }

    pub fn owner(env: Env) -> Result<Address, WhitelistError> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(WhitelistError::NotInitialized)
    }
}
