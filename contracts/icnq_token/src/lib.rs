#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Env, String,
};

contractmeta!(
    key = "Description",
    val = "ICNQ Token - mintable, pausable sale token"
);

pub const TOKEN_NAME: &str = "Iconiq Lab Token";
pub const TOKEN_SYMBOL: &str = "ICNQ";
pub const TOKEN_DECIMALS: u32 = 18;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    TokenPaused = 4,
    MintingFinished = 5,
    InsufficientBalance = 6,
    InvalidAmount = 7,
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[contracttype]
pub enum DataKey {
    Admin,
    Metadata,
    TotalSupply,
    Paused,
    MintingFinished,
    Balance(Address),
}

#[contract]
pub struct IcnqToken;

fn get_admin(env: &Env) -> Result<Address, TokenError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(TokenError::NotInitialized)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(id.clone()), &amount);
}

fn read_flag(env: &Env, key: &DataKey) -> bool {
    env.storage().instance().get(key).unwrap_or(false)
}

#[contractimpl]
impl IcnqToken {
    /// Initialize the token. The admin (the crowdsale) is the only minter,
    /// and the token starts paused so holders cannot move tokens until the
    /// sale is finalized.
    pub fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(TokenError::AlreadyInitialized);
        }

        let metadata = TokenMetadata {
            decimal,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        env.storage().instance().set(&DataKey::Paused, &true);
        env.storage()
            .instance()
            .set(&DataKey::MintingFinished, &false);
        Ok(())
    }

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let admin = get_admin(&env)?;
        admin.require_auth();

        if read_flag(&env, &DataKey::MintingFinished) {
            return Err(TokenError::MintingFinished);
        }
        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let supply: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0);
        write_balance(&env, &to, read_balance(&env, &to) + amount);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &(supply + amount));

        env.events().publish((symbol_short!("minted"), to), amount);
        Ok(())
    }

    /// Permanently disables `mint`.
    pub fn finish_minting(env: Env) -> Result<(), TokenError> {
        let admin = get_admin(&env)?;
        admin.require_auth();

        if read_flag(&env, &DataKey::MintingFinished) {
            return Err(TokenError::MintingFinished);
        }
        env.storage()
            .instance()
            .set(&DataKey::MintingFinished, &true);
        env.events().publish((symbol_short!("mint_done"),), ());
        Ok(())
    }

    pub fn pause(env: Env) -> Result<(), TokenError> {
        let admin = get_admin(&env)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &true);
        env.events().publish((symbol_short!("paused"),), ());
        Ok(())
    }

    pub fn unpause(env: Env) -> Result<(), TokenError> {
        let admin = get_admin(&env)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &false);
        env.events().publish((symbol_short!("unpaused"),), ());
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();

        if read_flag(&env, &DataKey::Paused) {
            return Err(TokenError::TokenPaused);
        }
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        write_balance(&env, &from, from_balance - amount);
        write_balance(&env, &to, read_balance(&env, &to) + amount);

        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);
        Ok(())
    }

    // View functions
    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn paused(env: Env) -> bool {
        read_flag(&env, &DataKey::Paused)
    }

    pub fn minting_finished(env: Env) -> bool {
        read_flag(&env, &DataKey::MintingFinished)
    }

    pub fn admin(env: Env) -> Result<Address, TokenError> {
        get_admin(&env)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        Self::metadata(&env).map(|m| m.name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        Self::metadata(&env).map(|m| m.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, TokenError> {
        Self::metadata(&env).map(|m| m.decimal)
    }
}

impl IcnqToken {
    fn metadata(env: &Env) -> Result<TokenMetadata, TokenError> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(TokenError::NotInitialized)
    }
}
