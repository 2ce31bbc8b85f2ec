// Minimal interfaces of the contracts the sale drives. Only the calls the
// sale actually makes are listed.
use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "TokenCapabilityClient")]
pub trait TokenCapability {
    fn mint(env: Env, to: Address, amount: i128);
    fn finish_minting(env: Env);
    fn unpause(env: Env);
}

#[contractclient(name = "WhitelistCapabilityClient")]
pub trait WhitelistCapability {
    fn is_whitelisted(env: Env, addr: Address) -> bool;
}

#[contractclient(name = "VestingLedgerClient")]
pub trait VestingLedger {
    fn activate(env: Env);
}
