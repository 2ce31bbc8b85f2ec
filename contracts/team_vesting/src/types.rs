use soroban_sdk::{contracterror, contracttype, Env, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestingError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    UnlockTooEarly = 4,
    InsufficientLedgerBalance = 5,
    KillTooEarly = 6,
    InvalidSchedule = 7,
    InvalidAmount = 8,
    AlreadyActivated = 9,
    LedgerKilled = 10,
    NoAllocation = 11,
    NothingToUnlock = 12,
    Overflow = 13,
}

/// `cumulative_bps` of every allocation is unlocked once `offset` seconds
/// have passed since activation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Milestone {
    pub offset: u64,
    pub cumulative_bps: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct VestingSchedule {
    pub milestones: Vec<Milestone>,
    pub kill_delay: u64, // seconds after activation before `kill` is allowed
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct Allocation {
    pub allocated: i128,
    pub transferred: i128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum VestingState {
    Open,
    PartiallyUnlocked,
    FullyUnlocked,
    Killed,
}

#[contracttype]
pub enum DataKey {
    Owner,
    Token,
    Funder,
    Schedule,
    CreatedAt,
    TotalAllocated,
    TotalTransferred,
    Killed,
    Allocations,
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
