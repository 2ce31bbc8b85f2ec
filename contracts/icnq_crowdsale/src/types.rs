use soroban_sdk::{contracterror, contracttype, Address, Env, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SaleError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidTimeWindow = 3,
    NotWhitelisted = 4,
    BelowMinimumContribution = 5,
    CapExceeded = 6,
    SalePaused = 7,
    Unauthorized = 8,
    AlreadyFinalized = 9,
    ZeroRate = 10,
    InvalidConfig = 11,
    InvalidAmount = 12,
    Overflow = 13,
}

/// Bonus applied to contributions made before `ends_at`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct BonusTier {
    pub ends_at: u64,
    pub bonus_pct: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum WhitelistPolicy {
    /// Every public purchase needs a whitelisted beneficiary.
    Always,
    /// Only purchases inside a bonus tier need one.
    BonusTiersOnly,
    Disabled,
}

/// Shares of the final supply, in basis points. `sold_bps` is the fraction
/// that `total_minted` represents once the sale closes.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Distribution {
    pub sold_bps: u32,
    pub company_bps: u32,
    pub bounty_bps: u32,
    pub team_bps: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub start_time: u64,
    pub end_time: u64,
    pub bonus_tiers: Vec<BonusTier>,
    pub base_rate: i128, // tokens per unit of payment value
    pub min_contribution: i128,
    pub private_sale_cap: Option<i128>,
    pub hard_cap: Option<i128>,
    pub goal: Option<i128>, // funding target in payment value
    pub whitelist_policy: WhitelistPolicy,
    pub distribution: Distribution,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleAccounts {
    pub token: Address,         // ICNQ token, minted by this contract
    pub payment_token: Address, // asset contributions are paid in
    pub whitelist: Address,
    pub team_vesting: Address,
    pub wallet: Address, // receives funds and the company share
    pub bounty_wallet: Option<Address>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RaiseState {
    pub total_raised: i128,
    pub total_minted: i128,
    pub private_minted: i128,
    /// Single slot: only the most recent cap overflow is kept.
    pub remainder_purchaser: Option<Address>,
    pub remainder_amount: i128,
    pub finalized: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContributionRecord {
    pub purchaser: Address,
    pub beneficiary: Address,
    pub value: i128,
    pub tokens: i128,
    pub bonus_pct: u32,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FinalDistribution {
    pub total_raised: i128,
    pub total_minted: i128,
    pub company_tokens: i128,
    pub bounty_tokens: i128,
    pub team_tokens: i128,
    pub goal_reached: bool,
}

#[contracttype]
pub enum DataKey {
    Config,
    Accounts,
    Owner,
    Paused,
    Raise,
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
