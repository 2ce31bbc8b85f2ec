use crate::types::Distribution;

pub const PERCENT: i128 = 100;
pub const BPS_DENOMINATOR: u32 = 10_000;

pub const ONE_DAY: u64 = 24 * 60 * 60;

/// 60% of the final supply is sold; the rest is minted at finalization.
pub const DEFAULT_DISTRIBUTION: Distribution = Distribution {
    sold_bps: 6_000,
    company_bps: 2_000,
    bounty_bps: 1_000,
    team_bps: 1_000,
};
