//! Rate and bonus calculation. Everything here is a pure function of the
//! sale configuration and a timestamp.

use crate::constants::{BPS_DENOMINATOR, PERCENT};
use crate::types::{SaleConfig, SaleError};

/// Bonus percentage for a contribution made at `now`, or `None` when the
/// public sale is not running (before `start_time` or at/after `end_time`).
///
/// Tiers are checked in ascending order and the first boundary not yet
/// passed wins. Past the last boundary the bonus is zero.
pub fn bonus_pct(config: &SaleConfig, now: u64) -> Option<u32> {
    if now < config.start_time || now >= config.end_time {
        return None;
    }
    for tier in config.bonus_tiers.iter() {
        if now < tier.ends_at {
            return Some(tier.bonus_pct);
        }
    }
    Some(0)
}

/// True while `now` falls inside one of the bonus tiers.
pub fn in_bonus_tier(config: &SaleConfig, now: u64) -> bool {
    match config.bonus_tiers.last() {
        Some(last) => now >= config.start_time && now < last.ends_at,
        None => false,
    }
}

/// `value * rate * (100 + bonus) / 100`.
pub fn purchase_tokens(value: i128, rate: i128, bonus_pct: u32) -> Result<i128, SaleError> {
    value
        .checked_mul(rate)
        .and_then(|base| base.checked_mul(PERCENT + bonus_pct as i128))
        .map(|scaled| scaled / PERCENT)
        .ok_or(SaleError::Overflow)
}

/// True once `total_raised` covers the funding goal. A sale without a goal
/// has always reached it.
pub fn goal_reached(config: &SaleConfig, total_raised: i128) -> bool {
    match config.goal {
        Some(goal) => total_raised >= goal,
        None => true,
    }
}

/// Validates the invariants `initialize` relies on.
pub fn validate_config(config: &SaleConfig) -> Result<(), SaleError> {
    if config.start_time >= config.end_time {
        return Err(SaleError::InvalidConfig);
    }
    if config.base_rate <= 0 || config.min_contribution < 0 {
        return Err(SaleError::InvalidConfig);
    }

    let mut previous = config.start_time;
    for tier in config.bonus_tiers.iter() {
        if tier.ends_at <= previous || tier.ends_at > config.end_time {
            return Err(SaleError::InvalidConfig);
        }
        previous = tier.ends_at;
    }

    match (config.private_sale_cap, config.hard_cap) {
        (Some(private), _) if private <= 0 => return Err(SaleError::InvalidConfig),
        (_, Some(hard)) if hard <= 0 => return Err(SaleError::InvalidConfig),
        (Some(private), Some(hard)) if private > hard => return Err(SaleError::InvalidConfig),
        _ => {}
    }
    if matches!(config.goal, Some(goal) if goal <= 0) {
        return Err(SaleError::InvalidConfig);
    }

    let d = &config.distribution;
    let sum = d.sold_bps as u64 + d.company_bps as u64 + d.bounty_bps as u64 + d.team_bps as u64;
    if d.sold_bps == 0 || sum != BPS_DENOMINATOR as u64 {
        return Err(SaleError::InvalidConfig);
    }
    Ok(())
}
