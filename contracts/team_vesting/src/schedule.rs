use crate::types::{Milestone, VestingError, VestingSchedule};
use soroban_sdk::{vec, Env};

pub const BPS_DENOMINATOR: u32 = 10_000;

pub const ONE_DAY: u64 = 24 * 60 * 60;
pub const FIRST_UNLOCK_DELAY: u64 = 182 * ONE_DAY;
pub const FULL_UNLOCK_DELAY: u64 = 365 * ONE_DAY;
pub const KILL_DELAY: u64 = 730 * ONE_DAY;

/// Half the allocation after ~6 months, the rest after a year; unclaimed
/// tokens can be reclaimed after two years.
pub fn default_team_schedule(env: &Env) -> VestingSchedule {
    VestingSchedule {
        milestones: vec![
            env,
            Milestone {
                offset: FIRST_UNLOCK_DELAY,
                cumulative_bps: 5_000,
            },
            Milestone {
                offset: FULL_UNLOCK_DELAY,
                cumulative_bps: BPS_DENOMINATOR,
            },
        ],
        kill_delay: KILL_DELAY,
    }
}

pub fn validate(schedule: &VestingSchedule) -> Result<(), VestingError> {
    let mut last_offset = 0u64;
    let mut last_bps = 0u32;
    for (i, m) in schedule.milestones.iter().enumerate() {
        if (i > 0 && m.offset <= last_offset) || m.cumulative_bps <= last_bps {
            return Err(VestingError::InvalidSchedule);
        }
        last_offset = m.offset;
        last_bps = m.cumulative_bps;
    }
    if last_bps != BPS_DENOMINATOR || schedule.kill_delay < last_offset {
        return Err(VestingError::InvalidSchedule);
    }
    Ok(())
}

/// Cumulative fraction unlocked at `now`, in basis points.
pub fn vested_bps(schedule: &VestingSchedule, created_at: u64, now: u64) -> u32 {
    let elapsed = now.saturating_sub(created_at);
    let mut bps = 0;
    for m in schedule.milestones.iter() {
        if elapsed < m.offset {
            break;
        }
        bps = m.cumulative_bps;
    }
    bps
}

/// Portion of `allocated` unlocked at `bps`.
pub fn vested_amount(allocated: i128, bps: u32) -> Result<i128, VestingError> {
    allocated
        .checked_mul(bps as i128)
        .map(|v| v / BPS_DENOMINATOR as i128)
        .ok_or(VestingError::Overflow)
}
