use crate::events;
use crate::schedule;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env};

contractmeta!(
    key = "Description",
    val = "Team and advisors allocation ledger with milestone unlocks"
);

#[contract]
pub struct TeamVesting;

#[contractimpl]
impl TeamVesting {
    /// Initialize the ledger. `funder` is the crowdsale that mints the team
    /// pool into this contract and activates it at finalization.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        funder: Address,
        schedule: VestingSchedule,
    ) -> Result<(), VestingError> {
        if is_initialized(&env) {
            return Err(VestingError::AlreadyInitialized);
        }
        owner.require_auth();
        schedule::validate(&schedule)?;

        set_owner(&env, &owner);
        set_token(&env, &token);
        set_funder(&env, &funder);
        set_schedule(&env, &schedule);
        set_total_allocated(&env, 0);
        set_total_transferred(&env, 0);
        bump_instance(&env);
        Ok(())
    }

    /// Starts the vesting clock. Milestones and the kill deadline are offsets
    /// from this moment.
    pub fn activate(env: Env) -> Result<(), VestingError> {
        let funder = get_funder(&env)?;
        funder.require_auth();

        if get_created_at(&env).is_some() {
            return Err(VestingError::AlreadyActivated);
        }
        let now = get_ledger_timestamp(&env);
        set_created_at(&env, now);
        bump_instance(&env);

        events::activated(&env, now);
        Ok(())
    }

    /// Register `amount` more tokens for `beneficiary`. Allocations
    /// accumulate; they are never replaced.
    pub fn add_allocation(
        env: Env,
        caller: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<Allocation, VestingError> {
        require_owner(&env, &caller)?;
        if is_killed(&env) {
            return Err(VestingError::LedgerKilled);
        }
        if amount <= 0 {
            return Err(VestingError::InvalidAmount);
        }

        let total_allocated = get_total_allocated(&env);
        let outstanding = total_allocated - get_total_transferred(&env);
        let held = Self::held_balance(&env)?;
        let required = outstanding
            .checked_add(amount)
            .ok_or(VestingError::Overflow)?;
        if required > held {
            return Err(VestingError::InsufficientLedgerBalance);
        }

        let mut allocations = get_allocations(&env);
        let mut allocation = allocations.get(beneficiary.clone()).unwrap_or_default();
        allocation.allocated += amount;
        allocations.set(beneficiary.clone(), allocation.clone());
        set_allocations(&env, &allocations);
        set_total_allocated(&env, total_allocated + amount);
        bump_instance(&env);

        events::allocation_added(&env, &beneficiary, amount, allocation.allocated);
        Ok(allocation)
    }

    /// Transfer the vested, not yet transferred part of the caller's
    /// allocation. Returns the amount transferred.
    pub fn unlock(env: Env, beneficiary: Address) -> Result<i128, VestingError> {
        beneficiary.require_auth();
        if is_killed(&env) {
            return Err(VestingError::LedgerKilled);
        }

        let bps = Self::current_bps(&env)?;
        if bps == 0 {
            return Err(VestingError::UnlockTooEarly);
        }

        let mut allocations = get_allocations(&env);
        let mut allocation = allocations
            .get(beneficiary.clone())
            .ok_or(VestingError::NoAllocation)?;
        let vested = schedule::vested_amount(allocation.allocated, bps)?;
        let payout = vested - allocation.transferred;
        if payout <= 0 {
            return Err(VestingError::NothingToUnlock);
        }

        allocation.transferred += payout;
        allocations.set(beneficiary.clone(), allocation);
        set_allocations(&env, &allocations);
        set_total_transferred(&env, get_total_transferred(&env) + payout);
        bump_instance(&env);

        token::Client::new(&env, &get_token(&env)?).transfer(
            &env.current_contract_address(),
            &beneficiary,
            &payout,
        );

        events::unlocked(&env, &beneficiary, payout, bps);
        Ok(payout)
    }

    /// Reclaim everything the ledger still holds once the kill deadline has
    /// passed. Terminal: the ledger accepts no further calls that move tokens.
    pub fn kill(env: Env, caller: Address) -> Result<i128, VestingError> {
        let owner = require_owner(&env, &caller)?;
        if is_killed(&env) {
            return Err(VestingError::LedgerKilled);
        }

        let created_at = get_created_at(&env).ok_or(VestingError::KillTooEarly)?;
        let deadline = created_at.saturating_add(get_schedule(&env)?.kill_delay);
        if get_ledger_timestamp(&env) < deadline {
            return Err(VestingError::KillTooEarly);
        }

        let held = Self::held_balance(&env)?;
        clear_allocations(&env);
        // Unpaid claims are cancelled; what was already paid stays on the books.
        set_total_allocated(&env, get_total_transferred(&env));
        set_killed(&env);

        if held > 0 {
            token::Client::new(&env, &get_token(&env)?).transfer(
                &env.current_contract_address(),
                &owner,
                &held,
            );
        }

        log!(&env, "vesting ledger killed", held);
        events::killed(&env, &owner, held);
        Ok(held)
    }

    pub fn change_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), VestingError> {
        require_owner(&env, &caller)?;
        set_owner(&env, &new_owner);
        bump_instance(&env);
        events::owner_changed(&env, &caller, &new_owner);
        Ok(())
    }

    // View functions
    pub fn owner(env: Env) -> Result<Address, VestingError> {
        get_owner(&env)
    }

    pub fn schedule(env: Env) -> Result<VestingSchedule, VestingError> {
        get_schedule(&env)
    }

    pub fn created_at(env: Env) -> Option<u64> {
        get_created_at(&env)
    }

    pub fn allocation_of(env: Env, beneficiary: Address) -> Option<Allocation> {
        get_allocations(&env).get(beneficiary)
    }

    pub fn unlockable(env: Env, beneficiary: Address) -> Result<i128, VestingError> {
        if is_killed(&env) {
            return Ok(0);
        }
        let bps = Self::current_bps(&env)?;
        match get_allocations(&env).get(beneficiary) {
            Some(a) => Ok(schedule::vested_amount(a.allocated, bps)? - a.transferred),
            None => Ok(0),
        }
    }

    pub fn total_allocated(env: Env) -> i128 {
        get_total_allocated(&env)
    }

    pub fn total_transferred(env: Env) -> i128 {
        get_total_transferred(&env)
    }

    pub fn state(env: Env) -> Result<VestingState, VestingError> {
        if is_killed(&env) {
            return Ok(VestingState::Killed);
        }
        Ok(match Self::current_bps(&env)? {
            0 => VestingState::Open,
            schedule::BPS_DENOMINATOR => VestingState::FullyUnlocked,
            _ => VestingState::PartiallyUnlocked,
        })
    }
}

impl TeamVesting {
    fn held_balance(env: &Env) -> Result<i128, VestingError> {
        Ok(token::Client::new(env, &get_token(env)?).balance(&env.current_contract_address()))
    }

    /// Unlocked fraction right now; zero until the ledger is activated.
    fn current_bps(env: &Env) -> Result<u32, VestingError> {
        let schedule = get_schedule(env)?;
        Ok(match get_created_at(env) {
            Some(created_at) => {
                schedule::vested_bps(&schedule, created_at, get_ledger_timestamp(env))
            }
            None => 0,
        })
    }
}
