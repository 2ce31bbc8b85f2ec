use crate::bonus;
use crate::caps::{self, Fill};
use crate::events;
use crate::interfaces::{TokenCapabilityClient, VestingLedgerClient, WhitelistCapabilityClient};
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "ICNQ Crowdsale - tiered bonus sale with hard cap and team vesting"
);

#[contract]
pub struct IcnqCrowdsale;

#[contractimpl]
impl IcnqCrowdsale {
    /// Initialize the crowdsale. The ICNQ token must already be deployed with
    /// this contract as its admin, and the vesting ledger with this contract
    /// as its funder.
    pub fn initialize(
        env: Env,
        owner: Address,
        config: SaleConfig,
        accounts: SaleAccounts,
    ) -> Result<(), SaleError> {
        if has_config(&env) {
            return Err(SaleError::AlreadyInitialized);
        }

        owner.require_auth();
        bonus::validate_config(&config)?;

        set_config(&env, &config);
        set_accounts(&env, &accounts);
        set_owner(&env, &owner);
        set_paused(&env, false);
        set_raise(
            &env,
            &RaiseState {
                total_raised: 0,
                total_minted: 0,
                private_minted: 0,
                remainder_purchaser: None,
                remainder_amount: 0,
                finalized: false,
            },
        );

        events::sale_initialized(&env, &owner, config.start_time, config.end_time);
        Ok(())
    }

    /// Buy tokens for `beneficiary`, paid by `purchaser`. Returns the number
    /// of tokens minted.
    pub fn buy_tokens(
        env: Env,
        purchaser: Address,
        beneficiary: Address,
        value: i128,
    ) -> Result<i128, SaleError> {
        purchaser.require_auth();
        Self::process_purchase(&env, &purchaser, &beneficiary, value)
    }

    /// Plain contribution: the sender buys for itself.
    pub fn contribute(env: Env, sender: Address, value: i128) -> Result<i128, SaleError> {
        sender.require_auth();
        Self::process_purchase(&env, &sender, &sender, value)
    }

    /// Mint tokens for an off-ledger private investor at an explicit rate and
    /// discount. Only possible before the public sale starts.
    pub fn mint_token_for_private_investors(
        env: Env,
        caller: Address,
        investor: Address,
        rate: i128,
        discount: u32,
        amount: i128,
    ) -> Result<i128, SaleError> {
        require_owner(&env, &caller)?;

        let config = get_config(&env)?;
        let mut raise = get_raise(&env)?;
        if raise.finalized {
            return Err(SaleError::AlreadyFinalized);
        }
        if get_ledger_timestamp(&env) >= config.start_time {
            return Err(SaleError::InvalidTimeWindow);
        }
        if rate <= 0 {
            return Err(SaleError::ZeroRate);
        }
        if amount <= 0 {
            return Err(SaleError::InvalidAmount);
        }

        let tokens = bonus::purchase_tokens(amount, rate, discount)?;
        caps::enforce_whole(config.private_sale_cap, raise.private_minted, tokens)?;
        caps::enforce_whole(config.hard_cap, raise.total_minted, tokens)?;

        raise.private_minted = raise
            .private_minted
            .checked_add(tokens)
            .ok_or(SaleError::Overflow)?;
        raise.total_minted = raise
            .total_minted
            .checked_add(tokens)
            .ok_or(SaleError::Overflow)?;
        raise.total_raised = raise
            .total_raised
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;

        let accounts = get_accounts(&env)?;
        TokenCapabilityClient::new(&env, &accounts.token).mint(&investor, &tokens);
        set_raise(&env, &raise);

        events::private_investor_purchase(&env, &investor, rate, discount, amount, tokens);
        Ok(tokens)
    }

    pub fn set_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), SaleError> {
        require_owner(&env, &caller)?;
        if new_rate <= 0 {
            return Err(SaleError::ZeroRate);
        }

        let mut config = get_config(&env)?;
        let old_rate = config.base_rate;
        config.base_rate = new_rate;
        set_config(&env, &config);

        events::rate_changed(&env, old_rate, new_rate);
        Ok(())
    }

    /// Pause public purchases. Private minting and admin calls are unaffected.
    pub fn pause(env: Env, caller: Address) -> Result<(), SaleError> {
        require_owner(&env, &caller)?;
        set_paused(&env, true);
        events::sale_paused(&env);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), SaleError> {
        require_owner(&env, &caller)?;
        set_paused(&env, false);
        events::sale_unpaused(&env);
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), SaleError> {
        require_owner(&env, &caller)?;
        set_owner(&env, &new_owner);
        events::ownership_transferred(&env, &caller, &new_owner);
        Ok(())
    }

    /// Close the sale. Anyone may call this once the end time has passed or
    /// the hard cap is reached; it runs exactly once.
    pub fn finalize(env: Env) -> Result<FinalDistribution, SaleError> {
        let config = get_config(&env)?;
        let mut raise = get_raise(&env)?;
        if raise.finalized {
            return Err(SaleError::AlreadyFinalized);
        }
        if !Self::ended(&env, &config, &raise) {
            return Err(SaleError::InvalidTimeWindow);
        }

        let accounts = get_accounts(&env)?;
        let d = &config.distribution;
        let company_tokens = share_of(raise.total_minted, d.company_bps, d.sold_bps)?;
        let bounty_tokens = share_of(raise.total_minted, d.bounty_bps, d.sold_bps)?;
        let team_tokens = share_of(raise.total_minted, d.team_bps, d.sold_bps)?;

        raise.finalized = true;
        set_raise(&env, &raise);

        let token = TokenCapabilityClient::new(&env, &accounts.token);
        let bounty_wallet = accounts
            .bounty_wallet
            .clone()
            .unwrap_or(accounts.wallet.clone());
        for (to, amount) in [
            (&accounts.wallet, company_tokens),
            (&bounty_wallet, bounty_tokens),
            (&accounts.team_vesting, team_tokens),
        ] {
            if amount > 0 {
                token.mint(to, &amount);
            }
        }
        token.finish_minting();
        VestingLedgerClient::new(&env, &accounts.team_vesting).activate();
        token.unpause();

        let distribution = FinalDistribution {
            total_raised: raise.total_raised,
            total_minted: raise.total_minted,
            company_tokens,
            bounty_tokens,
            team_tokens,
            goal_reached: bonus::goal_reached(&config, raise.total_raised),
        };
        log!(&env, "sale finalized", raise.total_minted, team_tokens);
        events::finalized(&env, &distribution);
        Ok(distribution)
    }

    // View functions
    pub fn get_config(env: Env) -> Result<SaleConfig, SaleError> {
        get_config(&env)
    }

    pub fn get_accounts(env: Env) -> Result<SaleAccounts, SaleError> {
        get_accounts(&env)
    }

    pub fn get_raise_state(env: Env) -> Result<RaiseState, SaleError> {
        get_raise(&env)
    }

    pub fn get_rate(env: Env) -> Result<i128, SaleError> {
        Ok(get_config(&env)?.base_rate)
    }

    pub fn get_hard_cap(env: Env) -> Result<Option<i128>, SaleError> {
        Ok(get_config(&env)?.hard_cap)
    }

    pub fn get_goal(env: Env) -> Result<Option<i128>, SaleError> {
        Ok(get_config(&env)?.goal)
    }

    pub fn goal_reached(env: Env) -> Result<bool, SaleError> {
        let config = get_config(&env)?;
        Ok(bonus::goal_reached(&config, get_raise(&env)?.total_raised))
    }

    /// Bonus a purchase would receive right now; `None` outside the sale window.
    pub fn current_bonus(env: Env) -> Result<Option<u32>, SaleError> {
        let config = get_config(&env)?;
        Ok(bonus::bonus_pct(&config, get_ledger_timestamp(&env)))
    }

    pub fn has_ended(env: Env) -> Result<bool, SaleError> {
        let config = get_config(&env)?;
        let raise = get_raise(&env)?;
        Ok(Self::ended(&env, &config, &raise))
    }

    pub fn is_paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn is_finalized(env: Env) -> Result<bool, SaleError> {
        Ok(get_raise(&env)?.finalized)
    }

    pub fn owner(env: Env) -> Result<Address, SaleError> {
        get_owner(&env)
    }
}

impl IcnqCrowdsale {
    fn process_purchase(
        env: &Env,
        purchaser: &Address,
        beneficiary: &Address,
        value: i128,
    ) -> Result<i128, SaleError> {
        if is_paused(env) {
            return Err(SaleError::SalePaused);
        }

        let config = get_config(env)?;
        let mut raise = get_raise(env)?;
        if raise.finalized {
            return Err(SaleError::AlreadyFinalized);
        }

        let now = get_ledger_timestamp(env);
        let bonus_pct = bonus::bonus_pct(&config, now).ok_or(SaleError::InvalidTimeWindow)?;

        let accounts = get_accounts(env)?;
        if Self::whitelist_required(&config, now)
            && !WhitelistCapabilityClient::new(env, &accounts.whitelist).is_whitelisted(beneficiary)
        {
            return Err(SaleError::NotWhitelisted);
        }

        if value <= 0 || value < config.min_contribution {
            return Err(SaleError::BelowMinimumContribution);
        }

        let proposed = bonus::purchase_tokens(value, config.base_rate, bonus_pct)?;
        let fill = caps::enforce(config.hard_cap, raise.total_minted, proposed)?;
        let tokens = fill.tokens();
        let accepted = match fill {
            Fill::Full(_) => value,
            Fill::Partial { excess, .. } => {
                caps::accepted_value(value, excess, config.base_rate, bonus_pct)?
            }
        };

        raise.total_minted = raise
            .total_minted
            .checked_add(tokens)
            .ok_or(SaleError::Overflow)?;
        raise.total_raised = raise
            .total_raised
            .checked_add(accepted)
            .ok_or(SaleError::Overflow)?;

        // The purchase that closes the cap owns the remainder slot, even when
        // it fit exactly. Earlier slots are overwritten.
        if config.hard_cap == Some(raise.total_minted) {
            raise.remainder_purchaser = Some(purchaser.clone());
            raise.remainder_amount = value - accepted;
            log!(env, "hard cap reached", purchaser.clone(), raise.remainder_amount);
        }

        // Funds go to the wallet in full; any remainder is refunded from there.
        token::Client::new(env, &accounts.payment_token).transfer(
            purchaser,
            &accounts.wallet,
            &value,
        );
        TokenCapabilityClient::new(env, &accounts.token).mint(beneficiary, &tokens);
        set_raise(env, &raise);

        events::token_purchase(
            env,
            &ContributionRecord {
                purchaser: purchaser.clone(),
                beneficiary: beneficiary.clone(),
                value,
                tokens,
                bonus_pct,
                timestamp: now,
            },
        );
        Ok(tokens)
    }

    fn whitelist_required(config: &SaleConfig, now: u64) -> bool {
        match config.whitelist_policy {
            WhitelistPolicy::Always => true,
            WhitelistPolicy::BonusTiersOnly => bonus::in_bonus_tier(config, now),
            WhitelistPolicy::Disabled => false,
        }
    }

    fn ended(env: &Env, config: &SaleConfig, raise: &RaiseState) -> bool {
        let cap_reached = matches!(config.hard_cap, Some(cap) if raise.total_minted >= cap);
        cap_reached || get_ledger_timestamp(env) >= config.end_time
    }
}

fn share_of(total_minted: i128, bps: u32, sold_bps: u32) -> Result<i128, SaleError> {
    total_minted
        .checked_mul(bps as i128)
        .map(|v| v / sold_bps as i128)
        .ok_or(SaleError::Overflow)
}
