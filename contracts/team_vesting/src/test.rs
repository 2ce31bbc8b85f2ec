#![allow(clippy::unwrap_used)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env,
};

use crate::schedule::{default_team_schedule, FIRST_UNLOCK_DELAY, FULL_UNLOCK_DELAY, KILL_DELAY};
use crate::{
    Milestone, TeamVesting, TeamVestingClient, VestingError, VestingSchedule, VestingState,
};

const START: u64 = 1_000;

fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
) -> (Address, token::Client<'a>, token::StellarAssetClient<'a>) {
    let contract_address = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    (
        contract_address.clone(),
        token::Client::new(e, &contract_address),
        token::StellarAssetClient::new(e, &contract_address),
    )
}

struct Setup<'a> {
    env: Env,
    client: TeamVestingClient<'a>,
    owner: Address,
    token: token::Client<'a>,
    token_admin: token::StellarAssetClient<'a>,
}

fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|l| l.timestamp = timestamp);
}

/// Ledger funded with `pool` tokens and activated at `START`.
fn setup_funded(pool: i128) -> Setup<'static> {
    let env = Env::default();
    env.mock_all_auths();
    set_time(&env, START);

    let owner = Address::generate(&env);
    let funder = Address::generate(&env);
    let (token_id, token, token_admin) = create_token_contract(&env, &Address::generate(&env));

    let contract_id = env.register_contract(None, TeamVesting);
    let client = TeamVestingClient::new(&env, &contract_id);
    client.initialize(&owner, &token_id, &funder, &default_team_schedule(&env));

    if pool > 0 {
        token_admin.mint(&contract_id, &pool);
    }
    client.activate();

    Setup {
        env,
        client,
        owner,
        token,
        token_admin,
    }
}

#[test]
fn test_unlock_before_first_milestone_fails() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    s.client.add_allocation(&s.owner, &alice, &800);

    set_time(&s.env, START + FIRST_UNLOCK_DELAY - 1);
    assert_eq!(
        s.client.try_unlock(&alice),
        Err(Ok(VestingError::UnlockTooEarly))
    );
    assert_eq!(s.token.balance(&alice), 0);
    assert_eq!(s.client.total_transferred(), 0);
}

#[test]
fn test_unlock_pays_only_new_delta() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    s.client.add_allocation(&s.owner, &alice, &800);

    set_time(&s.env, START + FIRST_UNLOCK_DELAY);
    assert_eq!(s.client.unlock(&alice), 400);
    assert_eq!(s.token.balance(&alice), 400);

    assert_eq!(
        s.client.try_unlock(&alice),
        Err(Ok(VestingError::NothingToUnlock))
    );
    assert_eq!(s.token.balance(&alice), 400);

    set_time(&s.env, START + FULL_UNLOCK_DELAY);
    assert_eq!(s.client.unlockable(&alice), 400);
    assert_eq!(s.client.unlock(&alice), 400);
    assert_eq!(s.token.balance(&alice), 800);
    assert_eq!(s.client.total_transferred(), 800);

    let allocation = s.client.allocation_of(&alice).unwrap();
    assert_eq!(allocation.allocated, 800);
    assert_eq!(allocation.transferred, 800);
}

#[test]
fn test_unlock_after_full_milestone_pays_everything() {
    let s = setup_funded(800);
    let alice = Address::generate(&s.env);
    s.client.add_allocation(&s.owner, &alice, &800);

    set_time(&s.env, START + FULL_UNLOCK_DELAY + 10);
    assert_eq!(s.client.unlock(&alice), 800);
    assert_eq!(s.token.balance(&s.client.address), 0);
}

#[test]
fn test_unlock_without_allocation() {
    let s = setup_funded(800);
    set_time(&s.env, START + FULL_UNLOCK_DELAY);

    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.client.try_unlock(&stranger),
        Err(Ok(VestingError::NoAllocation))
    );
}

#[test]
fn test_allocation_limited_by_held_balance() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);

    s.client.add_allocation(&s.owner, &alice, &800);
    assert_eq!(
        s.client.try_add_allocation(&s.owner, &bob, &201),
        Err(Ok(VestingError::InsufficientLedgerBalance))
    );
    s.client.add_allocation(&s.owner, &bob, &200);
    assert_eq!(s.client.total_allocated(), 1_000);
}

#[test]
fn test_allocation_accumulates() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);

    s.client.add_allocation(&s.owner, &alice, &300);
    let allocation = s.client.add_allocation(&s.owner, &alice, &500);
    assert_eq!(allocation.allocated, 800);
    assert_eq!(s.client.total_allocated(), 800);
}

#[test]
fn test_allocation_counts_transferred_tokens() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);
    s.client.add_allocation(&s.owner, &alice, &800);

    set_time(&s.env, START + FIRST_UNLOCK_DELAY);
    s.client.unlock(&alice);

    // 600 held, 400 still owed to alice
    assert_eq!(
        s.client.try_add_allocation(&s.owner, &bob, &201),
        Err(Ok(VestingError::InsufficientLedgerBalance))
    );
    s.client.add_allocation(&s.owner, &bob, &200);
}

#[test]
fn test_non_owner_cannot_allocate() {
    let s = setup_funded(1_000);
    let intruder = Address::generate(&s.env);

    assert_eq!(
        s.client.try_add_allocation(&intruder, &intruder, &100),
        Err(Ok(VestingError::Unauthorized))
    );
    assert_eq!(s.client.total_allocated(), 0);
}

#[test]
fn test_zero_allocation_rejected() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    assert_eq!(
        s.client.try_add_allocation(&s.owner, &alice, &0),
        Err(Ok(VestingError::InvalidAmount))
    );
}

#[test]
fn test_kill_before_deadline_fails() {
    let s = setup_funded(1_000);
    set_time(&s.env, START + KILL_DELAY - 1);

    assert_eq!(
        s.client.try_kill(&s.owner),
        Err(Ok(VestingError::KillTooEarly))
    );
    assert_eq!(s.token.balance(&s.client.address), 1_000);
    assert_eq!(s.token.balance(&s.owner), 0);
}

#[test]
fn test_kill_reclaims_remaining_balance() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    s.client.add_allocation(&s.owner, &alice, &800);

    set_time(&s.env, START + FIRST_UNLOCK_DELAY);
    s.client.unlock(&alice);

    set_time(&s.env, START + KILL_DELAY);
    assert_eq!(s.client.kill(&s.owner), 600);
    assert_eq!(s.token.balance(&s.owner), 600);
    assert_eq!(s.token.balance(&s.client.address), 0);
    assert_eq!(s.client.total_allocated(), 400);
    assert_eq!(s.client.total_transferred(), 400);
    assert_eq!(s.client.allocation_of(&alice), None);
    assert_eq!(s.client.state(), VestingState::Killed);

    assert_eq!(
        s.client.try_unlock(&alice),
        Err(Ok(VestingError::LedgerKilled))
    );
    assert_eq!(
        s.client.try_kill(&s.owner),
        Err(Ok(VestingError::LedgerKilled))
    );
    assert_eq!(
        s.client.try_add_allocation(&s.owner, &alice, &1),
        Err(Ok(VestingError::LedgerKilled))
    );
}

#[test]
fn test_kill_keeps_totals_consistent() {
    let s = setup_funded(1_000);
    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);
    s.client.add_allocation(&s.owner, &alice, &800);
    s.client.add_allocation(&s.owner, &bob, &200);

    set_time(&s.env, START + FIRST_UNLOCK_DELAY);
    s.client.unlock(&alice);

    set_time(&s.env, START + KILL_DELAY);
    s.client.kill(&s.owner);

    let allocated = s.client.total_allocated();
    let transferred = s.client.total_transferred();
    assert!(transferred <= allocated);
    assert_eq!(allocated - transferred, 0);
    assert_eq!(s.client.unlockable(&alice), 0);
    assert_eq!(s.client.unlockable(&bob), 0);
}

#[test]
fn test_kill_requires_owner() {
    let s = setup_funded(1_000);
    set_time(&s.env, START + KILL_DELAY);

    let intruder = Address::generate(&s.env);
    assert_eq!(
        s.client.try_kill(&intruder),
        Err(Ok(VestingError::Unauthorized))
    );
}

#[test]
fn test_state_follows_milestones() {
    let s = setup_funded(1_000);
    assert_eq!(s.client.state(), VestingState::Open);

    set_time(&s.env, START + FIRST_UNLOCK_DELAY);
    assert_eq!(s.client.state(), VestingState::PartiallyUnlocked);

    set_time(&s.env, START + FULL_UNLOCK_DELAY);
    assert_eq!(s.client.state(), VestingState::FullyUnlocked);
}

#[test]
fn test_not_activated_ledger() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let (token_id, _, token_admin) = create_token_contract(&env, &Address::generate(&env));
    let contract_id = env.register_contract(None, TeamVesting);
    let client = TeamVestingClient::new(&env, &contract_id);
    client.initialize(&owner, &token_id, &Address::generate(&env), &default_team_schedule(&env));
    token_admin.mint(&contract_id, &500);

    let alice = Address::generate(&env);
    client.add_allocation(&owner, &alice, &500);

    set_time(&env, FULL_UNLOCK_DELAY * 10);
    assert_eq!(client.created_at(), None);
    assert_eq!(client.try_unlock(&alice), Err(Ok(VestingError::UnlockTooEarly)));
    assert_eq!(client.try_kill(&owner), Err(Ok(VestingError::KillTooEarly)));
}

#[test]
fn test_activate_only_once() {
    let s = setup_funded(0);
    assert_eq!(s.client.created_at(), Some(START));
    assert_eq!(
        s.client.try_activate(),
        Err(Ok(VestingError::AlreadyActivated))
    );
}

#[test]
fn test_invalid_schedules_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let token = Address::generate(&env);
    let funder = Address::generate(&env);

    let not_complete = VestingSchedule {
        milestones: vec![
            &env,
            Milestone {
                offset: 10,
                cumulative_bps: 5_000,
            },
        ],
        kill_delay: 100,
    };
    let decreasing = VestingSchedule {
        milestones: vec![
            &env,
            Milestone {
                offset: 10,
                cumulative_bps: 6_000,
            },
            Milestone {
                offset: 20,
                cumulative_bps: 5_000,
            },
        ],
        kill_delay: 100,
    };
    let kill_too_soon = VestingSchedule {
        milestones: vec![
            &env,
            Milestone {
                offset: 200,
                cumulative_bps: 10_000,
            },
        ],
        kill_delay: 100,
    };

    for schedule in [not_complete, decreasing, kill_too_soon] {
        let contract_id = env.register_contract(None, TeamVesting);
        let client = TeamVestingClient::new(&env, &contract_id);
        assert_eq!(
            client.try_initialize(&owner, &token, &funder, &schedule),
            Err(Ok(VestingError::InvalidSchedule))
        );
    }
}

#[test]
fn test_change_owner() {
    let s = setup_funded(1_000);
    let new_owner = Address::generate(&s.env);
    let alice = Address::generate(&s.env);

    s.client.change_owner(&s.owner, &new_owner);
    assert_eq!(s.client.owner(), new_owner);
    assert_eq!(
        s.client.try_add_allocation(&s.owner, &alice, &100),
        Err(Ok(VestingError::Unauthorized))
    );
    s.client.add_allocation(&new_owner, &alice, &100);

    // top up and check the new owner is the one credited on kill
    s.token_admin.mint(&s.client.address, &50);
    set_time(&s.env, START + KILL_DELAY);
    assert_eq!(s.client.kill(&new_owner), 1_050);
    assert_eq!(s.token.balance(&new_owner), 1_050);
}
