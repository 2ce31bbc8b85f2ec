// Randomized purchase sequences against a capped sale.
extern crate std;

use arbitrary::{Arbitrary, Unstructured};
use soroban_sdk::Address;
use std::vec::Vec;

use crate::constants::ONE_DAY;
use crate::test::{setup, Sale, END, START, UNIT};
use crate::SaleError;

const CAP: i128 = 500 * UNIT;
const BUYERS: usize = 4;

#[derive(derive_arbitrary::Arbitrary, Debug)]
enum Step {
    Buy { buyer: u8, hundredths: u16 },
    Advance { days: u8 },
    Pause,
    Unpause,
    SetRate { rate: u8 },
}

fn pseudo_random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

fn apply(s: &Sale, buyers: &[Address], step: &Step) {
    match *step {
        Step::Buy { buyer, hundredths } => {
            let buyer = &buyers[buyer as usize % buyers.len()];
            let value = UNIT * (hundredths as i128 + 1) / 100;
            let before = s.client.get_raise_state();
            match s.client.try_contribute(buyer, &value) {
                Ok(Ok(minted)) => {
                    let after = s.client.get_raise_state();
                    assert_eq!(after.total_minted, before.total_minted + minted);
                }
                Err(Ok(err)) => {
                    assert!(matches!(
                        err,
                        SaleError::CapExceeded
                            | SaleError::SalePaused
                            | SaleError::InvalidTimeWindow
                            | SaleError::BelowMinimumContribution
                    ));
                    // rejected purchases leave no trace
                    assert_eq!(s.client.get_raise_state(), before);
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
        Step::Advance { days } => {
            let now = s.env.ledger().timestamp();
            s.set_time(now + (days as u64 % 8) * ONE_DAY);
        }
        Step::Pause => s.client.pause(&s.owner),
        Step::Unpause => s.client.unpause(&s.owner),
        Step::SetRate { rate } => {
            if rate > 0 {
                s.client.set_rate(&s.owner, &(rate as i128));
            }
        }
    }
}

#[test]
fn test_random_sequences_never_exceed_hard_cap() {
    for seed in 1..=12u64 {
        let s = setup(Some(CAP));
        s.env.budget().reset_unlimited();
        let buyers: Vec<Address> = (0..BUYERS).map(|_| s.buyer(10_000 * UNIT)).collect();
        s.set_time(START);

        let bytes = pseudo_random_bytes(seed, 2_048);
        let mut u = Unstructured::new(&bytes);
        let steps: Vec<Step> = Vec::arbitrary(&mut u).unwrap_or_default();

        for step in steps.iter() {
            apply(&s, &buyers, step);

            let raise = s.client.get_raise_state();
            assert!(raise.total_minted <= CAP);
            assert_eq!(s.token.total_supply(), raise.total_minted);
            if raise.total_minted == CAP {
                assert!(raise.remainder_purchaser.is_some());
            }
        }

        s.set_time(END);
        let dist = s.client.finalize();
        assert!(dist.total_minted <= CAP);
        assert_eq!(
            s.token.total_supply(),
            dist.total_minted + dist.company_tokens + dist.bounty_tokens + dist.team_tokens
        );
    }
}
