#![no_std]

pub mod bonus;
pub mod caps;
pub mod constants;
mod contract;
mod events;
pub mod interfaces;
mod storage;
mod types;

#[cfg(test)]
mod test_sequences;

pub use contract::{IcnqCrowdsale, IcnqCrowdsaleClient};
pub use types::*;
