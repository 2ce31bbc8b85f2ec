#![no_std]

mod contract;
mod events;
pub mod schedule;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use contract::{TeamVesting, TeamVestingClient};
pub use types::*;
