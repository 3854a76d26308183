//! # Lifecycle
//!
//! Derives the hatch's [`HatchState`] from the clock and the ledger. Nothing
//! here is cached: the only stored inputs are the `closed` latch and the
//! `open_date` (where `0` means "not activated yet").
//!
//! The funding window is the half-open interval
//! `[open_date, open_date + period)`: a query at exactly
//! `open_date + period` already sees the window as over.

use soroban_sdk::Env;

use crate::storage;
use crate::types::{HatchConfig, HatchState};

/// Everything the state derivation looks at, gathered in one place so the
/// rule can be evaluated (and tested) without touching storage.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    pub closed: bool,
    pub open_date: u64,
    pub now: u64,
    pub period: u64,
    pub total_raised: i128,
    pub min_goal: i128,
    pub max_goal: i128,
}

impl Snapshot {
    pub fn state(&self) -> HatchState {
        if self.closed {
            return HatchState::Closed;
        }
        if self.open_date == 0 || self.now < self.open_date {
            return HatchState::Pending;
        }
        if self.total_raised >= self.max_goal {
            return HatchState::GoalReached;
        }
        if self.now < self.open_date.saturating_add(self.period) {
            return HatchState::Funding;
        }
        if self.total_raised >= self.min_goal {
            HatchState::GoalReached
        } else {
            HatchState::Refunding
        }
    }
}

/// The clock collaborator. Every time read in the contract goes through here.
#[inline]
pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

pub fn snapshot(env: &Env, config: &HatchConfig) -> Snapshot {
    Snapshot {
        closed: storage::is_closed(env),
        open_date: storage::get_open_date(env),
        now: now(env),
        period: config.period,
        total_raised: storage::get_total_raised(env),
        min_goal: config.min_goal,
        max_goal: config.max_goal,
    }
}

pub fn current_state(env: &Env, config: &HatchConfig) -> HatchState {
    snapshot(env, config).state()
}

/// `(start, cliff, complete)` of the vesting schedule attached to every
/// contribution, all anchored on the open date.
pub fn vesting_dates(open_date: u64, config: &HatchConfig) -> Option<(u64, u64, u64)> {
    let cliff = open_date.checked_add(config.vesting_cliff_period)?;
    let complete = open_date.checked_add(config.vesting_complete_period)?;
    Some((open_date, cliff, complete))
}
