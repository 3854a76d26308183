//! # Types
//!
//! Shared data structures used across all modules of the hatch.
//!
//! ## Design decisions
//!
//! ### Config / Ledger split
//!
//! A hatch keeps two kinds of data:
//!
//! - [`HatchConfig`]: written once at `init`; never mutated.
//! - The ledger: per-contributor [`ContributionRecord`]s plus aggregate
//!   totals and the two latches (`open_date`, `closed`), see [`crate::storage`].
//!
//! ### State is derived, not stored
//!
//! [`HatchState`] is recomputed on every query from the clock and the ledger:
//!
//! ```text
//! Pending ──► Funding ──► GoalReached ──► Closed
//!                  └────► Refunding
//! ```
//!
//! `Closed` is the only state backed by a stored latch. `Refunding` is the
//! terminal failure state.

use soroban_sdk::{contracttype, Address};

/// What contributors pay with.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContributionMedium {
    /// A token contract; contributions are pulled through an allowance.
    Token(Address),
    /// The native asset (through its asset contract); the contributor attaches
    /// the value to the call and any excess is returned in the same call.
    Native(Address),
}

impl ContributionMedium {
    /// Address of the asset contract that moves the contribution currency.
    pub fn asset(&self) -> &Address {
        match self {
            ContributionMedium::Token(token) => token,
            ContributionMedium::Native(native) => native,
        }
    }
}

/// Immutable hatch configuration, written once at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HatchConfig {
    /// Currency accepted from contributors.
    pub contribution_medium: ContributionMedium,
    /// Vesting ledger that mints and burns the project token.
    pub token_manager: Address,
    /// Treasury receiving the bulk of raised funds at close.
    pub reserve: Address,
    /// Receives a cut of the funds and the unoffered project-token supply.
    pub beneficiary: Address,
    /// Hard cap on `total_raised`; contributions beyond it are clamped.
    pub max_goal: i128,
    /// Raise needed by the end of the period to avoid refunding.
    pub min_goal: i128,
    /// Length of the funding window, in seconds.
    pub period: u64,
    /// Project-token units per contribution unit, scaled by `PPM`.
    pub exchange_rate: i128,
    /// Vesting cliff, in seconds after `open_date`.
    pub vesting_cliff_period: u64,
    /// Vesting completion, in seconds after `open_date`.
    pub vesting_complete_period: u64,
    /// Share of the final project-token supply sold to contributors (ppm).
    pub supply_offered_pct: u32,
    /// Share of raised funds sent to the beneficiary at close (ppm).
    pub funding_for_beneficiary_pct: u32,
    /// Start of the funding window; `0` until `open()` is called.
    pub open_date: u64,
}

/// Current lifecycle state of the hatch.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HatchState {
    /// Not yet opened, or the open date is still in the future.
    Pending,
    /// Accepting contributions.
    Funding,
    /// Period over without reaching the min goal; contributions can be refunded.
    Refunding,
    /// Max goal hit, or min goal hit by the end of the period; ready to close.
    GoalReached,
    /// Funds settled. Terminal.
    Closed,
}

/// One accepted contribution. Zeroed (not removed) once refunded so that
/// record indices stay stable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRecord {
    /// Contribution-currency units accepted (after clamping).
    pub value: i128,
    /// Project tokens minted under vesting for this contribution.
    pub amount: i128,
    /// Schedule id returned by the token manager.
    pub vesting_id: u32,
}

impl ContributionRecord {
    pub fn is_live(&self) -> bool {
        self.value > 0
    }
}
