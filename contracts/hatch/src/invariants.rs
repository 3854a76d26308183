#![allow(dead_code)]

extern crate std;

use crate::types::HatchState;
use crate::HatchClient;
use soroban_sdk::Address;

/// INV-1: the raised total never exceeds the max goal.
pub fn assert_within_cap(hatch: &HatchClient, max_goal: i128) {
    let raised = hatch.total_raised();
    assert!(
        raised <= max_goal,
        "INV-1 violated: raised {} above max goal {}",
        raised,
        max_goal
    );
}

/// INV-2: while nothing has been refunded, the live contributions of all
/// contributors add up to the raised total.
pub fn assert_ledger_matches_total(hatch: &HatchClient, contributors: &[Address]) {
    let sum: i128 = contributors.iter().map(|c| hatch.contributions(c)).sum();
    assert_eq!(
        sum,
        hatch.total_raised(),
        "INV-2 violated: contributions sum to {} but total is {}",
        sum,
        hatch.total_raised()
    );
}

/// INV-3: the live balance of a contributor is the sum of its records.
pub fn assert_records_match_balance(hatch: &HatchClient, contributor: &Address) {
    let sum: i128 = hatch
        .get_contributions(contributor)
        .iter()
        .map(|r| r.value)
        .sum();
    assert_eq!(
        sum,
        hatch.contributions(contributor),
        "INV-3 violated: records sum to {} but balance is {}",
        sum,
        hatch.contributions(contributor)
    );
}

/// INV-4: state only moves forward.
///   Pending -> Funding | Refunding (a window that passed unobserved)
///   Funding -> GoalReached | Refunding
///   GoalReached -> Closed
///   Refunding, Closed -> (none)
pub fn assert_valid_state_transition(from: HatchState, to: HatchState) {
    let valid = from == to
        || matches!(
            (from, to),
            (HatchState::Pending, HatchState::Funding)
                | (HatchState::Pending, HatchState::Refunding)
                | (HatchState::Funding, HatchState::GoalReached)
                | (HatchState::Funding, HatchState::Refunding)
                | (HatchState::GoalReached, HatchState::Closed)
        );

    assert!(
        valid,
        "INV-4 violated: invalid state transition from {:?} to {:?}",
        from,
        to
    );
}
