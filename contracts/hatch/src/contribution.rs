//! # Contribution processor
//!
//! Validates a contribution, clamps it to the remaining capacity, records it
//! in the ledger and asks the token manager to mint the vested reward.
//!
//! Ordering: every ledger write (new record, `total_raised`, `tokens_minted`)
//! lands before the first external call. The only write after an external
//! call is the vesting id returned by the token manager, which nothing reads
//! until a refund.

use soroban_sdk::{log, panic_with_error, token, Address, Env};

use crate::lifecycle;
use crate::math;
use crate::storage;
use crate::token_manager::TokenManagerClient;
use crate::types::{ContributionMedium, ContributionRecord, HatchConfig, HatchState};
use crate::{events, Error};

/// Record a contribution of `value` from `contributor`. `attached` is the
/// native value attached to the call (must be `0` for token contributions).
///
/// Returns the index of the new record.
pub fn contribute(env: &Env, config: &HatchConfig, contributor: &Address, value: i128, attached: i128) -> u32 {
    if lifecycle::current_state(env, config) != HatchState::Funding {
        panic_with_error!(env, Error::InvalidState);
    }
    if value <= 0 {
        panic_with_error!(env, Error::InvalidContributionValue);
    }
    match &config.contribution_medium {
        ContributionMedium::Token(_) if attached != 0 => {
            panic_with_error!(env, Error::InvalidContributionValue)
        }
        ContributionMedium::Native(_) if attached != value => {
            panic_with_error!(env, Error::InvalidContributionValue)
        }
        _ => {}
    }

    let total_raised = storage::get_total_raised(env);
    let remaining = config.max_goal - total_raised;
    let accepted = if value > remaining { remaining } else { value };
    if accepted < value {
        log!(env, "contribution clamped", value, accepted);
    }

    let amount = math::contribution_to_tokens(accepted, config.exchange_rate)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    let new_total = total_raised
        .checked_add(accepted)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    let new_minted = storage::get_tokens_minted(env)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    let open_date = storage::get_open_date(env);
    let (start, cliff, complete) = lifecycle::vesting_dates(open_date, config)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));

    // Effects.
    let record = ContributionRecord {
        value: accepted,
        amount,
        vesting_id: 0,
    };
    let index = storage::append_record(env, contributor, &record);
    storage::set_total_raised(env, new_total);
    storage::set_tokens_minted(env, new_minted);

    // Interactions.
    pull_funds(env, &config.contribution_medium, contributor, accepted, attached);

    let token_manager = TokenManagerClient::new(env, &config.token_manager);
    let vesting_id = token_manager.mint_vested(contributor, &amount, &start, &cliff, &complete, &true);
    storage::set_vesting_id(env, contributor, index, vesting_id);

    events::emit_contributed(env, contributor.clone(), accepted, amount, index);
    index
}

/// Move `accepted` units from `contributor` into the hatch.
///
/// Token contributions pull exactly `accepted` through the allowance, so the
/// excess is never charged. Native contributions take the whole attached
/// value and hand the excess straight back.
fn pull_funds(env: &Env, medium: &ContributionMedium, contributor: &Address, accepted: i128, attached: i128) {
    let hatch = env.current_contract_address();
    let asset = token::Client::new(env, medium.asset());
    match medium {
        ContributionMedium::Token(_) => {
            asset.transfer_from(&hatch, contributor, &hatch, &accepted);
        }
        ContributionMedium::Native(_) => {
            asset.transfer(contributor, &hatch, &attached);
            let excess = attached - accepted;
            if excess > 0 {
                asset.transfer(&hatch, contributor, &excess);
            }
        }
    }
}
