//! # Settlement
//!
//! The two ways a hatch ends:
//!
//! - [`close`]: success. Latches `closed`, sends the beneficiary its cut of
//!   the raised funds and the reserve everything else, and mints the
//!   unoffered project-token supply to the beneficiary.
//! - [`refund`] / [`refund_all`]: failure. Each live record is zeroed, its
//!   value sent back to the contributor and its vesting revoked and burned.
//!
//! As in [`crate::contribution`], the latch and ledger writes come first and
//! the token calls last.

use soroban_sdk::{log, panic_with_error, token, Address, Env, Vec};

use crate::lifecycle;
use crate::math;
use crate::storage;
use crate::token_manager::TokenManagerClient;
use crate::types::{ContributionRecord, HatchConfig, HatchState};
use crate::{events, Error};

pub fn close(env: &Env, config: &HatchConfig) {
    if lifecycle::current_state(env, config) != HatchState::GoalReached {
        panic_with_error!(env, Error::InvalidState);
    }

    storage::set_closed(env);

    let total_raised = storage::get_total_raised(env);
    let (beneficiary_funds, _) = math::split_funds(total_raised, config.funding_for_beneficiary_pct)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    let beneficiary_tokens =
        math::beneficiary_tokens(storage::get_tokens_minted(env), config.supply_offered_pct)
            .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));

    let hatch = env.current_contract_address();
    let asset = token::Client::new(env, config.contribution_medium.asset());
    if beneficiary_funds > 0 {
        asset.transfer(&hatch, &config.beneficiary, &beneficiary_funds);
    }
    // Whatever is left, including value sent to the hatch outside `contribute`.
    let reserve_funds = asset.balance(&hatch);
    if reserve_funds > 0 {
        asset.transfer(&hatch, &config.reserve, &reserve_funds);
    }
    log!(env, "hatch settled", beneficiary_funds, reserve_funds, beneficiary_tokens);

    if beneficiary_tokens > 0 {
        TokenManagerClient::new(env, &config.token_manager).mint(&config.beneficiary, &beneficiary_tokens);
    }

    events::emit_closed(env, total_raised, beneficiary_funds, reserve_funds, beneficiary_tokens);
}

/// Refund the record at `index` of `contributor`.
pub fn refund(env: &Env, config: &HatchConfig, contributor: &Address, index: u32) {
    require_refunding(env, config);

    let record = take_record(env, contributor, index)
        .unwrap_or_else(|| panic_with_error!(env, Error::NothingToRefund));

    send_back(env, config, contributor, record.value);
    revoke(env, config, contributor, index, &record);
}

/// Refund every live record of `contributor`. Returns the total value returned.
pub fn refund_all(env: &Env, config: &HatchConfig, contributor: &Address) -> i128 {
    require_refunding(env, config);

    let mut taken: Vec<(u32, ContributionRecord)> = Vec::new(env);
    let mut total: i128 = 0;
    for index in 0..storage::get_record_count(env, contributor) {
        if let Some(record) = take_record(env, contributor, index) {
            total += record.value;
            taken.push_back((index, record));
        }
    }
    if taken.is_empty() {
        panic_with_error!(env, Error::NothingToRefund);
    }

    send_back(env, config, contributor, total);
    for (index, record) in taken.iter() {
        revoke(env, config, contributor, index, &record);
    }
    total
}

fn require_refunding(env: &Env, config: &HatchConfig) {
    if lifecycle::current_state(env, config) != HatchState::Refunding {
        panic_with_error!(env, Error::InvalidState);
    }
}

/// Zero the live record at `index` and drop its tokens from the minted
/// total. `None` if there was nothing live there.
fn take_record(env: &Env, contributor: &Address, index: u32) -> Option<ContributionRecord> {
    let record = storage::get_record(env, contributor, index).filter(|r| r.is_live())?;
    storage::clear_record(env, contributor, index, &record);
    let minted = storage::get_tokens_minted(env);
    storage::set_tokens_minted(env, minted - record.amount);
    Some(record)
}

fn send_back(env: &Env, config: &HatchConfig, contributor: &Address, value: i128) {
    let hatch = env.current_contract_address();
    token::Client::new(env, config.contribution_medium.asset()).transfer(&hatch, contributor, &value);
}

fn revoke(env: &Env, config: &HatchConfig, contributor: &Address, index: u32, record: &ContributionRecord) {
    TokenManagerClient::new(env, &config.token_manager).revoke_and_burn(contributor, &record.vesting_id);
    events::emit_refunded(env, contributor.clone(), record.value, record.amount, index);
}
