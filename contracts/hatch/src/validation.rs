//! Validation of [`HatchConfig`] at `init`.
//!
//! Checks run in a fixed order so that a config with several problems always
//! reports the same error.

use soroban_sdk::{panic_with_error, Address, Env, String};

use crate::math::PPM;
use crate::types::{ContributionMedium, HatchConfig};
use crate::Error;

/// Strkey of the all-zero account key; treated as the null address.
pub const NULL_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Length of a contract (`C...`) or account (`G...`) strkey.
const STRKEY_LEN: u32 = 56;

/// `true` if `address` is a contract rather than an account.
pub fn is_contract(address: &Address) -> bool {
    let strkey = address.to_string();
    if strkey.len() != STRKEY_LEN {
        return false;
    }
    let mut buf = [0u8; STRKEY_LEN as usize];
    strkey.copy_into_slice(&mut buf);
    buf[0] == b'C'
}

pub fn is_null(env: &Env, address: &Address) -> bool {
    address.to_string() == String::from_str(env, NULL_ADDRESS)
}

/// Panic with the matching `Error` if `config` is unusable at time `now`.
pub fn validate(env: &Env, config: &HatchConfig, now: u64) {
    if let ContributionMedium::Token(token) = &config.contribution_medium {
        if !is_contract(token) {
            panic_with_error!(env, Error::InvalidContributionToken);
        }
    }
    if !is_contract(&config.reserve) || !is_contract(&config.token_manager) {
        panic_with_error!(env, Error::ContractIsEoa);
    }

    if config.open_date != 0 && config.open_date < now {
        panic_with_error!(env, Error::InvalidTimePeriod);
    }
    if config.period == 0
        || config.vesting_cliff_period < config.period
        || config.vesting_complete_period < config.vesting_cliff_period
    {
        panic_with_error!(env, Error::InvalidTimePeriod);
    }

    if config.min_goal <= 0 {
        panic_with_error!(env, Error::InvalidMinGoal);
    }
    if config.max_goal < config.min_goal {
        panic_with_error!(env, Error::InvalidMaxGoal);
    }

    let supply_offered = config.supply_offered_pct as i128;
    if supply_offered == 0 || supply_offered > PPM {
        panic_with_error!(env, Error::InvalidPct);
    }
    if config.funding_for_beneficiary_pct as i128 > PPM {
        panic_with_error!(env, Error::InvalidPct);
    }

    if is_null(env, &config.beneficiary) {
        panic_with_error!(env, Error::InvalidBeneficiary);
    }

    if config.exchange_rate <= 0 {
        panic_with_error!(env, Error::InvalidExchangeRate);
    }
}
