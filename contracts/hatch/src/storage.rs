//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers. This module *is* the
//! hatch ledger: nothing else touches `env.storage()` except [`crate::rbac`].
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type          | Description                                 |
//! |----------------|---------------|---------------------------------------------|
//! | `Config`       | `HatchConfig` | Immutable configuration                     |
//! | `ProjectToken` | `Address`     | Token minted by the token manager           |
//! | `OpenDate`     | `u64`         | Activation latch; `0` until opened          |
//! | `TotalRaised`  | `i128`        | Lifetime contribution units accepted        |
//! | `TokensMinted` | `i128`        | Live project tokens minted to contributors  |
//! | `Closed`       | `bool`        | Terminal success latch                      |
//! | `Busy`         | `bool`        | Re-entrancy latch, see [`crate::guard`]     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type                 | Description                      |
//! |---------------------------|----------------------|----------------------------------|
//! | `RecordCount(addr)`       | `u32`                | Records ever appended for `addr` |
//! | `Record(addr, index)`     | `ContributionRecord` | One itemized contribution        |
//! | `Balance(addr)`           | `i128`               | Live (unrefunded) value of `addr`|
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! `TotalRaised` is never decremented by refunds: it is the lifetime amount
//! raised. The per-contributor `Balance` is the live figure.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::types::{ContributionRecord, HatchConfig};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    ProjectToken,
    OpenDate,
    TotalRaised,
    TokensMinted,
    Closed,
    Busy,
    RecordCount(Address),
    Record(Address, u32),
    Balance(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Store the configuration and the project token. Written exactly once.
pub fn save_config(env: &Env, config: &HatchConfig, project_token: &Address) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .set(&DataKey::ProjectToken, project_token);
    env.storage()
        .instance()
        .set(&DataKey::OpenDate, &config.open_date);
    bump_instance(env);
}

/// Load the configuration. Panics with `Error::NotInitialized` before `init`.
pub fn load_config(env: &Env) -> HatchConfig {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Config) {
        Some(config) => config,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn get_project_token(env: &Env) -> Address {
    match env.storage().instance().get(&DataKey::ProjectToken) {
        Some(token) => token,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn get_open_date(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::OpenDate)
        .unwrap_or(0)
}

pub fn set_open_date(env: &Env, open_date: u64) {
    env.storage().instance().set(&DataKey::OpenDate, &open_date);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &total);
}

pub fn get_tokens_minted(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TokensMinted)
        .unwrap_or(0)
}

pub fn set_tokens_minted(env: &Env, minted: i128) {
    env.storage().instance().set(&DataKey::TokensMinted, &minted);
}

pub fn is_closed(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Closed)
        .unwrap_or(false)
}

pub fn set_closed(env: &Env) {
    env.storage().instance().set(&DataKey::Closed, &true);
}

pub fn is_busy(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Busy)
        .unwrap_or(false)
}

pub fn set_busy(env: &Env, busy: bool) {
    if busy {
        env.storage().instance().set(&DataKey::Busy, &true);
    } else {
        env.storage().instance().remove(&DataKey::Busy);
    }
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Number of records ever appended for `contributor`, refunded ones included.
pub fn get_record_count(env: &Env, contributor: &Address) -> u32 {
    let key = DataKey::RecordCount(contributor.clone());
    let count = env.storage().persistent().get(&key).unwrap_or(0);
    if count > 0 {
        bump_persistent(env, &key);
    }
    count
}

pub fn get_record(env: &Env, contributor: &Address, index: u32) -> Option<ContributionRecord> {
    let key = DataKey::Record(contributor.clone(), index);
    let record: Option<ContributionRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

pub fn save_record(env: &Env, contributor: &Address, index: u32, record: &ContributionRecord) {
    let key = DataKey::Record(contributor.clone(), index);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

/// Append a record for `contributor` and add its value to the live balance.
/// Returns the index of the new record.
pub fn append_record(env: &Env, contributor: &Address, record: &ContributionRecord) -> u32 {
    let index = get_record_count(env, contributor);
    save_record(env, contributor, index, record);

    let count_key = DataKey::RecordCount(contributor.clone());
    env.storage().persistent().set(&count_key, &(index + 1));
    bump_persistent(env, &count_key);

    let balance = get_balance(env, contributor);
    set_balance(env, contributor, balance + record.value);
    index
}

/// Zero `record`, stored at `index`, and drop its value from the live balance.
pub fn clear_record(env: &Env, contributor: &Address, index: u32, record: &ContributionRecord) {
    let cleared = ContributionRecord {
        value: 0,
        amount: 0,
        vesting_id: record.vesting_id,
    };
    save_record(env, contributor, index, &cleared);

    let balance = get_balance(env, contributor);
    set_balance(env, contributor, balance - record.value);
}

pub fn set_vesting_id(env: &Env, contributor: &Address, index: u32, vesting_id: u32) {
    if let Some(mut record) = get_record(env, contributor, index) {
        record.vesting_id = vesting_id;
        save_record(env, contributor, index, &record);
    }
}

/// All records of `contributor` in index order, refunded ones included.
pub fn get_records(env: &Env, contributor: &Address) -> Vec<ContributionRecord> {
    let mut records = Vec::new(env);
    for index in 0..get_record_count(env, contributor) {
        if let Some(record) = get_record(env, contributor, index) {
            records.push_back(record);
        }
    }
    records
}

pub fn get_balance(env: &Env, contributor: &Address) -> i128 {
    let key = DataKey::Balance(contributor.clone());
    let balance = env.storage().persistent().get(&key).unwrap_or(0);
    if balance > 0 {
        bump_persistent(env, &key);
    }
    balance
}

fn set_balance(env: &Env, contributor: &Address, balance: i128) {
    let key = DataKey::Balance(contributor.clone());
    env.storage().persistent().set(&key, &balance);
    bump_persistent(env, &key);
}
