//! # Hatch Contract
//!
//! A time-boxed fundraising contract. Contributors pay in a configured
//! currency during the funding window and receive project tokens under a
//! vesting schedule; the hatch then either closes (funds routed to the
//! beneficiary and the reserve) or refunds every contribution.
//!
//! | Phase        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Bootstrap    | [`Hatch::init`]                                  |
//! | Role admin   | `grant_role`, `revoke_role`, `transfer_super_admin`, `set_contributions_gated` |
//! | Activation   | [`Hatch::open`]                                  |
//! | Funding      | [`Hatch::contribute`]                            |
//! | Success      | [`Hatch::close`]                                 |
//! | Failure      | [`Hatch::refund`], [`Hatch::refund_all`]         |
//! | Queries      | `state`, `total_raised`, `contributions`, config getters |
//!
//! ## Architecture
//!
//! - [`lifecycle`] derives the state; nothing caches it.
//! - [`contribution`] and [`settlement`] hold the business logic.
//! - [`storage`] is the ledger; [`rbac`] is the authorization capability.
//! - Every mutating entry point runs inside [`guard`].

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, panic_with_error, Address, Env, Vec};

mod contribution;
pub mod events;
mod guard;
mod lifecycle;
mod math;
pub mod rbac;
mod settlement;
mod storage;
pub mod token_manager;
mod types;
mod validation;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_fixture;
#[cfg(test)]
mod test_events;

pub use math::PPM;
pub use rbac::Role;
pub use token_manager::TokenManagerClient;
pub use types::{ContributionMedium, ContributionRecord, HatchConfig, HatchState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidState = 4,
    InvalidContributionValue = 5,
    NothingToRefund = 6,
    InvalidContributionToken = 7,
    ContractIsEoa = 8,
    InvalidTimePeriod = 9,
    InvalidMinGoal = 10,
    InvalidMaxGoal = 11,
    InvalidPct = 12,
    InvalidBeneficiary = 13,
    InvalidExchangeRate = 14,
    Overflow = 15,
    Reentrant = 16,
}

#[contract]
pub struct Hatch;

#[contractimpl]
impl Hatch {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the hatch with `config` and set the first SuperAdmin.
    ///
    /// Must be called exactly once. Subsequent calls panic with
    /// `Error::AlreadyInitialized`. The configuration is validated against the
    /// current ledger time and is never rewritten afterwards.
    pub fn init(env: Env, super_admin: Address, config: HatchConfig) {
        super_admin.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        validation::validate(&env, &config, lifecycle::now(&env));

        let project_token = TokenManagerClient::new(&env, &config.token_manager).token();
        rbac::init_super_admin(&env, &super_admin);
        storage::save_config(&env, &config, &project_token);
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`. `caller` must hold `SuperAdmin` or `Admin`.
    /// `SuperAdmin` itself is never granted; see `transfer_super_admin`.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) {
        caller.require_auth();
        rbac::grant_role(&env, &caller, &target, role);
    }

    /// Revoke any role from `target`. Cannot remove the SuperAdmin.
    pub fn revoke_role(env: Env, caller: Address, target: Address) {
        caller.require_auth();
        rbac::revoke_role(&env, &caller, &target);
    }

    pub fn transfer_super_admin(env: Env, current_super_admin: Address, new_super_admin: Address) {
        current_super_admin.require_auth();
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin);
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::role_of(&env, address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, address, role)
    }

    /// Restrict contributions to `Contributor` holders (and admins), or lift
    /// the restriction.
    pub fn set_contributions_gated(env: Env, caller: Address, gated: bool) {
        caller.require_auth();
        rbac::set_contributions_gated(&env, &caller, gated);
    }

    pub fn contributions_gated(env: Env) -> bool {
        rbac::contributions_gated(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Start the funding window now.
    ///
    /// Only valid when the hatch was initialised without an open date, and
    /// only once. `caller` must hold `Opener`, `Admin` or `SuperAdmin`.
    pub fn open(env: Env, caller: Address) {
        caller.require_auth();
        rbac::require_can_open(&env, &caller);
        storage::load_config(&env);
        guard::enter(&env);

        if storage::get_open_date(&env) != 0 {
            panic_with_error!(&env, Error::InvalidState);
        }
        let now = lifecycle::now(&env);
        storage::set_open_date(&env, now);
        events::emit_opened(&env, now);

        guard::exit(&env);
    }

    /// Contribute `value` units. `attached` is the native value attached to
    /// the call: it must equal `value` for a native-currency hatch and be `0`
    /// for a token hatch, where the value is pulled through an allowance
    /// granted to the hatch.
    ///
    /// Only the part that fits under the max goal is accepted. Returns the
    /// index of the new contribution record.
    pub fn contribute(env: Env, contributor: Address, value: i128, attached: i128) -> u32 {
        contributor.require_auth();
        rbac::require_can_contribute(&env, &contributor);
        let config = storage::load_config(&env);
        guard::enter(&env);

        let index = contribution::contribute(&env, &config, &contributor, value, attached);

        guard::exit(&env);
        index
    }

    /// Settle a successful hatch. `caller` must hold `Closer`, `Admin` or
    /// `SuperAdmin`.
    pub fn close(env: Env, caller: Address) {
        caller.require_auth();
        rbac::require_can_close(&env, &caller);
        let config = storage::load_config(&env);
        guard::enter(&env);

        settlement::close(&env, &config);

        guard::exit(&env);
    }

    /// Refund the contribution record `index` of `contributor`. Anyone may
    /// trigger it; the funds only go back to `contributor`.
    pub fn refund(env: Env, contributor: Address, index: u32) {
        let config = storage::load_config(&env);
        guard::enter(&env);

        settlement::refund(&env, &config, &contributor, index);

        guard::exit(&env);
    }

    /// Refund every live record of `contributor`. Returns the value returned.
    pub fn refund_all(env: Env, contributor: Address) -> i128 {
        let config = storage::load_config(&env);
        guard::enter(&env);

        let refunded = settlement::refund_all(&env, &config, &contributor);

        guard::exit(&env);
        refunded
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn state(env: Env) -> HatchState {
        let config = storage::load_config(&env);
        lifecycle::current_state(&env, &config)
    }

    pub fn is_closed(env: Env) -> bool {
        storage::is_closed(&env)
    }

    /// Lifetime contribution units accepted. Refunds do not lower it.
    pub fn total_raised(env: Env) -> i128 {
        storage::get_total_raised(&env)
    }

    /// Project tokens currently minted to contributors (refunds deducted).
    pub fn tokens_minted(env: Env) -> i128 {
        storage::get_tokens_minted(&env)
    }

    /// Live (unrefunded) contribution units of `contributor`.
    pub fn contributions(env: Env, contributor: Address) -> i128 {
        storage::get_balance(&env, &contributor)
    }

    pub fn contribution(env: Env, contributor: Address, index: u32) -> Option<ContributionRecord> {
        storage::get_record(&env, &contributor, index)
    }

    pub fn contribution_count(env: Env, contributor: Address) -> u32 {
        storage::get_record_count(&env, &contributor)
    }

    pub fn get_contributions(env: Env, contributor: Address) -> Vec<ContributionRecord> {
        storage::get_records(&env, &contributor)
    }

    /// Project tokens a contribution of `value` would mint.
    pub fn contribution_to_tokens(env: Env, value: i128) -> i128 {
        let config = storage::load_config(&env);
        math::contribution_to_tokens(value, config.exchange_rate)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow))
    }

    pub fn exchange_rate(env: Env) -> i128 {
        storage::load_config(&env).exchange_rate
    }

    pub fn config(env: Env) -> HatchConfig {
        storage::load_config(&env)
    }

    /// Start of the funding window, `0` while not opened.
    pub fn open_date(env: Env) -> u64 {
        storage::get_open_date(&env)
    }

    pub fn max_goal(env: Env) -> i128 {
        storage::load_config(&env).max_goal
    }

    pub fn min_goal(env: Env) -> i128 {
        storage::load_config(&env).min_goal
    }

    pub fn period(env: Env) -> u64 {
        storage::load_config(&env).period
    }

    pub fn vesting_cliff_period(env: Env) -> u64 {
        storage::load_config(&env).vesting_cliff_period
    }

    pub fn vesting_complete_period(env: Env) -> u64 {
        storage::load_config(&env).vesting_complete_period
    }

    pub fn supply_offered_pct(env: Env) -> u32 {
        storage::load_config(&env).supply_offered_pct
    }

    pub fn funding_for_beneficiary_pct(env: Env) -> u32 {
        storage::load_config(&env).funding_for_beneficiary_pct
    }

    pub fn beneficiary(env: Env) -> Address {
        storage::load_config(&env).beneficiary
    }

    pub fn reserve(env: Env) -> Address {
        storage::load_config(&env).reserve
    }

    /// The project token.
    pub fn token(env: Env) -> Address {
        storage::get_project_token(&env)
    }

    /// Asset contract of the contribution currency.
    pub fn contribution_token(env: Env) -> Address {
        storage::load_config(&env).contribution_medium.asset().clone()
    }

    pub fn token_manager(env: Env) -> Address {
        storage::load_config(&env).token_manager
    }
}
