//! Interface of the vesting ledger that owns the project token.
//!
//! The hatch never tracks vesting itself: it asks the token manager to mint
//! tokens under a schedule and, on refund, to revoke that schedule and burn
//! what it holds.

use soroban_sdk::{contractclient, Address};

#[contractclient(name = "TokenManagerClient")]
pub trait TokenManager {
    /// Address of the project token this manager controls.
    fn token() -> Address;

    /// Mint freely transferable tokens to `to`.
    fn mint(to: Address, amount: i128);

    /// Mint `amount` to `to` locked under a vesting schedule.
    /// Returns the schedule id, unique per holder.
    fn mint_vested(
        to: Address,
        amount: i128,
        start: u64,
        cliff: u64,
        vested: u64,
        revokable: bool,
    ) -> u32;

    /// Revoke schedule `vesting_id` of `holder` and burn its tokens.
    /// Returns the amount burned.
    fn revoke_and_burn(holder: Address, vesting_id: u32) -> i128;

    fn total_supply() -> i128;

    fn balance(id: Address) -> i128;
}
