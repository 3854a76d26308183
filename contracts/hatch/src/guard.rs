//! Single-writer latch around every mutating entry point.
//!
//! `enter` is taken after the cheap checks and before any external call;
//! `exit` is the last statement of the entry point. A panic in between
//! reverts the whole invocation, latch included, so the latch can never be
//! left set by a failed call.

use soroban_sdk::{panic_with_error, Env};

use crate::storage;
use crate::Error;

pub fn enter(env: &Env) {
    if storage::is_busy(env) {
        panic_with_error!(env, Error::Reentrant);
    }
    storage::set_busy(env, true);
}

pub fn exit(env: &Env) {
    storage::set_busy(env, false);
}
