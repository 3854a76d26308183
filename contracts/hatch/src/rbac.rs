//! # RBAC: Role-Based Access Control
//!
//! The authorization capability the hatch consults before every privileged
//! call. Role hierarchy:
//!
//! ```text
//! SuperAdmin
//!     ├── Admin
//!     ├── Opener
//!     ├── Closer
//!     └── Contributor
//! ```
//!
//! ## Storage layout
//!
//! - `RbacKey::SuperAdmin` → `Address`: the one and only super-admin.
//! - `RbacKey::Role(addr)` → `Role`: the role held by `addr`, if any.
//! - `RbacKey::ContributionsGated` → `bool`: when set, only holders of
//!   `Contributor` (or an admin role) may contribute. Unset means anyone may.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger |
//! |--------------------|---------|
//! | `role_set`         | Role granted or replaced |
//! | `role_del`         | Role revoked |
//! | `gate`             | Contribution gate toggled |
//!
//! ## Threat model notes
//!
//! - There is exactly one `SuperAdmin`; it is never granted, only moved.
//! - `SuperAdmin` cannot be removed via `revoke_role`; use `transfer_super_admin`.
//! - An address holds **at most one role** at a time; granting a new role replaces the old one.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::Error;

/// The set of roles that can be assigned to an address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Full control: can grant/revoke any role.
    SuperAdmin,
    /// Can grant/revoke non-SuperAdmin roles, open, close and gate contributions.
    Admin,
    /// Can call `open`.
    Opener,
    /// Can call `close`.
    Closer,
    /// Can contribute while contributions are gated.
    Contributor,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Role(Address),
    SuperAdmin,
    ContributionsGated,
}

// ─────────────────────────────────────────────────────────
// Storage helpers (private)
// ─────────────────────────────────────────────────────────

fn store_role(env: &Env, address: &Address, role: &Role) {
    env.storage()
        .persistent()
        .set(&RbacKey::Role(address.clone()), role);
}

fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(address.clone()));
}

/// Role held by `address`, if any.
pub fn get_role(env: &Env, address: &Address) -> Option<Role> {
    env.storage()
        .persistent()
        .get(&RbacKey::Role(address.clone()))
}

/// The current super-admin. `None` only before `init`.
pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&RbacKey::SuperAdmin)
}

fn is_super_admin(env: &Env, address: &Address) -> bool {
    get_super_admin(env).as_ref() == Some(address)
}

/// Seat `address` as the super-admin. Both keys move together so the
/// `SuperAdmin` pointer and the role entry never disagree.
fn seat_super_admin(env: &Env, address: &Address) {
    env.storage().persistent().set(&RbacKey::SuperAdmin, address);
    store_role(env, address, &Role::SuperAdmin);
}

// ─────────────────────────────────────────────────────────
// Initialisation
// ─────────────────────────────────────────────────────────

/// Seat the deployer-chosen super-admin during `init`.
///
/// Panics with `Error::AlreadyInitialized` if a super-admin already exists.
pub fn init_super_admin(env: &Env, super_admin: &Address) {
    if get_super_admin(env).is_some() {
        panic_with_error_rbac(env, Error::AlreadyInitialized);
    }
    seat_super_admin(env, super_admin);
    emit_role_set(env, super_admin, &Role::SuperAdmin, None);
}

// ─────────────────────────────────────────────────────────
// Role assignment
// ─────────────────────────────────────────────────────────

/// Give `target` one of the operational roles: `Admin`, `Opener`, `Closer`
/// or `Contributor`. Any role `target` held before is replaced.
///
/// `caller` must be the super-admin or an `Admin`. There is exactly one
/// `SuperAdmin`, so it cannot be granted here and the seated super-admin
/// cannot be given a lesser role; both go through [`transfer_super_admin`].
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) {
    require_admin_or_above(env, caller);
    if role == Role::SuperAdmin || is_super_admin(env, target) {
        panic_with_error_rbac(env, Error::NotAuthorized);
    }

    store_role(env, target, &role);
    emit_role_set(env, target, &role, Some(caller));
}

/// Take away the role of `target`. From then on `target` can no longer open,
/// close, or contribute while the gate is on.
///
/// `caller` must be the super-admin or an `Admin`. Revoking the super-admin
/// is refused; revoking from an address without a role does nothing.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) {
    require_admin_or_above(env, caller);
    if is_super_admin(env, target) {
        panic_with_error_rbac(env, Error::NotAuthorized);
    }

    if get_role(env, target).is_some() {
        clear_role(env, target);
        emit_role_del(env, target, caller);
    }
}

/// Move the super-admin seat from `current` to `new`.
///
/// `current` ends up with no role at all. Whatever role `new` held is
/// replaced by `SuperAdmin`.
pub fn transfer_super_admin(env: &Env, current: &Address, new: &Address) {
    require_role(env, current, &Role::SuperAdmin);

    clear_role(env, current);
    seat_super_admin(env, new);

    emit_role_del(env, current, current);
    emit_role_set(env, new, &Role::SuperAdmin, Some(current));
}

/// Turn the contribution gate on or off. `caller` must be an admin.
pub fn set_contributions_gated(env: &Env, caller: &Address, gated: bool) {
    require_admin_or_above(env, caller);
    env.storage()
        .persistent()
        .set(&RbacKey::ContributionsGated, &gated);
    env.events()
        .publish((symbol_short!("gate"), caller.clone()), gated);
}

pub fn contributions_gated(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&RbacKey::ContributionsGated)
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Access guards
// ─────────────────────────────────────────────────────────

/// Assert that `address` holds exactly `required_role`.
pub fn require_role(env: &Env, address: &Address, required_role: &Role) {
    match get_role(env, address) {
        Some(ref r) if r == required_role => {}
        _ => panic_with_error_rbac(env, Error::NotAuthorized),
    }
}

/// Assert that `address` holds one of the roles in `allowed`.
pub fn require_any_of(env: &Env, address: &Address, allowed: &[Role]) {
    if let Some(ref r) = get_role(env, address) {
        if allowed.contains(r) {
            return;
        }
    }
    panic_with_error_rbac(env, Error::NotAuthorized);
}

#[inline]
pub fn require_admin_or_above(env: &Env, address: &Address) {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin]);
}

/// Gate for `open`.
#[inline]
pub fn require_can_open(env: &Env, address: &Address) {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin, Role::Opener]);
}

/// Gate for `close`.
#[inline]
pub fn require_can_close(env: &Env, address: &Address) {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin, Role::Closer]);
}

/// Gate for `contribute`; open to everyone unless the gate is on.
pub fn require_can_contribute(env: &Env, address: &Address) {
    if contributions_gated(env) {
        require_any_of(
            env,
            address,
            &[Role::SuperAdmin, Role::Admin, Role::Contributor],
        );
    }
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

pub fn role_of(env: &Env, address: Address) -> Option<Role> {
    get_role(env, &address)
}

pub fn has_role(env: &Env, address: Address, role: Role) -> bool {
    get_role(env, &address).map(|r| r == role).unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

/// Topic: `(role_set, target, role_symbol)`, data: `Option<granted_by>`.
/// `granted_by` is `None` only for the super-admin seated at `init`.
fn emit_role_set(env: &Env, target: &Address, role: &Role, by: Option<&Address>) {
    let topics = (symbol_short!("role_set"), target.clone(), role_to_symbol(role));
    env.events().publish(topics, by.cloned());
}

/// Topic: `(role_del, target)`, data: `Option<revoked_by>`.
fn emit_role_del(env: &Env, target: &Address, by: &Address) {
    env.events()
        .publish((symbol_short!("role_del"), target.clone()), Some(by.clone()));
}

fn role_to_symbol(role: &Role) -> Symbol {
    match role {
        Role::SuperAdmin => symbol_short!("supadmin"),
        Role::Admin => symbol_short!("admin"),
        Role::Opener => symbol_short!("opener"),
        Role::Closer => symbol_short!("closer"),
        Role::Contributor => symbol_short!("contrib"),
    }
}

#[inline(always)]
fn panic_with_error_rbac(env: &Env, err: Error) -> ! {
    soroban_sdk::panic_with_error!(env, err)
}
