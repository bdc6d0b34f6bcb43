//! # RBAC: Role-Based Access Control
//!
//! Two roles gate the privileged crowdsale entry points:
//!
//! ```text
//! Admin
//!     └── WhitelistManager
//! ```
//!
//! | Entry point                                   | Admin | WhitelistManager |
//! |-----------------------------------------------|:-----:|:----------------:|
//! | `grant_role`, `revoke_role`                   |   ✓   |                  |
//! | `burn_unsold`, `change_token_address`         |   ✓   |                  |
//! | whitelist add / remove / bulk add             |   ✓   |        ✓         |
//!
//! ## Storage layout
//!
//! - `RbacKey::Role(addr)` → `Role`, the role held by `addr`, if any.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger |
//! |--------------------|---------|
//! | `role_set`         | Role granted or replaced |
//! | `role_del`         | Role revoked |
//!
//! ## Threat model notes
//!
//! - An address holds **at most one role** at a time; granting a new role replaces the old one.
//! - An admin cannot revoke or downgrade its own role, so the sale can never
//!   be left without an admin by its last admin.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::storage::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use crate::Error;

/// The set of roles that can be assigned to an address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Full control: roles, burning unsold tokens, token address, whitelists.
    Admin,
    /// May only add and remove whitelist members.
    WhitelistManager,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Role(Address),
}

fn bump_role(env: &Env, key: &RbacKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn store_role(env: &Env, address: &Address, role: &Role) {
    let key = RbacKey::Role(address.clone());
    env.storage().persistent().set(&key, role);
    bump_role(env, &key);
}

fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(address.clone()));
}

/// Read the role for `address`, returning `None` if unassigned.
pub fn get_role(env: &Env, address: &Address) -> Option<Role> {
    let key = RbacKey::Role(address.clone());
    let role = env.storage().persistent().get(&key);
    if role.is_some() {
        bump_role(env, &key);
    }
    role
}

/// Make `admin` the first admin. Only called from `init`.
pub fn init_admin(env: &Env, admin: &Address) {
    store_role(env, admin, &Role::Admin);
    emit(env, admin, &Role::Admin, None);
}

/// Grant `role` to `target`, replacing any role it held.
///
/// - `caller` must hold `Admin`.
/// - An admin cannot downgrade itself.
///
/// Emits a `role_set` event.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    require_admin(env, caller)?;

    if caller == target && role != Role::Admin {
        return Err(Error::Unauthorized);
    }

    store_role(env, target, &role);
    emit(env, target, &role, Some(caller.clone()));
    Ok(())
}

/// Revoke any role from `target`. Revoking from an address without a role
/// is a no-op.
///
/// Emits a `role_del` event if a role existed.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;

    if caller == target {
        return Err(Error::Unauthorized);
    }

    if get_role(env, target).is_some() {
        clear_role(env, target);
        env.events()
            .publish((symbol_short!("role_del"), target.clone()), caller.clone());
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Access guards
// ─────────────────────────────────────────────────────────

pub fn require_admin(env: &Env, address: &Address) -> Result<(), Error> {
    match get_role(env, address) {
        Some(Role::Admin) => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}

/// Admins and whitelist managers may edit whitelists.
pub fn require_whitelist_manager(env: &Env, address: &Address) -> Result<(), Error> {
    match get_role(env, address) {
        Some(Role::Admin) | Some(Role::WhitelistManager) => Ok(()),
        None => Err(Error::Unauthorized),
    }
}

pub fn has_role(env: &Env, address: &Address, role: &Role) -> bool {
    get_role(env, address).as_ref() == Some(role)
}

/// Topic: `(role_set, target_address, role_symbol)`, data: `Option<caller>`.
fn emit(env: &Env, target: &Address, role: &Role, by: Option<Address>) {
    env.events().publish(
        (symbol_short!("role_set"), target.clone(), role_to_symbol(role)),
        by,
    );
}

fn role_to_symbol(role: &Role) -> Symbol {
    match role {
        Role::Admin => symbol_short!("admin"),
        Role::WhitelistManager => symbol_short!("wl_mgr"),
    }
}
