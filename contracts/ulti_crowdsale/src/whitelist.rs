//! # Whitelist registry
//!
//! Named whitelists are flat address sets keyed by an opaque [`WhitelistId`].
//! Every operation here is idempotent and emits one audit event per
//! `(whitelist, address)` pair it processes. Authorisation is checked by the
//! caller in `lib.rs`; this module only manages membership.

use soroban_sdk::{Address, Env, Vec};

use crate::events;
use crate::storage;
use crate::types::{Eligibility, WhitelistId};

pub fn add(env: &Env, id: &WhitelistId, address: &Address) {
    storage::set_whitelisted(env, id, address);
    events::emit_whitelist_added(env, id.clone(), address.clone());
}

pub fn remove(env: &Env, id: &WhitelistId, address: &Address) {
    storage::clear_whitelisted(env, id, address);
    events::emit_whitelist_removed(env, id.clone(), address.clone());
}

pub fn bulk_add(env: &Env, id: &WhitelistId, addresses: &Vec<Address>) {
    for address in addresses.iter() {
        add(env, id, &address);
    }
}

/// Add every address to every listed whitelist.
pub fn bulk_add_multiple(env: &Env, ids: &Vec<WhitelistId>, addresses: &Vec<Address>) {
    for id in ids.iter() {
        bulk_add(env, &id, addresses);
    }
}

pub fn is_member(env: &Env, id: &WhitelistId, address: &Address) -> bool {
    storage::is_whitelisted(env, id, address)
}

/// `true` if `address` is on at least one of `ids`.
pub fn is_member_of_any(env: &Env, ids: &Vec<WhitelistId>, address: &Address) -> bool {
    ids.iter().any(|id| is_member(env, &id, address))
}

/// Whether `address` satisfies a stage's eligibility requirement.
pub fn is_eligible(env: &Env, eligibility: &Eligibility, address: &Address) -> bool {
    match eligibility {
        Eligibility::RequireNone => true,
        Eligibility::RequireAny(ids) => is_member_of_any(env, ids, address),
    }
}
