//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the crowdsale.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type               | Description                         |
//! |----------------|--------------------|-------------------------------------|
//! | `Config`       | `CrowdsaleConfig`  | Stage table, vesting, limit scope   |
//! | `Totals`       | `CrowdsaleTotals`  | wei raised, tokens sold / released  |
//! | `Token`        | `Address`          | Token being sold                    |
//! | `PaymentToken` | `Address`          | Asset contributions are paid in     |
//! | `Wallet`       | `Address`          | Receiver of contributions           |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type             | Description                     |
//! |----------------------------|------------------|---------------------------------|
//! | `Record(addr)`             | `PurchaseRecord` | Bought / released per investor  |
//! | `Whitelisted(id, addr)`    | `bool`           | Present only while a member     |
//! | `Contribution(addr, key)`  | `i128`           | Running contribution per scope  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining, on every write and on every read that finds the entry. Role
//! entries in `rbac` follow the same policy.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{CrowdsaleConfig, CrowdsaleTotals, PurchaseRecord, WhitelistId};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Totals,
    Token,
    PaymentToken,
    Wallet,
    /// Vesting record of one investor (Persistent).
    Record(Address),
    /// Membership of an address in a named whitelist (Persistent).
    Whitelisted(WhitelistId, Address),
    /// Running contribution of an address under a stage/regime key (Persistent).
    Contribution(Address, u32),
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

/// Write everything `init` decides. Totals start at zero.
pub fn save_setup(
    env: &Env,
    config: &CrowdsaleConfig,
    token: &Address,
    payment_token: &Address,
    wallet: &Address,
) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Config, config);
    instance.set(&DataKey::Totals, &CrowdsaleTotals::default());
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::PaymentToken, payment_token);
    instance.set(&DataKey::Wallet, wallet);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<CrowdsaleConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn load_totals(env: &Env) -> CrowdsaleTotals {
    env.storage()
        .instance()
        .get(&DataKey::Totals)
        .unwrap_or_default()
}

pub fn save_totals(env: &Env, totals: &CrowdsaleTotals) {
    env.storage().instance().set(&DataKey::Totals, totals);
    bump_instance(env);
}

fn load_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}

pub fn load_token(env: &Env) -> Result<Address, Error> {
    load_address(env, &DataKey::Token)
}

pub fn save_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

pub fn load_payment_token(env: &Env) -> Result<Address, Error> {
    load_address(env, &DataKey::PaymentToken)
}

pub fn load_wallet(env: &Env) -> Result<Address, Error> {
    load_address(env, &DataKey::Wallet)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Load the vesting record of `investor`; an unknown investor reads as zero.
pub fn load_record(env: &Env, investor: &Address) -> PurchaseRecord {
    let key = DataKey::Record(investor.clone());
    match env.storage().persistent().get(&key) {
        Some(record) => {
            bump_persistent(env, &key);
            record
        }
        None => PurchaseRecord::default(),
    }
}

pub fn save_record(env: &Env, investor: &Address, record: &PurchaseRecord) {
    let key = DataKey::Record(investor.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn is_whitelisted(env: &Env, id: &WhitelistId, address: &Address) -> bool {
    let key = DataKey::Whitelisted(id.clone(), address.clone());
    let member = env.storage().persistent().has(&key);
    if member {
        bump_persistent(env, &key);
    }
    member
}

pub fn set_whitelisted(env: &Env, id: &WhitelistId, address: &Address) {
    let key = DataKey::Whitelisted(id.clone(), address.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

pub fn clear_whitelisted(env: &Env, id: &WhitelistId, address: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelisted(id.clone(), address.clone()));
}

pub fn load_contribution(env: &Env, investor: &Address, scope: u32) -> i128 {
    let key = DataKey::Contribution(investor.clone(), scope);
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn save_contribution(env: &Env, investor: &Address, scope: u32, amount: i128) {
    let key = DataKey::Contribution(investor.clone(), scope);
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
