//! # ULTI Crowdsale Contract
//!
//! Sells ULTI across timed stages with per-stage pricing, bonuses, whitelists
//! and contribution limits, then releases the purchased tokens on a
//! cliff-and-ramp vesting schedule once the sale has closed.
//!
//! | Phase        | Entry Point(s)                                                  |
//! |--------------|-----------------------------------------------------------------|
//! | Bootstrap    | [`UltiCrowdsale::init`]                                         |
//! | Role admin   | `grant_role`, `revoke_role`, `has_role`, `role_of`              |
//! | Whitelists   | `add_to_whitelist`, `remove_from_whitelist`, `bulk_add_to_whitelist`, `bulk_add_to_whitelists` |
//! | Sale         | [`UltiCrowdsale::buy_tokens`], [`UltiCrowdsale::buy`]           |
//! | Vesting      | [`UltiCrowdsale::release_tokens`], `releasable_amount`          |
//! | After close  | `burn_unsold`                                                   |
//! | Queries      | `stage`, `phase`, `rate`, `bonus`, `cap`, `tokens_sold`, …      |
//!
//! ## Architecture
//!
//! The sale phase is never stored: every entry point recomputes it from the
//! ledger timestamp via [`stages`]. Validation and bookkeeping live in
//! [`purchase`] and [`vesting`], membership in [`whitelist`], authorisation in
//! [`rbac`] and storage layout in [`storage`]. This file wires them together
//! and performs the token transfers.
//!
//! Every entry point validates completely before its first write, so a
//! rejected call leaves no trace.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, token, Address, Bytes, BytesN, Env, Vec,
};

pub mod config;
pub mod events;
pub mod purchase;
pub mod rbac;
pub mod stages;
mod storage;
pub mod types;
pub mod vesting;
pub mod whitelist;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use rbac::Role;
pub use types::{
    CrowdsaleConfig, Eligibility, LimitScope, PurchaseRecord, SalePhase, StageDefinition,
    VestingParameters, WhitelistId,
};
use vesting::VestingSchedule;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOpen = 1,
    AlreadyClosed = 2,
    NotClosed = 3,
    InvalidBeneficiary = 4,
    ZeroValue = 5,
    NotWhitelisted = 6,
    BelowMinimum = 7,
    AboveMaximum = 8,
    ExceedsBeneficiaryLimit = 9,
    CapExceeded = 10,
    NoTokensDue = 11,
    Unauthorized = 12,
    UnreleasedTokensProtected = 13,
    InsufficientBalance = 14,
    AlreadyInitialized = 15,
    NotInitialized = 16,
    InvalidConfig = 17,
    InvalidWallet = 18,
    InvalidToken = 19,
    Overflow = 20,
}

#[contract]
pub struct UltiCrowdsale;

#[contractimpl]
impl UltiCrowdsale {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the sale and make `admin` its first admin.
    ///
    /// - `wallet` receives every contribution, paid in `payment_token`.
    /// - `token` is the asset being sold; the crowdsale must be funded with
    ///   it before buyers can release their purchases.
    /// - `config` is validated and frozen; see [`config::validate_config`].
    pub fn init(
        env: Env,
        admin: Address,
        wallet: Address,
        token: Address,
        payment_token: Address,
        config: CrowdsaleConfig,
    ) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if config::is_zero_address(&env, &wallet) {
            return Err(Error::InvalidWallet);
        }
        if config::is_zero_address(&env, &token) || config::is_zero_address(&env, &payment_token)
        {
            return Err(Error::InvalidToken);
        }
        config::validate_config(&config)?;

        storage::save_setup(&env, &config, &token, &payment_token, &wallet);
        rbac::init_admin(&env, &admin);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`. `caller` must hold `Admin`.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        caller.require_auth();
        rbac::grant_role(&env, &caller, &target, role)
    }

    /// Revoke any role from `target`. `caller` must hold `Admin`.
    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::revoke_role(&env, &caller, &target)
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::get_role(&env, &address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, &address, &role)
    }

    // ─────────────────────────────────────────────────────────
    // Whitelists
    // ─────────────────────────────────────────────────────────

    /// `keccak256(name)`, the id of the whitelist called `name`.
    pub fn whitelist_id(env: Env, name: Bytes) -> BytesN<32> {
        config::hash_name(&env, &name)
    }

    pub fn add_to_whitelist(
        env: Env,
        caller: Address,
        whitelist: WhitelistId,
        account: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_whitelist_manager(&env, &caller)?;
        whitelist::add(&env, &whitelist, &account);
        Ok(())
    }

    pub fn remove_from_whitelist(
        env: Env,
        caller: Address,
        whitelist: WhitelistId,
        account: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_whitelist_manager(&env, &caller)?;
        whitelist::remove(&env, &whitelist, &account);
        Ok(())
    }

    pub fn bulk_add_to_whitelist(
        env: Env,
        caller: Address,
        whitelist: WhitelistId,
        accounts: Vec<Address>,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_whitelist_manager(&env, &caller)?;
        whitelist::bulk_add(&env, &whitelist, &accounts);
        Ok(())
    }

    /// Add every account to every listed whitelist.
    pub fn bulk_add_to_whitelists(
        env: Env,
        caller: Address,
        whitelists: Vec<WhitelistId>,
        accounts: Vec<Address>,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_whitelist_manager(&env, &caller)?;
        whitelist::bulk_add_multiple(&env, &whitelists, &accounts);
        Ok(())
    }

    pub fn is_whitelisted(env: Env, whitelist: WhitelistId, account: Address) -> bool {
        whitelist::is_member(&env, &whitelist, &account)
    }

    pub fn is_whitelisted_any(env: Env, whitelists: Vec<WhitelistId>, account: Address) -> bool {
        whitelist::is_member_of_any(&env, &whitelists, &account)
    }

    // ─────────────────────────────────────────────────────────
    // Sale
    // ─────────────────────────────────────────────────────────

    /// Contribute `value` of the payment token on behalf of `beneficiary`.
    ///
    /// The contribution is forwarded to the sale wallet immediately; the
    /// purchased tokens are credited to the beneficiary's vesting record and
    /// become releasable after the sale closes. Returns the tokens credited.
    pub fn buy_tokens(
        env: Env,
        purchaser: Address,
        beneficiary: Address,
        value: i128,
    ) -> Result<i128, Error> {
        purchaser.require_auth();
        let config = storage::load_config(&env)?;
        let mut totals = storage::load_totals(&env);
        let now = env.ledger().timestamp();

        let quote = purchase::validate(&env, &config, &totals, &beneficiary, value, now)?;

        let payment = token::Client::new(&env, &storage::load_payment_token(&env)?);
        if payment.balance(&purchaser) < value {
            return Err(Error::InsufficientBalance);
        }
        let wallet = storage::load_wallet(&env)?;

        purchase::account(&env, &mut totals, &beneficiary, value, &quote)?;
        storage::save_totals(&env, &totals);

        payment.transfer(&purchaser, &wallet, &value);

        events::emit_tokens_purchased(&env, purchaser, beneficiary, value, quote.amount);
        Ok(quote.amount)
    }

    /// Contribute `value` with the purchaser as beneficiary.
    pub fn buy(env: Env, purchaser: Address, value: i128) -> Result<i128, Error> {
        Self::buy_tokens(env, purchaser.clone(), purchaser, value)
    }

    // ─────────────────────────────────────────────────────────
    // Vesting
    // ─────────────────────────────────────────────────────────

    /// Transfer everything currently vested and not yet released to
    /// `beneficiary`. Anyone may trigger a release; the tokens always go to
    /// the beneficiary. Returns the amount transferred.
    pub fn release_tokens(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        let now = env.ledger().timestamp();
        if !stages::has_closed(&config, now) {
            return Err(Error::NotClosed);
        }
        if config::is_zero_address(&env, &beneficiary) {
            return Err(Error::InvalidBeneficiary);
        }

        let record = storage::load_record(&env, &beneficiary);
        if record.tokens_bought == 0 {
            return Err(Error::NoTokensDue);
        }
        if !config.release_whitelists.is_empty()
            && !whitelist::is_member_of_any(&env, &config.release_whitelists, &beneficiary)
        {
            return Err(Error::NotWhitelisted);
        }

        let amount = VestingSchedule::from_config(&config).releasable_amount(&record, now)?;
        if amount == 0 {
            return Err(Error::NoTokensDue);
        }

        let token = token::Client::new(&env, &storage::load_token(&env)?);
        let contract = env.current_contract_address();
        if token.balance(&contract) < amount {
            return Err(Error::InsufficientBalance);
        }

        let mut totals = storage::load_totals(&env);
        vesting::record_release(&env, &mut totals, &beneficiary, record, amount)?;
        storage::save_totals(&env, &totals);

        token.transfer(&contract, &beneficiary, &amount);

        events::emit_tokens_released(&env, beneficiary, amount);
        Ok(amount)
    }

    /// Tokens `beneficiary` could release right now.
    pub fn releasable_amount(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        let record = storage::load_record(&env, &beneficiary);
        VestingSchedule::from_config(&config).releasable_amount(&record, env.ledger().timestamp())
    }

    pub fn vesting_start(env: Env) -> Result<u64, Error> {
        Ok(Self::schedule(&env)?.start)
    }

    pub fn vesting_cliff(env: Env) -> Result<u64, Error> {
        Ok(Self::schedule(&env)?.cliff)
    }

    pub fn vesting_end(env: Env) -> Result<u64, Error> {
        Ok(Self::schedule(&env)?.end)
    }

    pub fn is_vesting_ended(env: Env) -> Result<bool, Error> {
        Ok(Self::schedule(&env)?.has_ended(env.ledger().timestamp()))
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    /// Burn `amount` of unsold tokens held by the crowdsale.
    ///
    /// Only after close, and never into the tokens owed to buyers:
    /// `amount <= balance - tokens_sold`.
    pub fn burn_unsold(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin(&env, &caller)?;
        let config = storage::load_config(&env)?;
        if !stages::has_closed(&config, env.ledger().timestamp()) {
            return Err(Error::NotClosed);
        }
        if amount <= 0 {
            return Err(Error::ZeroValue);
        }

        let token = token::Client::new(&env, &storage::load_token(&env)?);
        let contract = env.current_contract_address();
        let balance = token.balance(&contract);
        let unsold = balance - storage::load_totals(&env).tokens_sold;
        if amount > unsold {
            return Err(Error::UnreleasedTokensProtected);
        }

        token.burn(&contract, &amount);
        events::emit_tokens_burned(&env, amount, balance - amount);
        Ok(())
    }

    /// Point the sale at a different token contract. Not allowed once closed.
    pub fn change_token_address(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin(&env, &caller)?;
        let config = storage::load_config(&env)?;
        if stages::has_closed(&config, env.ledger().timestamp()) {
            return Err(Error::AlreadyClosed);
        }
        if config::is_zero_address(&env, &token) {
            return Err(Error::InvalidToken);
        }

        let previous = storage::load_token(&env)?;
        storage::save_token(&env, &token);
        events::emit_token_changed(&env, previous, token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// `0` while inactive, otherwise the active stage index plus one.
    pub fn stage(env: Env) -> Result<u32, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::current_stage(&config, env.ledger().timestamp())
            .map(|i| i + 1)
            .unwrap_or(0))
    }

    pub fn phase(env: Env) -> Result<SalePhase, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::phase(&config, env.ledger().timestamp()))
    }

    pub fn rate(env: Env) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::rate(&config, env.ledger().timestamp()))
    }

    pub fn bonus(env: Env) -> Result<u32, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::bonus(&config, env.ledger().timestamp()))
    }

    pub fn cap(env: Env) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::cap(&config, env.ledger().timestamp()))
    }

    pub fn hardcap_reached(env: Env) -> Result<bool, Error> {
        let config = storage::load_config(&env)?;
        let hardcap = stages::hardcap(&config);
        Ok(hardcap > 0 && storage::load_totals(&env).tokens_sold >= hardcap)
    }

    pub fn is_open(env: Env) -> Result<bool, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::is_open(&config, env.ledger().timestamp()))
    }

    pub fn has_closed(env: Env) -> Result<bool, Error> {
        let config = storage::load_config(&env)?;
        Ok(stages::has_closed(&config, env.ledger().timestamp()))
    }

    pub fn wei_raised(env: Env) -> i128 {
        storage::load_totals(&env).wei_raised
    }

    pub fn tokens_sold(env: Env) -> i128 {
        storage::load_totals(&env).tokens_sold
    }

    /// Aggregate tokens released to all beneficiaries.
    pub fn tokens_released(env: Env) -> i128 {
        storage::load_totals(&env).tokens_released
    }

    pub fn tokens_bought(env: Env, beneficiary: Address) -> i128 {
        storage::load_record(&env, &beneficiary).tokens_bought
    }

    pub fn tokens_released_of(env: Env, beneficiary: Address) -> i128 {
        storage::load_record(&env, &beneficiary).tokens_released
    }

    /// Running contribution of `beneficiary` counted against the active
    /// stage's maximum; `0` when the active stage has no limits.
    pub fn contribution_of(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        let now = env.ledger().timestamp();
        let limited = stages::current_stage(&config, now)
            .filter(|i| config.stages.get(*i).map(|s| s.has_limits()).unwrap_or(false));
        Ok(match limited {
            Some(i) => storage::load_contribution(
                &env,
                &beneficiary,
                stages::contribution_regime(&config, i),
            ),
            None => 0,
        })
    }

    pub fn config(env: Env) -> Result<CrowdsaleConfig, Error> {
        storage::load_config(&env)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        storage::load_token(&env)
    }

    pub fn payment_token(env: Env) -> Result<Address, Error> {
        storage::load_payment_token(&env)
    }

    pub fn wallet(env: Env) -> Result<Address, Error> {
        storage::load_wallet(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn schedule(env: &Env) -> Result<VestingSchedule, Error> {
        Ok(VestingSchedule::from_config(&storage::load_config(env)?))
    }
}
