//! # Purchase engine
//!
//! Validates a contribution against the time-resolved stage and records it.
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. sale open                    → `NotOpen`
//! 2. beneficiary not zero         → `InvalidBeneficiary`
//! 3. value positive               → `ZeroValue`
//! 4. stage eligibility            → `NotWhitelisted`
//! 5. min / max contribution       → `BelowMinimum` / `AboveMaximum`
//! 6. running contribution ≤ max   → `ExceedsBeneficiaryLimit`
//! 7. cumulative cap               → `CapExceeded`
//!
//! Nothing is written until every check has passed.

use soroban_sdk::{Address, Env};

use crate::config::is_zero_address;
use crate::stages;
use crate::storage;
use crate::types::{CrowdsaleConfig, CrowdsaleTotals};
use crate::whitelist;
use crate::Error;

/// Outcome of a successful validation, consumed by [`account`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurchaseQuote {
    /// Tokens credited to the beneficiary, bonus included.
    pub amount: i128,
    /// Running-contribution key and the total after this purchase, when the
    /// stage imposes limits.
    pub contribution: Option<(u32, i128)>,
}

/// `value * rate` plus `bonus_percent` of it, truncated toward zero.
pub fn token_amount(value: i128, rate: i128, bonus_percent: u32) -> Result<i128, Error> {
    let base = value.checked_mul(rate).ok_or(Error::Overflow)?;
    let bonus = base
        .checked_mul(bonus_percent as i128)
        .ok_or(Error::Overflow)?
        / 100;
    base.checked_add(bonus).ok_or(Error::Overflow)
}

/// Run the validation pipeline without touching state.
pub fn validate(
    env: &Env,
    config: &CrowdsaleConfig,
    totals: &CrowdsaleTotals,
    beneficiary: &Address,
    value: i128,
    now: u64,
) -> Result<PurchaseQuote, Error> {
    let index = stages::current_stage(config, now).ok_or(Error::NotOpen)?;
    let stage = config.stages.get(index).ok_or(Error::NotOpen)?;

    if is_zero_address(env, beneficiary) {
        return Err(Error::InvalidBeneficiary);
    }
    if value <= 0 {
        return Err(Error::ZeroValue);
    }
    if !whitelist::is_eligible(env, &stage.eligibility, beneficiary) {
        return Err(Error::NotWhitelisted);
    }

    // A minimum applies on its own; only a maximum turns on running limits.
    if value < stage.min_contribution {
        return Err(Error::BelowMinimum);
    }

    let mut contribution = None;
    if stage.has_limits() {
        if value > stage.max_contribution {
            return Err(Error::AboveMaximum);
        }

        let scope = stages::contribution_regime(config, index);
        let contributed = storage::load_contribution(env, beneficiary, scope)
            .checked_add(value)
            .ok_or(Error::Overflow)?;
        if contributed > stage.max_contribution {
            return Err(Error::ExceedsBeneficiaryLimit);
        }
        contribution = Some((scope, contributed));
    }

    let amount = token_amount(value, stage.rate, stage.bonus_percent)?;
    if stage.cumulative_cap > 0 {
        let sold = totals
            .tokens_sold
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if sold > stage.cumulative_cap {
            return Err(Error::CapExceeded);
        }
    }

    Ok(PurchaseQuote {
        amount,
        contribution,
    })
}

/// Apply a validated purchase to the totals, the investor record and the
/// running contribution. The caller persists `totals`.
pub fn account(
    env: &Env,
    totals: &mut CrowdsaleTotals,
    beneficiary: &Address,
    value: i128,
    quote: &PurchaseQuote,
) -> Result<(), Error> {
    let mut record = storage::load_record(env, beneficiary);
    record.tokens_bought = record
        .tokens_bought
        .checked_add(quote.amount)
        .ok_or(Error::Overflow)?;

    totals.wei_raised = totals.wei_raised.checked_add(value).ok_or(Error::Overflow)?;
    totals.tokens_sold = totals
        .tokens_sold
        .checked_add(quote.amount)
        .ok_or(Error::Overflow)?;

    storage::save_record(env, beneficiary, &record);
    if let Some((scope, contributed)) = quote.contribution {
        storage::save_contribution(env, beneficiary, scope, contributed);
    }
    Ok(())
}
