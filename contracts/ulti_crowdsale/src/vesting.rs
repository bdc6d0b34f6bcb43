//! # Vesting ledger
//!
//! Purchased tokens stay in the crowdsale until the sale closes and are then
//! released on this schedule, anchored at `closing_time`:
//!
//! ```text
//!   vested
//!   100% ┤                                   ┌────────
//!        │                              ╱
//!        │                         ╱
//!   init ┤ ───────────────────┘
//!        └──┬─────────┬───────┬─────────────┬────────► time
//!        closing    start   cliff          end
//! ```
//!
//! The vested amount is recomputed from `tokens_bought` on every call and
//! compared against `tokens_released`, so repeated releases never accumulate
//! rounding error.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::{CrowdsaleConfig, CrowdsaleTotals, PurchaseRecord};
use crate::Error;

/// Absolute timestamps of the vesting schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    pub closing: u64,
    pub start: u64,
    pub cliff: u64,
    pub end: u64,
    pub initial_percent: u32,
}

impl VestingSchedule {
    pub fn from_config(config: &CrowdsaleConfig) -> Self {
        let v = &config.vesting;
        let start = config.closing_time.saturating_add(v.start_offset);
        VestingSchedule {
            closing: config.closing_time,
            start,
            cliff: start.saturating_add(v.cliff_duration),
            end: start.saturating_add(v.total_duration),
            initial_percent: v.initial_percent,
        }
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now >= self.end
    }

    /// Portion of `bought` vested at `now`.
    pub fn vested_amount(&self, bought: i128, now: u64) -> Result<i128, Error> {
        if now < self.closing {
            return Err(Error::NotClosed);
        }
        if now >= self.end {
            return Ok(bought);
        }

        let initial = bought
            .checked_mul(self.initial_percent as i128)
            .ok_or(Error::Overflow)?
            / 100;
        if now < self.cliff {
            return Ok(initial);
        }

        let elapsed = (now - self.cliff) as i128;
        let ramp = (self.end - self.cliff) as i128;
        let ramped = (bought - initial)
            .checked_mul(elapsed)
            .ok_or(Error::Overflow)?
            / ramp;
        Ok(initial + ramped)
    }

    /// What `record` may withdraw at `now`; never negative.
    pub fn releasable_amount(&self, record: &PurchaseRecord, now: u64) -> Result<i128, Error> {
        let vested = self.vested_amount(record.tokens_bought, now)?;
        Ok((vested - record.tokens_released).max(0))
    }
}

/// Book a release of `amount` against `beneficiary` and the aggregate totals.
/// The caller persists `totals` and performs the token transfer.
pub fn record_release(
    env: &Env,
    totals: &mut CrowdsaleTotals,
    beneficiary: &Address,
    mut record: PurchaseRecord,
    amount: i128,
) -> Result<(), Error> {
    record.tokens_released = record
        .tokens_released
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    if record.tokens_released > record.tokens_bought {
        return Err(Error::NoTokensDue);
    }
    totals.tokens_released = totals
        .tokens_released
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    storage::save_record(env, beneficiary, &record);
    Ok(())
}
