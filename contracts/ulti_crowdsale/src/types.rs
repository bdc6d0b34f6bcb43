//! # Types
//!
//! Shared data structures used across all modules of the crowdsale.
//!
//! ## Config / state split
//!
//! Everything decided at deployment lives in [`CrowdsaleConfig`] and is
//! written once by `init`. The mutable bookkeeping is kept in small entries:
//!
//! - [`CrowdsaleTotals`]: the aggregate counters, written on every purchase
//!   and release.
//! - [`PurchaseRecord`]: one per investor, created on the first purchase.
//!
//! ## Sale phase as a derived state machine
//!
//! [`SalePhase`] is never stored. It is recomputed from the ledger timestamp
//! on every call:
//!
//! ```text
//! NotYetOpen ──► Open(0) ──► Open(1) ──► … ──► Closed
//! ```

use soroban_sdk::{contracttype, BytesN, Vec};

/// Identifier of a named whitelist, by convention `keccak256(name)`.
pub type WhitelistId = BytesN<32>;

/// Who may buy during a stage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Eligibility {
    /// Anyone may buy.
    RequireNone,
    /// The beneficiary must be on at least one of the listed whitelists.
    RequireAny(Vec<WhitelistId>),
}

/// One pricing/eligibility regime of the sale.
///
/// `cumulative_cap` is a ceiling over the total tokens sold by the whole sale,
/// not over the tokens sold inside this stage. `start_cap` is the previous
/// stage's ceiling and is informational.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageDefinition {
    /// The stage is active while `now < close_timestamp`.
    pub close_timestamp: u64,
    /// Token base units per unit of contribution.
    pub rate: i128,
    /// Bonus added on top of `value * rate`, in whole percent.
    pub bonus_percent: u32,
    pub start_cap: i128,
    /// `0` disables the cap check for this stage.
    pub cumulative_cap: i128,
    pub eligibility: Eligibility,
    /// `0` means no minimum.
    pub min_contribution: i128,
    /// `0` means no maximum and no running per-beneficiary limit.
    pub max_contribution: i128,
}

impl StageDefinition {
    /// Whether the stage imposes per-beneficiary contribution limits.
    pub fn has_limits(&self) -> bool {
        self.max_contribution > 0
    }
}

/// Vesting constants, anchored at the crowdsale closing time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingParameters {
    /// Seconds between `closing_time` and the vesting start.
    pub start_offset: u64,
    /// Seconds between the vesting start and the cliff.
    pub cliff_duration: u64,
    /// Seconds between the vesting start and the vesting end.
    pub total_duration: u64,
    /// Share of the purchase unlocked as soon as the sale closes.
    pub initial_percent: u32,
}

/// How per-beneficiary running contributions are grouped.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LimitScope {
    /// One running total per stage.
    PerStage,
    /// One running total per contiguous run of stages that all define limits.
    PerRegime,
}

/// Deploy-time configuration, immutable after `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrowdsaleConfig {
    pub opening_time: u64,
    pub closing_time: u64,
    /// Ordered ascending by `close_timestamp`.
    pub stages: Vec<StageDefinition>,
    pub vesting: VestingParameters,
    pub limit_scope: LimitScope,
    /// If non-empty, `release_tokens` requires membership in one of these.
    pub release_whitelists: Vec<WhitelistId>,
}

/// Aggregate counters of the sale. All three only ever grow.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CrowdsaleTotals {
    pub wei_raised: i128,
    pub tokens_sold: i128,
    pub tokens_released: i128,
}

/// Per-investor vesting bookkeeping.
///
/// Invariant: `tokens_released <= tokens_bought`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PurchaseRecord {
    pub tokens_bought: i128,
    pub tokens_released: i128,
}

/// Lifecycle of the sale, derived from the ledger timestamp.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SalePhase {
    NotYetOpen,
    /// Carries the index of the time-resolved stage.
    Open(u32),
    Closed,
}
