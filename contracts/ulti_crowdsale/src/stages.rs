//! # Stage schedule
//!
//! Pure functions over a [`CrowdsaleConfig`] and a timestamp. Nothing here
//! touches storage, so every query can be answered from a config snapshot.
//!
//! A stage is chosen by **time only**: the first stage whose
//! `close_timestamp` lies after `now`. Its `cumulative_cap` is then applied as
//! an independent ceiling against the sale-wide `tokens_sold`. A fast sellout
//! can therefore hit the ceiling while the stage window is still running, and
//! a slow sale can reach a later stage while `tokens_sold` is still inside an
//! earlier cap band.

use crate::types::{CrowdsaleConfig, LimitScope, SalePhase, StageDefinition};

/// Index of the active stage, or `None` when the sale is not open.
pub fn current_stage(config: &CrowdsaleConfig, now: u64) -> Option<u32> {
    if now < config.opening_time || now >= config.closing_time {
        return None;
    }
    for (i, stage) in config.stages.iter().enumerate() {
        if stage.close_timestamp > now {
            return Some(i as u32);
        }
    }
    None
}

/// The stage definition active at `now`.
pub fn active_stage(config: &CrowdsaleConfig, now: u64) -> Option<StageDefinition> {
    current_stage(config, now).and_then(|i| config.stages.get(i))
}

/// Resolve the lifecycle phase at `now`.
pub fn phase(config: &CrowdsaleConfig, now: u64) -> SalePhase {
    if now < config.opening_time {
        return SalePhase::NotYetOpen;
    }
    if now >= config.closing_time {
        return SalePhase::Closed;
    }
    match current_stage(config, now) {
        Some(i) => SalePhase::Open(i),
        // Unreachable for a validated config: the last stage closes at or
        // after `closing_time`.
        None => SalePhase::Closed,
    }
}

pub fn is_open(config: &CrowdsaleConfig, now: u64) -> bool {
    now >= config.opening_time && now < config.closing_time
}

pub fn has_closed(config: &CrowdsaleConfig, now: u64) -> bool {
    now >= config.closing_time
}

pub fn rate(config: &CrowdsaleConfig, now: u64) -> i128 {
    active_stage(config, now).map(|s| s.rate).unwrap_or(0)
}

pub fn bonus(config: &CrowdsaleConfig, now: u64) -> u32 {
    active_stage(config, now).map(|s| s.bonus_percent).unwrap_or(0)
}

pub fn cap(config: &CrowdsaleConfig, now: u64) -> i128 {
    active_stage(config, now)
        .map(|s| s.cumulative_cap)
        .unwrap_or(0)
}

/// Highest ceiling defined by any stage; `0` if no stage defines a cap.
pub fn hardcap(config: &CrowdsaleConfig) -> i128 {
    config
        .stages
        .iter()
        .map(|s| s.cumulative_cap)
        .max()
        .unwrap_or(0)
}

/// Key under which a beneficiary's running contribution is tracked while
/// stage `index` is active.
///
/// Under [`LimitScope::PerRegime`] a contiguous run of limited stages shares
/// the index of its first stage; a stage without limits breaks the run.
pub fn contribution_regime(config: &CrowdsaleConfig, index: u32) -> u32 {
    match config.limit_scope {
        LimitScope::PerStage => index,
        LimitScope::PerRegime => {
            let mut first = index;
            while first > 0 {
                match config.stages.get(first - 1) {
                    Some(prev) if prev.has_limits() => first -= 1,
                    _ => break,
                }
            }
            first
        }
    }
}
