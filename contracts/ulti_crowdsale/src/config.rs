//! # Configuration
//!
//! Deploy-time parameters of the ULTI sale and the validation applied to any
//! [`CrowdsaleConfig`] handed to `init`.
//!
//! Amounts use 18 decimals on both sides: contributions are in the payment
//! token's base units ("wei") and `rate` converts them straight into ULTI
//! base units.

use soroban_sdk::{vec, Address, Bytes, BytesN, Env, String};

use crate::types::{
    CrowdsaleConfig, Eligibility, LimitScope, StageDefinition, VestingParameters, WhitelistId,
};
use crate::Error;

// ── Units ────────────────────────────────────────────────────────────

/// 10^18, one whole token (or one whole unit of the payment asset).
pub const UNIT: i128 = 1_000_000_000_000_000_000;

const DAY: u64 = 86_400;

/// Stage tables are scanned linearly on every call.
pub const MAX_STAGES: u32 = 8;

// ── Whitelist names ──────────────────────────────────────────────────

pub const GUARANTEED_SPOT_WHITELIST: &str = "GUARANTEED_SPOT_WHITELIST";
pub const PRIVATE_SALE_WHITELIST: &str = "PRIVATE_SALE_WHITELIST";
pub const CROWDSALE_WHITELIST: &str = "CROWDSALE_WHITELIST";
pub const KYCED_WHITELIST: &str = "KYCED_WHITELIST";

// ── Schedule ─────────────────────────────────────────────────────────

/// 2021-12-01 12:00:00 UTC.
pub const OPENING_TIME: u64 = 1_638_360_000;
pub const CLOSING_TIME: u64 = OPENING_TIME + 56 * DAY;

const BILLION: i128 = 1_000_000_000 * UNIT;

/// Tokens transferred to the crowdsale before opening; equals the hardcap.
pub const CROWDSALE_SUPPLY: i128 = 40 * BILLION;

// ── Vesting ──────────────────────────────────────────────────────────

pub const VESTING_START_OFFSET: u64 = DAY;
pub const VESTING_CLIFF_DURATION: u64 = 10 * DAY;
pub const VESTING_DURATION: u64 = 100 * DAY;
pub const VESTING_INITIAL_PERCENT: u32 = 10;

/// Ed25519 account with an all-zero key; stands in for the EVM zero address.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}

pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == zero_address(env)
}

/// `keccak256(name)`, the identifier under which a named whitelist is stored.
pub fn whitelist_id(env: &Env, name: &str) -> WhitelistId {
    let bytes = Bytes::from_slice(env, name.as_bytes());
    hash_name(env, &bytes)
}

pub(crate) fn hash_name(env: &Env, name: &Bytes) -> BytesN<32> {
    env.crypto().keccak256(name).to_bytes()
}

#[allow(clippy::too_many_arguments)]
fn stage(
    close_timestamp: u64,
    rate: i128,
    bonus_percent: u32,
    start_cap: i128,
    cumulative_cap: i128,
    eligibility: Eligibility,
    min_contribution: i128,
    max_contribution: i128,
) -> StageDefinition {
    StageDefinition {
        close_timestamp,
        rate,
        bonus_percent,
        start_cap,
        cumulative_cap,
        eligibility,
        min_contribution,
        max_contribution,
    }
}

/// The seven-stage ULTI sale.
///
/// | # | Stage          | Whitelists                        | Bonus |
/// |---|----------------|-----------------------------------|-------|
/// | 0 | GuaranteedSpot | guaranteed spot                   | 30%   |
/// | 1 | PrivateSale    | private sale                      | 25%   |
/// | 2 | Presale1       | crowdsale OR guaranteed spot      | 20%   |
/// | 3 | Presale2       | crowdsale OR guaranteed spot      | 15%   |
/// | 4 | Presale3       | crowdsale                         | 10%   |
/// | 5 | Presale4       | crowdsale                         | 5%    |
/// | 6 | Presale5       | crowdsale                         | 0%    |
pub fn ulti_config(env: &Env) -> CrowdsaleConfig {
    let guaranteed = whitelist_id(env, GUARANTEED_SPOT_WHITELIST);
    let private = whitelist_id(env, PRIVATE_SALE_WHITELIST);
    let crowdsale = whitelist_id(env, CROWDSALE_WHITELIST);
    let kyced = whitelist_id(env, KYCED_WHITELIST);

    let only = |id: &WhitelistId| Eligibility::RequireAny(vec![env, id.clone()]);
    let presale = Eligibility::RequireAny(vec![env, crowdsale.clone(), guaranteed.clone()]);

    let stages = vec![
        env,
        stage(
            OPENING_TIME + 3 * DAY,
            5_263_157,
            30,
            0,
            2 * BILLION,
            only(&guaranteed),
            UNIT / 2,
            5 * UNIT,
        ),
        stage(
            OPENING_TIME + 10 * DAY,
            5_263_157,
            25,
            2 * BILLION,
            8 * BILLION,
            only(&private),
            UNIT,
            100 * UNIT,
        ),
        stage(
            OPENING_TIME + 20 * DAY,
            3_947_368,
            20,
            8 * BILLION,
            14 * BILLION,
            presale.clone(),
            UNIT / 10,
            50 * UNIT,
        ),
        stage(
            OPENING_TIME + 28 * DAY,
            3_947_368,
            15,
            14 * BILLION,
            20 * BILLION,
            presale,
            UNIT / 10,
            50 * UNIT,
        ),
        stage(
            OPENING_TIME + 36 * DAY,
            3_289_473,
            10,
            20 * BILLION,
            27 * BILLION,
            only(&crowdsale),
            UNIT / 10,
            50 * UNIT,
        ),
        stage(
            OPENING_TIME + 46 * DAY,
            3_289_473,
            5,
            27 * BILLION,
            34 * BILLION,
            only(&crowdsale),
            UNIT / 10,
            50 * UNIT,
        ),
        stage(
            CLOSING_TIME,
            2_631_578,
            0,
            34 * BILLION,
            40 * BILLION,
            only(&crowdsale),
            UNIT / 10,
            50 * UNIT,
        ),
    ];

    CrowdsaleConfig {
        opening_time: OPENING_TIME,
        closing_time: CLOSING_TIME,
        stages,
        vesting: VestingParameters {
            start_offset: VESTING_START_OFFSET,
            cliff_duration: VESTING_CLIFF_DURATION,
            total_duration: VESTING_DURATION,
            initial_percent: VESTING_INITIAL_PERCENT,
        },
        limit_scope: LimitScope::PerStage,
        release_whitelists: vec![env, kyced, guaranteed, private, crowdsale],
    }
}

/// Reject configurations the stage resolver and vesting math cannot serve.
pub fn validate_config(config: &CrowdsaleConfig) -> Result<(), Error> {
    if config.opening_time >= config.closing_time {
        return Err(Error::InvalidConfig);
    }

    let count = config.stages.len();
    if count == 0 || count > MAX_STAGES {
        return Err(Error::InvalidConfig);
    }

    let mut prev: Option<StageDefinition> = None;
    for stage in config.stages.iter() {
        if stage.rate <= 0 || stage.start_cap < 0 || stage.cumulative_cap < 0 {
            return Err(Error::InvalidConfig);
        }
        if stage.min_contribution < 0 || stage.max_contribution < 0 {
            return Err(Error::InvalidConfig);
        }
        if stage.has_limits() && stage.min_contribution > stage.max_contribution {
            return Err(Error::InvalidConfig);
        }
        if stage.cumulative_cap > 0 && stage.cumulative_cap < stage.start_cap {
            return Err(Error::InvalidConfig);
        }
        if let Eligibility::RequireAny(ref ids) = stage.eligibility {
            if ids.is_empty() {
                return Err(Error::InvalidConfig);
            }
        }

        match prev {
            None => {
                if stage.close_timestamp <= config.opening_time {
                    return Err(Error::InvalidConfig);
                }
            }
            Some(ref p) => {
                if stage.close_timestamp <= p.close_timestamp {
                    return Err(Error::InvalidConfig);
                }
                if p.cumulative_cap > 0 && stage.start_cap != p.cumulative_cap {
                    return Err(Error::InvalidConfig);
                }
            }
        }
        prev = Some(stage);
    }

    if let Some(last) = prev {
        if last.close_timestamp < config.closing_time {
            return Err(Error::InvalidConfig);
        }
    }

    let v = &config.vesting;
    if v.initial_percent > 100 || v.cliff_duration > v.total_duration {
        return Err(Error::InvalidConfig);
    }

    Ok(())
}
