#![allow(dead_code)]

extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env,
};

use crate::config::{self, CROWDSALE_SUPPLY, UNIT};
use crate::types::{
    CrowdsaleConfig, Eligibility, LimitScope, StageDefinition, VestingParameters,
};
use crate::{UltiCrowdsale, UltiCrowdsaleClient};

pub const DAY: u64 = 86_400;

/// Ledgers closed per day at ~5 seconds per ledger.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// A deployed, initialised and funded crowdsale.
pub struct Sale {
    pub env: Env,
    pub client: UltiCrowdsaleClient<'static>,
    pub admin: Address,
    pub wallet: Address,
    pub token: token::Client<'static>,
    pub payment: token::Client<'static>,
    pub config: CrowdsaleConfig,
}

impl Sale {
    /// Deploy with the ULTI stage table.
    pub fn ulti() -> Self {
        let env = Env::default();
        let config = config::ulti_config(&env);
        Self::with_config(env, config)
    }

    /// Deploy with a single open stage that needs no whitelist.
    pub fn simple(rate: i128, bonus_percent: u32, cap: i128) -> Self {
        let env = Env::default();
        let config = simple_config(&env, rate, bonus_percent, cap);
        Self::with_config(env, config)
    }

    pub fn with_config(env: Env, config: CrowdsaleConfig) -> Self {
        env.mock_all_auths();
        env.ledger().set_timestamp(config.opening_time - 1);

        let contract_id = env.register(UltiCrowdsale, ());
        let client = UltiCrowdsaleClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        let wallet = Address::generate(&env);
        let token = create_token(&env, &Address::generate(&env));
        let payment = create_token(&env, &Address::generate(&env));

        client.init(&admin, &wallet, &token.address, &payment.address, &config);
        token::StellarAssetClient::new(&env, &token.address).mint(&contract_id, &CROWDSALE_SUPPLY);

        Sale {
            env,
            client,
            admin,
            wallet,
            token,
            payment,
            config,
        }
    }

    /// A fresh address holding `funds` of the payment token.
    pub fn investor(&self, funds: i128) -> Address {
        let investor = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.payment.address).mint(&investor, &funds);
        investor
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// Advance the ledger sequence without touching the timestamp, so that
    /// storage TTLs run down while the sale stays in the same phase.
    pub fn age_ledgers(&self, ledgers: u32) {
        let sequence = self.env.ledger().sequence();
        self.env.ledger().set_sequence_number(sequence + ledgers);
    }

    pub fn open(&self) {
        self.set_time(self.config.opening_time);
    }

    /// One hour before stage `index` closes.
    pub fn enter_stage(&self, index: u32) {
        let stage = self.config.stages.get(index).unwrap();
        self.set_time(stage.close_timestamp - 3600);
    }

    pub fn close(&self) {
        self.set_time(self.config.closing_time + 1);
    }

    pub fn whitelist(&self, name: &str, accounts: &[&Address]) {
        let id = config::whitelist_id(&self.env, name);
        let mut list = vec![&self.env];
        for a in accounts {
            list.push_back((*a).clone());
        }
        self.client.bulk_add_to_whitelist(&self.admin, &id, &list);
    }
}

pub fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

/// One stage open for ten days, no whitelist, no contribution limits.
pub fn simple_config(env: &Env, rate: i128, bonus_percent: u32, cap: i128) -> CrowdsaleConfig {
    let opening_time = 1_000_000;
    let closing_time = opening_time + 10 * DAY;
    CrowdsaleConfig {
        opening_time,
        closing_time,
        stages: vec![
            env,
            StageDefinition {
                close_timestamp: closing_time,
                rate,
                bonus_percent,
                start_cap: 0,
                cumulative_cap: cap,
                eligibility: Eligibility::RequireNone,
                min_contribution: 0,
                max_contribution: 0,
            },
        ],
        vesting: VestingParameters {
            start_offset: config::VESTING_START_OFFSET,
            cliff_duration: config::VESTING_CLIFF_DURATION,
            total_duration: config::VESTING_DURATION,
            initial_percent: config::VESTING_INITIAL_PERCENT,
        },
        limit_scope: LimitScope::PerStage,
        release_whitelists: vec![env],
    }
}

/// Two limited stages followed by an unlimited one, for contribution scope tests.
pub fn limited_config(env: &Env, scope: LimitScope) -> CrowdsaleConfig {
    let opening_time = 1_000_000;
    let limited = |close: u64| StageDefinition {
        close_timestamp: close,
        rate: 10,
        bonus_percent: 0,
        start_cap: 0,
        cumulative_cap: 0,
        eligibility: Eligibility::RequireNone,
        min_contribution: UNIT / 2,
        max_contribution: 5 * UNIT,
    };
    let mut open = limited(opening_time + 3 * DAY);
    open.min_contribution = 0;
    open.max_contribution = 0;

    let mut config = simple_config(env, 10, 0, 0);
    config.opening_time = opening_time;
    config.closing_time = opening_time + 3 * DAY;
    config.stages = vec![
        env,
        limited(opening_time + DAY),
        limited(opening_time + 2 * DAY),
        open,
    ];
    config.limit_scope = scope;
    config
}
