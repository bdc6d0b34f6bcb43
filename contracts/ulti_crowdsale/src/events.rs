use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::WhitelistId;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchased {
    pub purchaser: Address,
    pub beneficiary: Address,
    pub value: i128,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensReleased {
    pub beneficiary: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistChanged {
    pub whitelist: WhitelistId,
    pub account: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensBurned {
    pub amount: i128,
    pub remaining: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenChanged {
    pub previous: Address,
    pub token: Address,
}

pub fn emit_tokens_purchased(
    env: &Env,
    purchaser: Address,
    beneficiary: Address,
    value: i128,
    amount: i128,
) {
    let topics = (symbol_short!("purchased"), beneficiary.clone());
    let data = TokensPurchased {
        purchaser,
        beneficiary,
        value,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_tokens_released(env: &Env, beneficiary: Address, amount: i128) {
    let topics = (symbol_short!("released"), beneficiary.clone());
    let data = TokensReleased {
        beneficiary,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_whitelist_added(env: &Env, whitelist: WhitelistId, account: Address) {
    let topics = (symbol_short!("wl_add"), whitelist.clone());
    let data = WhitelistChanged { whitelist, account };
    env.events().publish(topics, data);
}

pub fn emit_whitelist_removed(env: &Env, whitelist: WhitelistId, account: Address) {
    let topics = (symbol_short!("wl_del"), whitelist.clone());
    let data = WhitelistChanged { whitelist, account };
    env.events().publish(topics, data);
}

pub fn emit_tokens_burned(env: &Env, amount: i128, remaining: i128) {
    let topics = (symbol_short!("burned"),);
    let data = TokensBurned { amount, remaining };
    env.events().publish(topics, data);
}

pub fn emit_token_changed(env: &Env, previous: Address, token: Address) {
    let topics = (symbol_short!("token_chg"),);
    let data = TokenChanged { previous, token };
    env.events().publish(topics, data);
}
