extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, Symbol, TryIntoVal,
};

use crate::config::{self, CROWDSALE_SUPPLY, GUARANTEED_SPOT_WHITELIST, KYCED_WHITELIST, UNIT};
use crate::events::{TokenChanged, TokensBurned, TokensPurchased, TokensReleased, WhitelistChanged};
use crate::fixtures::Sale;
use crate::Role;

#[test]
fn test_tokens_purchased_event() {
    let sale = Sale::simple(10, 20, 0);
    sale.open();
    let purchaser = sale.investor(1_000);
    let beneficiary = Address::generate(&sale.env);

    sale.client.buy_tokens(&purchaser, &beneficiary, &100);

    let all_events = sale.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("purchased"), beneficiary)
    assert_eq!(last_event.0, sale.client.address);
    let expected_topics = vec![
        &sale.env,
        symbol_short!("purchased").into_val(&sale.env),
        beneficiary.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: TokensPurchased = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        data,
        TokensPurchased {
            purchaser,
            beneficiary,
            value: 100,
            amount: 1_200,
        }
    );
}

#[test]
fn test_tokens_released_event() {
    let sale = Sale::simple(10, 0, 0);
    sale.open();
    let investor = sale.investor(1_000);
    sale.client.buy(&investor, &1_000);
    sale.close();

    let released = sale.client.release_tokens(&investor);

    let all_events = sale.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &sale.env,
        symbol_short!("released").into_val(&sale.env),
        investor.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: TokensReleased = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        data,
        TokensReleased {
            beneficiary: investor,
            amount: released,
        }
    );
    assert_eq!(released, 1_000);
}

#[test]
fn test_whitelist_events() {
    let sale = Sale::ulti();
    let id = config::whitelist_id(&sale.env, KYCED_WHITELIST);
    let account = Address::generate(&sale.env);

    sale.client.add_to_whitelist(&sale.admin, &id, &account);
    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("wl_add").into_val(&sale.env),
        id.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let data: WhitelistChanged = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        data,
        WhitelistChanged {
            whitelist: id.clone(),
            account: account.clone(),
        }
    );

    sale.client.remove_from_whitelist(&sale.admin, &id, &account);
    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("wl_del").into_val(&sale.env),
        id.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_bulk_add_emits_one_event_per_account() {
    let sale = Sale::ulti();
    let id = config::whitelist_id(&sale.env, GUARANTEED_SPOT_WHITELIST);
    let accounts = vec![
        &sale.env,
        Address::generate(&sale.env),
        Address::generate(&sale.env),
        Address::generate(&sale.env),
    ];

    sale.client.bulk_add_to_whitelist(&sale.admin, &id, &accounts);

    let added = sale
        .env
        .events()
        .all()
        .iter()
        .filter(|e| {
            e.0 == sale.client.address
                && e.1.first().map(|t| {
                    let topic: Symbol = t.try_into_val(&sale.env).unwrap();
                    topic == symbol_short!("wl_add")
                }) == Some(true)
        })
        .count();
    assert_eq!(added, 3);
}

#[test]
fn test_tokens_burned_event() {
    let sale = Sale::ulti();
    sale.close();
    sale.client.burn_unsold(&sale.admin, &UNIT);

    let last_event = sale.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, sale.client.address);
    let expected_topics = vec![&sale.env, symbol_short!("burned").into_val(&sale.env)];
    assert_eq!(last_event.1, expected_topics);

    let data: TokensBurned = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        data,
        TokensBurned {
            amount: UNIT,
            remaining: CROWDSALE_SUPPLY - UNIT,
        }
    );
}

#[test]
fn test_token_changed_event() {
    let sale = Sale::ulti();
    let replacement = Address::generate(&sale.env);
    sale.client.change_token_address(&sale.admin, &replacement);

    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![&sale.env, symbol_short!("token_chg").into_val(&sale.env)];
    assert_eq!(last_event.1, expected_topics);

    let data: TokenChanged = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        data,
        TokenChanged {
            previous: sale.token.address.clone(),
            token: replacement,
        }
    );
}

#[test]
fn test_role_set_event() {
    let sale = Sale::ulti();
    let manager = Address::generate(&sale.env);
    sale.client
        .grant_role(&sale.admin, &manager, &Role::WhitelistManager);

    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("role_set").into_val(&sale.env),
        manager.into_val(&sale.env),
        symbol_short!("wl_mgr").into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let by: Option<Address> = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(by, Some(sale.admin.clone()));
}

#[test]
fn test_role_del_event() {
    let sale = Sale::ulti();
    let manager = Address::generate(&sale.env);
    sale.client
        .grant_role(&sale.admin, &manager, &Role::WhitelistManager);
    sale.client.revoke_role(&sale.admin, &manager);

    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("role_del").into_val(&sale.env),
        manager.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let by: Address = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(by, sale.admin);
}
