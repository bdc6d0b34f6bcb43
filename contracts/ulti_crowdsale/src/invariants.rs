#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::types::PurchaseRecord;
use crate::UltiCrowdsaleClient;

/// INV-1: `tokens_sold` equals the sum of every investor's `tokens_bought`.
pub fn assert_sold_matches_records(client: &UltiCrowdsaleClient, investors: &[Address]) {
    let sum: i128 = investors.iter().map(|a| client.tokens_bought(a)).sum();
    assert_eq!(
        client.tokens_sold(),
        sum,
        "INV-1 violated: tokens_sold {} != sum of records {}",
        client.tokens_sold(),
        sum
    );
}

/// INV-2: no investor has been released more than they bought.
pub fn assert_released_within_bought(client: &UltiCrowdsaleClient, investors: &[Address]) {
    for investor in investors {
        let record = PurchaseRecord {
            tokens_bought: client.tokens_bought(investor),
            tokens_released: client.tokens_released_of(investor),
        };
        assert!(
            record.tokens_released <= record.tokens_bought,
            "INV-2 violated: released {} > bought {}",
            record.tokens_released,
            record.tokens_bought
        );
    }
}

/// INV-3: the aggregate released counter equals the sum of per-investor releases.
pub fn assert_released_matches_records(client: &UltiCrowdsaleClient, investors: &[Address]) {
    let sum: i128 = investors.iter().map(|a| client.tokens_released_of(a)).sum();
    assert_eq!(
        client.tokens_released(),
        sum,
        "INV-3 violated: tokens_released {} != sum of records {}",
        client.tokens_released(),
        sum
    );
}

/// INV-4: a counter never moves backwards.
pub fn assert_non_decreasing(label: &str, before: i128, after: i128) {
    assert!(
        after >= before,
        "INV-4 violated: {} decreased from {} to {}",
        label,
        before,
        after
    );
}

/// INV-5: the crowdsale always holds enough tokens for what is still owed.
pub fn assert_owed_tokens_covered(client: &UltiCrowdsaleClient, balance: i128) {
    let owed = client.tokens_sold() - client.tokens_released();
    assert!(
        balance >= owed,
        "INV-5 violated: balance {} below owed {}",
        balance,
        owed
    );
}

/// Run all ledger invariants over the known investors.
pub fn assert_all_ledger_invariants(
    client: &UltiCrowdsaleClient,
    investors: &[Address],
    balance: i128,
) {
    assert_sold_matches_records(client, investors);
    assert_released_within_bought(client, investors);
    assert_released_matches_records(client, investors);
    assert_owed_tokens_covered(client, balance);
}
