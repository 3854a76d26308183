#![cfg(test)]

use soroban_sdk::{symbol_short, testutils::Events, vec, Env, IntoVal, TryFromVal, TryIntoVal, Val};

use crate::events::{Closed, Contributed, Opened, Refunded};
use crate::test_fixture::*;

fn topics(f: &Fixture) -> soroban_sdk::Vec<Val> {
    let last_event = f.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, f.hatch.address);
    last_event.1
}

fn data<T: TryFromVal<Env, Val>>(f: &Fixture) -> T {
    let last_event = f.env.events().all().last().expect("No events found");
    last_event.2.try_into_val(&f.env).unwrap()
}

#[test]
fn test_opened_event() {
    let f = Fixture::token_hatch();
    f.set_time(START_TIME + 5);
    f.hatch.open(&f.admin);

    // Topic: (symbol_short!("open"),)
    let expected_topics = vec![&f.env, symbol_short!("open").into_val(&f.env)];
    assert_eq!(topics(&f), expected_topics);

    let event_data: Opened = data(&f);
    assert_eq!(
        event_data,
        Opened {
            open_date: START_TIME + 5
        }
    );
}

#[test]
fn test_contributed_event() {
    let f = Fixture::token_hatch();
    let c = f.contributor(MAX_GOAL);
    f.start();
    f.contribute(&c, 10);
    f.contribute(&c, 7_000);

    // Topic: (symbol_short!("contrib"), contributor)
    let expected_topics = vec![
        &f.env,
        symbol_short!("contrib").into_val(&f.env),
        c.into_val(&f.env),
    ];
    assert_eq!(topics(&f), expected_topics);

    // The event carries the clamped value, not the requested one.
    let event_data: Contributed = data(&f);
    assert_eq!(
        event_data,
        Contributed {
            contributor: c.clone(),
            value: MAX_GOAL - 10,
            amount: to_tokens(MAX_GOAL - 10),
            record_index: 1,
        }
    );
}

#[test]
fn test_refunded_event() {
    let f = Fixture::new(true, 0);
    let c = f.contributor(MAX_GOAL);
    let start = f.start();
    f.contribute(&c, 300);
    f.set_time(start + PERIOD);
    f.hatch.refund(&c, &0);

    // Topic: (symbol_short!("refund"), contributor)
    let expected_topics = vec![
        &f.env,
        symbol_short!("refund").into_val(&f.env),
        c.into_val(&f.env),
    ];
    assert_eq!(topics(&f), expected_topics);

    let event_data: Refunded = data(&f);
    assert_eq!(
        event_data,
        Refunded {
            contributor: c.clone(),
            value: 300,
            amount: to_tokens(300),
            record_index: 0,
        }
    );
}

#[test]
fn test_closed_event() {
    let f = Fixture::token_hatch();
    let c = f.contributor(MAX_GOAL);
    f.start();
    f.contribute(&c, MAX_GOAL);
    f.hatch.close(&f.admin);

    // Topic: (symbol_short!("close"),)
    let expected_topics = vec![&f.env, symbol_short!("close").into_val(&f.env)];
    assert_eq!(topics(&f), expected_topics);

    let event_data: Closed = data(&f);
    assert_eq!(
        event_data,
        Closed {
            total_raised: MAX_GOAL,
            beneficiary_funds: 500,
            reserve_funds: 4_500,
            beneficiary_tokens: 1_111,
        }
    );
}

#[test]
fn test_gate_event() {
    let f = Fixture::token_hatch();
    f.hatch.set_contributions_gated(&f.admin, &true);

    let expected_topics = vec![
        &f.env,
        symbol_short!("gate").into_val(&f.env),
        f.admin.into_val(&f.env),
    ];
    assert_eq!(topics(&f), expected_topics);
    let gated: bool = data(&f);
    assert!(gated);
}
