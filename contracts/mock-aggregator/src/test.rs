#![cfg(test)]

use network_config::{DECIMALS, INITIAL_ANSWER};
use soroban_sdk::{testutils::Ledger, Env, String};

use crate::{AggregatorError, MockV3Aggregator, MockV3AggregatorClient, RoundData};

fn setup_env() -> (Env, MockV3AggregatorClient<'static>) {
    let env = Env::default();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(MockV3Aggregator, (DECIMALS, INITIAL_ANSWER));
    let client = MockV3AggregatorClient::new(&env, &contract_id);

    (env, client)
}

#[test]
fn test_constructor_seeds_first_round() {
    let (_env, client) = setup_env();

    assert_eq!(client.decimals(), DECIMALS);
    assert_eq!(client.latest_round(), 1);
    assert_eq!(client.latest_answer(), INITIAL_ANSWER);
    assert_eq!(client.latest_timestamp(), 1_000);
    assert_eq!(
        client.latest_round_data(),
        RoundData {
            round_id: 1,
            answer: INITIAL_ANSWER,
            started_at: 1_000,
            updated_at: 1_000,
            answered_in_round: 1,
        }
    );
}

#[test]
fn test_update_answer_starts_new_round() {
    let (env, client) = setup_env();

    env.ledger().set_timestamp(2_000);
    client.update_answer(&300_000_000_000);

    assert_eq!(client.latest_round(), 2);
    assert_eq!(client.latest_answer(), 300_000_000_000);
    assert_eq!(client.latest_timestamp(), 2_000);

    // Earlier rounds stay readable.
    assert_eq!(client.get_answer(&1), INITIAL_ANSWER);
    assert_eq!(client.get_timestamp(&1), 1_000);
}

#[test]
fn test_update_round_data_sets_latest_round() {
    let (_env, client) = setup_env();

    client.update_round_data(&10, &150_000_000_000, &5_000, &4_900);

    assert_eq!(client.latest_round(), 10);
    let round = client.get_round_data(&10);
    assert_eq!(round.answer, 150_000_000_000);
    assert_eq!(round.updated_at, 5_000);
    assert_eq!(round.started_at, 4_900);
    assert_eq!(round.answered_in_round, 10);

    // The seeded round is left in place.
    assert_eq!(client.get_answer(&1), INITIAL_ANSWER);
}

#[test]
fn test_unknown_round_has_no_data() {
    let (_env, client) = setup_env();

    let result = client.try_get_round_data(&42);
    assert_eq!(result.unwrap_err().unwrap(), AggregatorError::NoDataPresent);

    let result = client.try_get_answer(&0);
    assert_eq!(result.unwrap_err().unwrap(), AggregatorError::NoDataPresent);
}

#[test]
fn test_metadata() {
    let (env, client) = setup_env();

    assert_eq!(client.version(), 0);
    assert_eq!(
        client.description(),
        String::from_str(&env, "v0.8/tests/MockV3Aggregator.sol")
    );
}
