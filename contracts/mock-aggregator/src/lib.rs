#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Env, String};

#[cfg(test)]
mod test;

// ── Data Types ──────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AggregatorError {
    /// No answer has been recorded for the requested round.
    NoDataPresent = 1,
}

/// A single price round, in the shape `AggregatorV3Interface` consumers read.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Fixed-point precision of every answer.
    Decimals,
    /// Id of the most recent round.
    LatestRound,
    /// Recorded data for a round id.
    Round(u64),
}

// ── Contract ────────────────────────────────────────────────────────────────

/// A price feed whose answer is set directly, for local chains.
#[contract]
pub struct MockV3Aggregator;

#[contractimpl]
impl MockV3Aggregator {
    pub fn __constructor(env: Env, decimals: u32, initial_answer: i128) {
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::LatestRound, &0u64);
        Self::update_answer(env, initial_answer);
    }

    /// Records `answer` as a new round stamped with the current ledger time.
    pub fn update_answer(env: Env, answer: i128) {
        let round_id = Self::latest_round(env.clone()) + 1;
        let now = env.ledger().timestamp();
        Self::store_round(&env, round_id, answer, now, now);
    }

    /// Records explicit values for `round_id` and makes it the latest round.
    pub fn update_round_data(env: Env, round_id: u64, answer: i128, timestamp: u64, started_at: u64) {
        Self::store_round(&env, round_id, answer, timestamp, started_at);
    }

    pub fn get_round_data(env: Env, round_id: u64) -> Result<RoundData, AggregatorError> {
        env.storage()
            .persistent()
            .get(&DataKey::Round(round_id))
            .ok_or(AggregatorError::NoDataPresent)
    }

    pub fn latest_round_data(env: Env) -> Result<RoundData, AggregatorError> {
        let round_id = Self::latest_round(env.clone());
        Self::get_round_data(env, round_id)
    }

    // ── View helpers ────────────────────────────────────────────────────

    pub fn latest_round(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::LatestRound)
            .unwrap_or(0)
    }

    pub fn latest_answer(env: Env) -> Result<i128, AggregatorError> {
        Ok(Self::latest_round_data(env)?.answer)
    }

    pub fn latest_timestamp(env: Env) -> Result<u64, AggregatorError> {
        Ok(Self::latest_round_data(env)?.updated_at)
    }

    pub fn get_answer(env: Env, round_id: u64) -> Result<i128, AggregatorError> {
        Ok(Self::get_round_data(env, round_id)?.answer)
    }

    pub fn get_timestamp(env: Env, round_id: u64) -> Result<u64, AggregatorError> {
        Ok(Self::get_round_data(env, round_id)?.updated_at)
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Decimals).unwrap()
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, "v0.8/tests/MockV3Aggregator.sol")
    }

    pub fn version(_env: Env) -> u32 {
        0
    }
}

impl MockV3Aggregator {
    fn store_round(env: &Env, round_id: u64, answer: i128, updated_at: u64, started_at: u64) {
        let round = RoundData {
            round_id,
            answer,
            started_at,
            updated_at,
            answered_in_round: round_id,
        };
        env.storage().persistent().set(&DataKey::Round(round_id), &round);
        env.storage().instance().set(&DataKey::LatestRound, &round_id);
    }
}
