use soroban_sdk::{contractclient, contracttype, Env, String};

/// One price round as reported by an aggregator.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// The price feed surface FundMe reads from.
#[contractclient(name = "AggregatorClient")]
pub trait AggregatorV3Interface {
    fn decimals(env: Env) -> u32;
    fn description(env: Env) -> String;
    fn version(env: Env) -> u32;
    fn get_round_data(env: Env, round_id: u64) -> RoundData;
    fn latest_round_data(env: Env) -> RoundData;
}
