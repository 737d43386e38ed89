#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, panic_with_error, symbol_short,
    token, Address, Env, Vec,
};

mod price_converter;
pub mod price_feed;


pub use price_converter::MINIMUM_USD;
pub use price_feed::{AggregatorClient, RoundData};

// ── Data Types ──────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FundMeError {
    /// The caller is not the contract owner.
    NotOwner = 1,
    FunderIndexOutOfBounds = 2,
    /// The price feed reported a non-positive answer.
    InvalidPrice = 3,
    Overflow = 4,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// The only address allowed to withdraw.
    Owner,
    /// The ETH/USD aggregator used to price contributions.
    PriceFeed,
    /// The token contributions are paid in.
    Token,
    /// Cumulative amount funded by an address.
    AmountFunded(Address),
    /// Distinct funder addresses, in first-funded order.
    Funders,
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    /// Deploys the contract.
    ///
    /// # Arguments
    /// * `owner`      – The address allowed to withdraw.
    /// * `price_feed` – The aggregator contract used to price contributions.
    /// * `token`      – The token contract contributions are paid in.
    pub fn __constructor(env: Env, owner: Address, price_feed: Address, token: Address) {
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::PriceFeed, &price_feed);
        env.storage().instance().set(&DataKey::Token, &token);

        let empty_funders: Vec<Address> = Vec::new(&env);
        env.storage().instance().set(&DataKey::Funders, &empty_funders);
    }

    /// Contribute `amount` tokens.
    ///
    /// The funder must authorize the call, and `amount` must be worth at least
    /// [`MINIMUM_USD`] at the current feed price.
    pub fn fund(env: Env, funder: Address, amount: i128) {
        funder.require_auth();

        let price_feed = Self::get_price_feed(env.clone());
        if price_converter::get_conversion_rate(&env, amount, &price_feed) < MINIMUM_USD {
            panic!("You need to spend more ETH!");
        }

        let token_client = token::Client::new(&env, &Self::token(&env));
        token_client.transfer(&funder, &env.current_contract_address(), &amount);

        let key = DataKey::AmountFunded(funder.clone());
        let prev: i128 = env.storage().instance().get(&key).unwrap_or(0);
        let total = prev
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, FundMeError::Overflow));
        env.storage().instance().set(&key, &total);

        let mut funders = Self::funders(&env);
        if !funders.contains(&funder) {
            funders.push_back(funder.clone());
            env.storage().instance().set(&DataKey::Funders, &funders);
        }

        log!(&env, "funded", funder, amount);
        env.events()
            .publish((symbol_short!("fundme"), symbol_short!("funded")), (funder, amount));
    }

    /// Send the whole balance to the owner and reset every funder.
    pub fn withdraw(env: Env, caller: Address) -> Result<(), FundMeError> {
        let owner = Self::only_owner(&env, &caller)?;

        for index in 0..Self::get_funders_count(env.clone()) {
            let funder = Self::get_funder(env.clone(), index);
            env.storage()
                .instance()
                .set(&DataKey::AmountFunded(funder), &0i128);
        }
        env.storage()
            .instance()
            .set(&DataKey::Funders, &Vec::<Address>::new(&env));

        Self::pay_out(&env, &owner);
        Ok(())
    }

    /// Same result as [`FundMe::withdraw`], reading the funder list once.
    pub fn cheaper_withdraw(env: Env, caller: Address) -> Result<(), FundMeError> {
        let owner = Self::only_owner(&env, &caller)?;

        let funders = Self::funders(&env);
        for funder in funders.iter() {
            env.storage()
                .instance()
                .set(&DataKey::AmountFunded(funder), &0i128);
        }
        env.storage()
            .instance()
            .set(&DataKey::Funders, &Vec::<Address>::new(&env));

        Self::pay_out(&env, &owner);
        Ok(())
    }

    // ── View helpers ────────────────────────────────────────────────────

    pub fn get_price_feed(env: Env) -> Address {
        env.storage().instance().get(&DataKey::PriceFeed).unwrap()
    }

    pub fn get_owner(env: Env) -> Address {
        env.storage().instance().get(&DataKey::Owner).unwrap()
    }

    /// Returns the amount funded by an address, 0 if it never funded.
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::AmountFunded(funder))
            .unwrap_or(0)
    }

    /// Returns the funder at `index`; aborts when out of range.
    pub fn get_funder(env: Env, index: u32) -> Address {
        Self::funders(&env)
            .get(index)
            .unwrap_or_else(|| panic_with_error!(&env, FundMeError::FunderIndexOutOfBounds))
    }

    pub fn get_funders_count(env: Env) -> u32 {
        Self::funders(&env).len()
    }

    /// Version of the configured price feed.
    pub fn get_version(env: Env) -> u32 {
        AggregatorClient::new(&env, &Self::get_price_feed(env.clone())).version()
    }

    pub fn minimum_usd(_env: Env) -> i128 {
        MINIMUM_USD
    }
}

impl FundMe {
    fn only_owner(env: &Env, caller: &Address) -> Result<Address, FundMeError> {
        caller.require_auth();
        let owner = Self::get_owner(env.clone());
        if *caller != owner {
            return Err(FundMeError::NotOwner);
        }
        Ok(owner)
    }

    fn pay_out(env: &Env, owner: &Address) {
        let token_client = token::Client::new(env, &Self::token(env));
        let contract = env.current_contract_address();
        let balance = token_client.balance(&contract);
        if balance > 0 {
            token_client.transfer(&contract, owner, &balance);
        }

        env.events().publish(
            (symbol_short!("fundme"), symbol_short!("withdrawn")),
            (owner.clone(), balance),
        );
    }

    fn token(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::Token).unwrap()
    }

    fn funders(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Funders)
            .unwrap_or_else(|| Vec::new(env))
    }
}
