use soroban_sdk::{panic_with_error, Address, Env};

use crate::price_feed::AggregatorClient;
use crate::FundMeError;

/// Smallest accepted contribution, in USD with 7 decimals.
pub const MINIMUM_USD: i128 = 50 * 10i128.pow(7);

/// Latest answer from the feed along with its precision.
pub fn get_price(env: &Env, price_feed: &Address) -> (i128, u32) {
    let feed = AggregatorClient::new(env, price_feed);
    let answer = feed.latest_round_data().answer;
    if answer <= 0 {
        panic_with_error!(env, FundMeError::InvalidPrice);
    }
    (answer, feed.decimals())
}

/// Value of `amount` token units in USD, with the token's precision.
pub fn get_conversion_rate(env: &Env, amount: i128, price_feed: &Address) -> i128 {
    let (price, decimals) = get_price(env, price_feed);
    let scale = 10i128
        .checked_pow(decimals)
        .unwrap_or_else(|| panic_with_error!(env, FundMeError::Overflow));
    amount
        .checked_mul(price)
        .map(|value| value / scale)
        .unwrap_or_else(|| panic_with_error!(env, FundMeError::Overflow))
}
