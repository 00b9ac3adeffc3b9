//! Asset balances and prices as seen by one calculation.

use super::{AssetId, Decimal};
use serde::{Deserialize, Serialize};

/// Quantity of a fungible asset held by a pool (vault or fee pot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub asset_id: AssetId,
    pub balance: Decimal,
}

impl AssetBalance {
    pub fn new(asset_id: AssetId, balance: Decimal) -> Self {
        Self { asset_id, balance }
    }
}

/// USD price of one unit of an asset for a distribution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPrice {
    pub asset_id: AssetId,
    pub price: Decimal,
}

impl AssetPrice {
    pub fn new(asset_id: AssetId, price: Decimal) -> Self {
        Self { asset_id, price }
    }
}

/// Price of `asset_id`, taking the first match like a linear scan over the oracle rows.
pub fn find_price(prices: &[AssetPrice], asset_id: AssetId) -> Option<Decimal> {
    prices
        .iter()
        .find(|p| p.asset_id == asset_id)
        .map(|p| p.price)
}
