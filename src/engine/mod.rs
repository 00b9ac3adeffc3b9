//! Pure computation engine for the Vortex reward cycle.
//!
//! Stages run in order: [`price::vtx_price`] → [`supply::mint_amounts`] →
//! [`allocation::allocate`]. None of them touch I/O or keep state.

use crate::domain::{find_price, AssetBalance, AssetPrice, Decimal};
use thiserror::Error;

pub mod allocation;
pub mod price;
pub mod supply;

pub use allocation::{
    allocate, AccountAllocation, STAKER_POOL_NETWORK_PERCENT, WORKPOINT_POOL_NETWORK_PERCENT,
};
pub use price::vtx_price;
pub use supply::{mint_amounts, MintAmounts};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// A zero VTX price reached the supply stage. `vtx_price` never yields zero
    /// for a zero supply, so this means the vault holds no priced value.
    #[error("VTX price is zero; cannot convert reward value into VTX")]
    ZeroTokenPrice,
    #[error("decimal overflow while computing {0}")]
    Overflow(&'static str),
}

/// Total USD value of `balances`; assets without a price contribute nothing.
pub(crate) fn priced_value(
    balances: &[AssetBalance],
    prices: &[AssetPrice],
    what: &'static str,
) -> Result<Decimal, CalculationError> {
    let mut total = Decimal::zero();
    for balance in balances {
        let Some(price) = find_price(prices, balance.asset_id) else {
            continue;
        };
        total = balance
            .balance
            .checked_mul(price)
            .and_then(|value| total.checked_add(value))
            .ok_or(CalculationError::Overflow(what))?;
    }
    Ok(total)
}
