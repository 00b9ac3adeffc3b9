use super::{priced_value, CalculationError};
use crate::domain::{AssetBalance, AssetPrice, Decimal};

/// VTX to mint for one distribution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAmounts {
    /// Fee-pot value converted into VTX.
    pub network_reward: Decimal,
    /// Bootstrap value converted into VTX.
    pub bootstrap_reward: Decimal,
    pub total: Decimal,
}

/// Convert the fee pot and the bootstrap allotment into VTX at `token_price`.
///
/// A zero `token_price` is a broken upstream invariant and is returned as
/// [`CalculationError::ZeroTokenPrice`] instead of being papered over.
pub fn mint_amounts(
    fee_pot_balances: &[AssetBalance],
    prices: &[AssetPrice],
    bootstrap_quantity: Decimal,
    bootstrap_asset_price: Decimal,
    token_price: Decimal,
) -> Result<MintAmounts, CalculationError> {
    if token_price.is_zero() {
        return Err(CalculationError::ZeroTokenPrice);
    }

    let fee_vault_value = priced_value(fee_pot_balances, prices, "fee pot value")?;
    let bootstrap_value = bootstrap_quantity
        .checked_mul(bootstrap_asset_price)
        .ok_or(CalculationError::Overflow("bootstrap value"))?;

    let network_reward = fee_vault_value
        .checked_div(token_price)
        .ok_or(CalculationError::Overflow("network reward"))?;
    let bootstrap_reward = bootstrap_value
        .checked_div(token_price)
        .ok_or(CalculationError::Overflow("bootstrap reward"))?;
    let total = network_reward
        .checked_add(bootstrap_reward)
        .ok_or(CalculationError::Overflow("total vortex"))?;

    Ok(MintAmounts {
        network_reward,
        bootstrap_reward,
        total,
    })
}
