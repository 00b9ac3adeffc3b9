use super::{priced_value, CalculationError};
use crate::domain::{AssetBalance, AssetPrice, Decimal};

/// USD price of one VTX: value of the vault's backing assets over current supply.
///
/// Returns exactly `1` when nothing has been minted yet.
pub fn vtx_price(
    vault_balances: &[AssetBalance],
    prices: &[AssetPrice],
    current_supply: Decimal,
) -> Result<Decimal, CalculationError> {
    let vault_value = priced_value(vault_balances, prices, "vault value")?;

    if current_supply.is_zero() {
        return Ok(Decimal::one());
    }

    vault_value
        .checked_div(current_supply)
        .ok_or(CalculationError::Overflow("VTX price"))
}
