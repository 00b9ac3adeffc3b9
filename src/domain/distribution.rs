//! Inputs and outputs of one Vortex reward calculation.

use super::{AssetBalance, AssetPrice, Decimal};
use serde::{Deserialize, Serialize};

/// Chain state for one distribution cycle and one account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionState {
    pub fee_pot_asset_balances: Vec<AssetBalance>,
    pub vtx_vault_asset_balances: Vec<AssetBalance>,
    pub vtx_current_supply: Decimal,
    pub total_work_points: Decimal,
    pub account_work_points: Decimal,
    pub total_reward_points: Decimal,
    pub account_reward_points: Decimal,
}

/// Everything a calculation consumed, echoed back for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInputs {
    pub vtx_current_supply: Decimal,
    pub fee_pot_asset_balances: Vec<AssetBalance>,
    pub bootstrap_root: Decimal,
    pub account_worker_points: Decimal,
    pub total_worker_points: Decimal,
    pub vtx_vault_asset_balances: Vec<AssetBalance>,
    pub asset_prices: Vec<AssetPrice>,
    pub account_staker_reward_points: Decimal,
    pub total_staker_reward_points: Decimal,
}

impl CalculationInputs {
    pub fn new(
        state: DistributionState,
        asset_prices: Vec<AssetPrice>,
        bootstrap_root: Decimal,
    ) -> Self {
        Self {
            vtx_current_supply: state.vtx_current_supply,
            fee_pot_asset_balances: state.fee_pot_asset_balances,
            bootstrap_root,
            account_worker_points: state.account_work_points,
            total_worker_points: state.total_work_points,
            vtx_vault_asset_balances: state.vtx_vault_asset_balances,
            asset_prices,
            account_staker_reward_points: state.account_reward_points,
            total_staker_reward_points: state.total_reward_points,
        }
    }
}

/// Derived values of a calculation. Nothing is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub vtx_price: Decimal,
    pub total_vortex_network_reward: Decimal,
    pub total_vortex_bootstrap: Decimal,
    pub total_vortex: Decimal,
    pub staker_pool: Decimal,
    pub workpoint_pool: Decimal,
    pub account_staker_point_portion: Decimal,
    pub account_work_points_portion: Decimal,
    pub account_vtx_reward: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub data: CalculationInputs,
    pub results: CalculationResult,
}
