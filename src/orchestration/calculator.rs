use super::OrchestrationError;
use crate::datasource::{ChainStateSource, PriceOracle};
use crate::domain::{
    find_price, Address, AssetId, CalculationInputs, CalculationReport, CalculationResult,
    Decimal, VtxDistributionId,
};
use crate::engine::{allocate, mint_amounts, vtx_price, CalculationError};
use futures::TryFutureExt;
use tracing::debug;

/// Where the bootstrap component of a cycle comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapPolicy {
    /// Quantity of the bootstrap asset granted this cycle.
    pub bootstrap_root: Decimal,
    /// Asset whose stored price values the bootstrap quantity.
    pub root_asset_id: AssetId,
}

/// Run price → supply → allocation over already-fetched inputs.
pub fn evaluate(
    inputs: &CalculationInputs,
    root_asset_id: AssetId,
) -> Result<CalculationResult, CalculationError> {
    let price = vtx_price(
        &inputs.vtx_vault_asset_balances,
        &inputs.asset_prices,
        inputs.vtx_current_supply,
    )?;
    debug!("VTX price: {}", price);

    let root_price = find_price(&inputs.asset_prices, root_asset_id).unwrap_or_default();
    let minted = mint_amounts(
        &inputs.fee_pot_asset_balances,
        &inputs.asset_prices,
        inputs.bootstrap_root,
        root_price,
        price,
    )?;
    debug!(
        "Network reward: {}, bootstrap: {}, total: {}",
        minted.network_reward, minted.bootstrap_reward, minted.total
    );

    let allocation = allocate(
        minted.network_reward,
        minted.bootstrap_reward,
        inputs.account_staker_reward_points,
        inputs.total_staker_reward_points,
        inputs.account_worker_points,
        inputs.total_worker_points,
    )?;
    debug!(
        "Staker pool: {}, workpoint pool: {}, staker portion: {}, work portion: {}, reward: {}",
        allocation.staker_pool,
        allocation.workpoint_pool,
        allocation.staker_share_portion,
        allocation.work_share_portion,
        allocation.account_reward
    );

    Ok(CalculationResult {
        vtx_price: price,
        total_vortex_network_reward: minted.network_reward,
        total_vortex_bootstrap: minted.bootstrap_reward,
        total_vortex: minted.total,
        staker_pool: allocation.staker_pool,
        workpoint_pool: allocation.workpoint_pool,
        account_staker_point_portion: allocation.staker_share_portion,
        account_work_points_portion: allocation.work_share_portion,
        account_vtx_reward: allocation.account_reward,
    })
}

/// Fetch prices and chain state concurrently, then evaluate.
///
/// Either fetch failing aborts the whole calculation.
pub async fn calculate(
    oracle: &dyn PriceOracle,
    chain: &dyn ChainStateSource,
    account: &Address,
    vtx_distribution_id: VtxDistributionId,
    policy: &BootstrapPolicy,
) -> Result<CalculationReport, OrchestrationError> {
    let (asset_prices, state) = futures::try_join!(
        oracle
            .asset_prices(vtx_distribution_id)
            .map_err(OrchestrationError::PriceOracle),
        chain
            .distribution_state(vtx_distribution_id, account)
            .map_err(OrchestrationError::ChainState),
    )?;

    let data = CalculationInputs::new(state, asset_prices, policy.bootstrap_root);
    let results = evaluate(&data, policy.root_asset_id)?;

    Ok(CalculationReport { data, results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::DataSourceError;
    use crate::domain::{AssetBalance, AssetPrice, DistributionState};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Barrier;

    /// Adapters that only return once both have been called.
    #[derive(Debug)]
    struct Rendezvous(Arc<Barrier>);

    #[async_trait]
    impl PriceOracle for Rendezvous {
        async fn asset_prices(
            &self,
            _vtx_distribution_id: VtxDistributionId,
        ) -> Result<Vec<AssetPrice>, DataSourceError> {
            self.0.wait().await;
            Ok(vec![AssetPrice::new(2, d("2"))])
        }
    }

    #[async_trait]
    impl ChainStateSource for Rendezvous {
        async fn distribution_state(
            &self,
            _vtx_distribution_id: VtxDistributionId,
            _account: &Address,
        ) -> Result<DistributionState, DataSourceError> {
            self.0.wait().await;
            Ok(DistributionState {
                fee_pot_asset_balances: vec![AssetBalance::new(2, d("1000"))],
                vtx_vault_asset_balances: vec![AssetBalance::new(2, d("1000"))],
                vtx_current_supply: d("500"),
                total_work_points: d("300"),
                account_work_points: d("30"),
                total_reward_points: d("200"),
                account_reward_points: d("50"),
            })
        }
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn inputs() -> CalculationInputs {
        CalculationInputs {
            vtx_current_supply: d("500"),
            fee_pot_asset_balances: vec![AssetBalance::new(2, d("1000"))],
            bootstrap_root: d("100"),
            account_worker_points: d("30"),
            total_worker_points: d("300"),
            vtx_vault_asset_balances: vec![AssetBalance::new(2, d("1000"))],
            asset_prices: vec![AssetPrice::new(1, d("4")), AssetPrice::new(2, d("2"))],
            account_staker_reward_points: d("50"),
            total_staker_reward_points: d("200"),
        }
    }

    #[test]
    fn test_evaluate_threads_stages() {
        let result = evaluate(&inputs(), 1).unwrap();
        assert_eq!(result.vtx_price, d("4"));
        // fee pot 2000 USD / 4, bootstrap 100 ROOT * 4 USD / 4
        assert_eq!(result.total_vortex_network_reward, d("500"));
        assert_eq!(result.total_vortex_bootstrap, d("100"));
        assert_eq!(result.total_vortex, d("600"));
        assert_eq!(result.staker_pool, d("250"));
        assert_eq!(result.workpoint_pool, d("350"));
        assert_eq!(result.account_staker_point_portion, d("0.25"));
        assert_eq!(result.account_work_points_portion, d("0.1"));
        assert_eq!(result.account_vtx_reward, d("97.5"));
    }

    #[test]
    fn test_evaluate_unpriced_root_means_no_bootstrap() {
        let result = evaluate(&inputs(), 42).unwrap();
        assert_eq!(result.total_vortex_bootstrap, Decimal::zero());
        assert_eq!(result.total_vortex, d("500"));
    }

    #[test]
    fn test_evaluate_zero_priced_vault_is_fatal() {
        let mut inputs = inputs();
        inputs.vtx_vault_asset_balances = vec![AssetBalance::new(9, d("1000"))];
        assert_eq!(evaluate(&inputs, 1), Err(CalculationError::ZeroTokenPrice));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let inputs = inputs();
        assert_eq!(evaluate(&inputs, 1).unwrap(), evaluate(&inputs, 1).unwrap());
    }

    #[tokio::test]
    async fn test_calculate_fetches_prices_and_state_together() {
        let barrier = Arc::new(Barrier::new(2));
        let oracle = Rendezvous(barrier.clone());
        let chain = Rendezvous(barrier);
        let policy = BootstrapPolicy {
            bootstrap_root: Decimal::zero(),
            root_asset_id: 1,
        };
        let account = Address::new([7u8; 20]);

        // Sequential fetches would leave the first adapter waiting forever.
        let report = tokio::time::timeout(
            Duration::from_secs(5),
            calculate(&oracle, &chain, &account, 6, &policy),
        )
        .await
        .expect("price and chain fetches did not overlap")
        .unwrap();

        assert_eq!(report.results.vtx_price, d("4"));
        assert_eq!(report.results.total_vortex_network_reward, d("500"));
    }

    #[tokio::test]
    async fn test_calculate_aborts_when_a_fetch_fails() {
        use crate::datasource::{MockChainState, MockPriceOracle};

        let oracle = MockPriceOracle::new().with_price(6, AssetPrice::new(2, d("2")));
        let chain = MockChainState::new()
            .failing(DataSourceError::NetworkError("refused".to_string()));
        let policy = BootstrapPolicy {
            bootstrap_root: Decimal::zero(),
            root_asset_id: 1,
        };

        let result = calculate(&oracle, &chain, &Address::new([7u8; 20]), 6, &policy).await;
        assert!(matches!(result, Err(OrchestrationError::ChainState(_))));
    }
}
