//! Mock data sources for testing without a node or database.

use super::{ChainStateSource, DataSourceError, PriceOracle};
use crate::domain::{Address, AssetPrice, DistributionState, VtxDistributionId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Mock price oracle that returns predefined prices per cycle.
#[derive(Debug, Clone, Default)]
pub struct MockPriceOracle {
    prices: HashMap<VtxDistributionId, Vec<AssetPrice>>,
    failure: Option<DataSourceError>,
}

impl MockPriceOracle {
    /// Create a new mock oracle with no prices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a price for a cycle.
    pub fn with_price(mut self, vtx_distribution_id: VtxDistributionId, price: AssetPrice) -> Self {
        self.prices.entry(vtx_distribution_id).or_default().push(price);
        self
    }

    /// Make every call fail with `err`.
    pub fn failing(mut self, err: DataSourceError) -> Self {
        self.failure = Some(err);
        self
    }
}

#[async_trait]
impl PriceOracle for MockPriceOracle {
    async fn asset_prices(
        &self,
        vtx_distribution_id: VtxDistributionId,
    ) -> Result<Vec<AssetPrice>, DataSourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self
            .prices
            .get(&vtx_distribution_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock chain that returns predefined distribution state per (cycle, account).
#[derive(Debug, Clone, Default)]
pub struct MockChainState {
    states: HashMap<(VtxDistributionId, Address), DistributionState>,
    failure: Option<DataSourceError>,
}

impl MockChainState {
    /// Create a new mock chain with no state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state returned for `account` in a cycle.
    pub fn with_state(
        mut self,
        vtx_distribution_id: VtxDistributionId,
        account: Address,
        state: DistributionState,
    ) -> Self {
        self.states.insert((vtx_distribution_id, account), state);
        self
    }

    /// Make every call fail with `err`.
    pub fn failing(mut self, err: DataSourceError) -> Self {
        self.failure = Some(err);
        self
    }
}

#[async_trait]
impl ChainStateSource for MockChainState {
    async fn distribution_state(
        &self,
        vtx_distribution_id: VtxDistributionId,
        account: &Address,
    ) -> Result<DistributionState, DataSourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.states
            .get(&(vtx_distribution_id, *account))
            .cloned()
            .ok_or_else(|| {
                DataSourceError::NotFound(format!(
                    "distribution {} for account {}",
                    vtx_distribution_id, account
                ))
            })
    }
}
