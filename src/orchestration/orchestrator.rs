use super::calculator::{calculate, BootstrapPolicy};
use crate::datasource::{ChainStateSource, DataSourceError};
use crate::db::{DatabaseError, Databases};
use crate::domain::{Address, CalculationReport, VtxDistributionId};
use crate::engine::CalculationError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Clone)]
pub struct Orchestrator {
    databases: Arc<Databases>,
    chain: Arc<dyn ChainStateSource>,
    policy: BootstrapPolicy,
}

impl Orchestrator {
    pub fn new(
        databases: Arc<Databases>,
        chain: Arc<dyn ChainStateSource>,
        policy: BootstrapPolicy,
    ) -> Self {
        Self {
            databases,
            chain,
            policy,
        }
    }

    pub fn databases(&self) -> &Arc<Databases> {
        &self.databases
    }

    /// Compute one account's Vortex reward for a distribution cycle.
    ///
    /// Prices come from `database` (or the default database); chain state comes
    /// from the configured node. Failures are logged here with full detail.
    pub async fn run_calculation(
        &self,
        account_id: &str,
        vtx_distribution_id: VtxDistributionId,
        database: Option<&str>,
    ) -> Result<CalculationReport, OrchestrationError> {
        let account = Address::parse(account_id)
            .map_err(|e| OrchestrationError::InvalidRequest(format!("invalid account id: {}", e)))?;

        let result = self
            .calculate_for(&account, vtx_distribution_id, database)
            .await;

        match &result {
            Ok(report) => info!(
                "Vortex calculation for account={} distribution={}: reward={}",
                account, vtx_distribution_id, report.results.account_vtx_reward
            ),
            Err(e) => error!(
                "Vortex calculation failed for account={} distribution={}: {}",
                account, vtx_distribution_id, e
            ),
        }
        result
    }

    async fn calculate_for(
        &self,
        account: &Address,
        vtx_distribution_id: VtxDistributionId,
        database: Option<&str>,
    ) -> Result<CalculationReport, OrchestrationError> {
        let oracle = self.databases.repository(database).await?;
        calculate(
            oracle.as_ref(),
            self.chain.as_ref(),
            account,
            vtx_distribution_id,
            &self.policy,
        )
        .await
    }
}

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unknown database: {0:?}")]
    UnknownDatabase(String),
    #[error("price oracle failed: {0}")]
    PriceOracle(DataSourceError),
    #[error("chain state fetch failed: {0}")]
    ChainState(DataSourceError),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<DatabaseError> for OrchestrationError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidName(name) => {
                OrchestrationError::InvalidRequest(format!("invalid database name: {:?}", name))
            }
            DatabaseError::Unknown(name) => OrchestrationError::UnknownDatabase(name),
            DatabaseError::Sqlx(e) => OrchestrationError::Db(e),
        }
    }
}
