//! Data source abstraction for asset prices and on-chain distribution state.

use crate::domain::{Address, AssetPrice, DistributionState, VtxDistributionId};
use async_trait::async_trait;
use std::fmt;

pub mod chain;
pub mod mock;
pub mod storage;

pub use chain::RootChainSource;
pub use mock::{MockChainState, MockPriceOracle};

/// Source of per-asset USD prices.
#[async_trait]
pub trait PriceOracle: Send + Sync + fmt::Debug {
    /// Fetch the prices captured for a distribution cycle.
    ///
    /// May be empty. A stored price that cannot be parsed is an error, never
    /// silently dropped.
    async fn asset_prices(
        &self,
        vtx_distribution_id: VtxDistributionId,
    ) -> Result<Vec<AssetPrice>, DataSourceError>;
}

/// Source of vault/fee-pot balances, VTX supply and participation points.
#[async_trait]
pub trait ChainStateSource: Send + Sync + fmt::Debug {
    /// Fetch the distribution state for a cycle as seen by `account`.
    ///
    /// Fails with [`DataSourceError::NotFound`] when the chain has no record
    /// the calculation cannot do without (e.g. the VTX asset itself).
    async fn distribution_state(
        &self,
        vtx_distribution_id: VtxDistributionId,
        account: &Address,
    ) -> Result<DistributionState, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 429 rate limit, 5xx server error)
    HttpError { status: u16, message: String },
    /// JSON-RPC error object returned by the node
    RpcError { code: i64, message: String },
    /// Parsing error (invalid JSON, bad SCALE bytes, malformed stored value)
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
    /// Requested record does not exist
    NotFound(String),
    /// Local database failure
    Database(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::RpcError { code, message } => {
                write!(f, "RPC error {}: {}", code, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DataSourceError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}

impl From<sqlx::Error> for DataSourceError {
    fn from(err: sqlx::Error) -> Self {
        DataSourceError::Database(err.to_string())
    }
}
