pub mod api;
pub mod config;
pub mod datasource;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use datasource::{
    ChainStateSource, DataSourceError, MockChainState, MockPriceOracle, PriceOracle,
    RootChainSource,
};
pub use db::{init_db, Databases, Repository};
pub use domain::{
    Address, AssetBalance, AssetPrice, CalculationInputs, CalculationReport, CalculationResult,
    Decimal, DistributionState, RewardCycle, VtxDistributionId,
};
pub use engine::CalculationError;
pub use error::AppError;
pub use orchestration::{BootstrapPolicy, OrchestrationError, Orchestrator};
