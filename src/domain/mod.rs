//! Domain types for the Vortex reward dashboard.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - Domain primitives: Address, AssetId, VtxDistributionId
//! - Asset balances/prices and the calculation input/output records

pub mod asset;
pub mod decimal;
pub mod distribution;
pub mod primitives;
pub mod reward_cycle;

pub use asset::{find_price, AssetBalance, AssetPrice};
pub use decimal::Decimal;
pub use distribution::{CalculationInputs, CalculationReport, CalculationResult, DistributionState};
pub use primitives::{Address, AddressParseError, AssetId, VtxDistributionId};
pub use reward_cycle::RewardCycle;
