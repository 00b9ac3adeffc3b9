//! Repository layer for database reads.
//!
//! The dashboard never writes; rows are produced by the reward pipeline.

use crate::datasource::{DataSourceError, PriceOracle};
use crate::domain::{AssetId, AssetPrice, Decimal, RewardCycle, VtxDistributionId};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

/// Repository for database operations.
#[derive(Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Query the asset prices captured for a distribution, in insertion order.
    ///
    /// # Errors
    /// Returns `ParseError` if any stored price is not a valid non-negative decimal
    /// or an asset id does not fit `u32`.
    pub async fn query_asset_prices(
        &self,
        vtx_distribution_id: VtxDistributionId,
    ) -> Result<Vec<AssetPrice>, DataSourceError> {
        let rows = sqlx::query(
            r#"
            SELECT asset_id, price
            FROM asset_prices
            WHERE vtx_distribution_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(vtx_distribution_id as i64)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Loaded {} asset prices for distribution {}",
            rows.len(),
            vtx_distribution_id
        );

        rows.iter().map(asset_price_from_row).collect()
    }

    /// Query a reward cycle by index.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn query_reward_cycle(
        &self,
        reward_cycle_index: i64,
    ) -> Result<Option<RewardCycle>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT reward_cycle_index, current_era_index, start_era_index, end_era_index,
                   start_block, end_block, finished, need_to_calculate,
                   bootstrap_reward_in_total, workpoints_reward_in_total,
                   stakers_reward, validators_reward, vtx_distribution_id
            FROM reward_cycles
            WHERE reward_cycle_index = ?
            "#,
        )
        .bind(reward_cycle_index)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(RewardCycle {
                reward_cycle_index: row.try_get("reward_cycle_index")?,
                current_era_index: row.try_get("current_era_index")?,
                start_era_index: row.try_get("start_era_index")?,
                end_era_index: row.try_get("end_era_index")?,
                start_block: row.try_get("start_block")?,
                end_block: row.try_get("end_block")?,
                finished: row.try_get("finished")?,
                need_to_calculate: row.try_get("need_to_calculate")?,
                bootstrap_reward_in_total: row.try_get("bootstrap_reward_in_total")?,
                workpoints_reward_in_total: row.try_get("workpoints_reward_in_total")?,
                stakers_reward: row.try_get("stakers_reward")?,
                validators_reward: row.try_get("validators_reward")?,
                vtx_distribution_id: row.try_get("vtx_distribution_id")?,
            })
        })
        .transpose()
    }
}

fn asset_price_from_row(row: &SqliteRow) -> Result<AssetPrice, DataSourceError> {
    let raw_asset_id: i64 = row.try_get("asset_id")?;
    let raw_price: String = row.try_get("price")?;

    let asset_id = AssetId::try_from(raw_asset_id)
        .map_err(|_| DataSourceError::ParseError(format!("Invalid asset id: {}", raw_asset_id)))?;
    let price = Decimal::from_str_canonical(raw_price.trim()).map_err(|e| {
        DataSourceError::ParseError(format!("Invalid price for asset {}: {}", asset_id, e))
    })?;
    if price.is_negative() {
        return Err(DataSourceError::ParseError(format!(
            "Negative price for asset {}: {}",
            asset_id, raw_price
        )));
    }

    Ok(AssetPrice::new(asset_id, price))
}

#[async_trait]
impl PriceOracle for Repository {
    async fn asset_prices(
        &self,
        vtx_distribution_id: VtxDistributionId,
    ) -> Result<Vec<AssetPrice>, DataSourceError> {
        self.query_asset_prices(vtx_distribution_id).await
    }
}
