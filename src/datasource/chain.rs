//! Root Network node client reading Vortex distribution storage over JSON-RPC.

use super::storage::{
    self, decode_asset_balances, decode_asset_supply, decode_u128, FEE_POT_ASSETS_LIST,
    REWARD_POINTS, TOTAL_REWARD_POINTS, TOTAL_WORK_POINTS, VTX_VAULT_ASSETS_LIST, WORK_POINTS,
};
use super::{ChainStateSource, DataSourceError};
use crate::domain::{Address, AssetId, DistributionState, VtxDistributionId};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Chain state source backed by a node's HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RootChainSource {
    client: Client,
    rpc_url: String,
    vtx_asset_id: AssetId,
}

impl RootChainSource {
    pub fn new(rpc_url: String, vtx_asset_id: AssetId) -> Self {
        Self {
            client: Client::new(),
            rpc_url,
            vtx_asset_id,
        }
    }

    async fn post_rpc(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, DataSourceError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        let body = retry(backoff, || async {
            let response = self
                .client
                .post(&self.rpc_url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await?;

        parse_rpc_response(body)
    }

    /// Raw SCALE bytes at `key`, or `None` when nothing is stored there.
    async fn get_storage(&self, key: Vec<u8>) -> Result<Option<Vec<u8>>, DataSourceError> {
        let key_hex = format!("0x{}", hex::encode(&key));
        let result = self
            .post_rpc("state_getStorage", serde_json::json!([key_hex]))
            .await?;
        decode_storage_result(&result)
    }
}

#[async_trait]
impl ChainStateSource for RootChainSource {
    async fn distribution_state(
        &self,
        vtx_distribution_id: VtxDistributionId,
        account: &Address,
    ) -> Result<DistributionState, DataSourceError> {
        debug!(
            "Fetching vortex distribution state for id={}, account={}",
            vtx_distribution_id, account
        );

        let map_key = |item: &str| storage::vortex_map_key(item, vtx_distribution_id);
        let account_key =
            |item: &str| storage::vortex_account_key(item, vtx_distribution_id, account);

        let (
            fee_pot,
            vault,
            supply,
            total_work,
            total_reward,
            account_work,
            account_reward,
        ) = futures::try_join!(
            self.get_storage(map_key(FEE_POT_ASSETS_LIST)),
            self.get_storage(map_key(VTX_VAULT_ASSETS_LIST)),
            self.get_storage(storage::asset_details_key(self.vtx_asset_id)),
            self.get_storage(map_key(TOTAL_WORK_POINTS)),
            self.get_storage(map_key(TOTAL_REWARD_POINTS)),
            self.get_storage(account_key(WORK_POINTS)),
            self.get_storage(account_key(REWARD_POINTS)),
        )?;

        Ok(DistributionState {
            fee_pot_asset_balances: decode_asset_balances(fee_pot.as_deref(), "fee pot assets")?,
            vtx_vault_asset_balances: decode_asset_balances(vault.as_deref(), "vault assets")?,
            vtx_current_supply: decode_asset_supply(supply.as_deref(), self.vtx_asset_id)?,
            total_work_points: decode_u128(total_work.as_deref(), "total work points")?,
            account_work_points: decode_u128(account_work.as_deref(), "work points")?,
            total_reward_points: decode_u128(total_reward.as_deref(), "total reward points")?,
            account_reward_points: decode_u128(account_reward.as_deref(), "reward points")?,
        })
    }
}

fn parse_rpc_response(body: serde_json::Value) -> Result<serde_json::Value, DataSourceError> {
    if let Some(err) = body.get("error") {
        let code = err.get("code").and_then(|v| v.as_i64()).unwrap_or_default();
        let message = err
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        return Err(DataSourceError::RpcError { code, message });
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| DataSourceError::ParseError("Missing result field".to_string()))
}

fn decode_storage_result(
    result: &serde_json::Value,
) -> Result<Option<Vec<u8>>, DataSourceError> {
    if result.is_null() {
        return Ok(None);
    }
    let hex_str = result.as_str().ok_or_else(|| {
        DataSourceError::ParseError("Expected hex string storage value".to_string())
    })?;
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(stripped)
        .map(Some)
        .map_err(|e| DataSourceError::ParseError(format!("Invalid storage hex: {}", e)))
}
