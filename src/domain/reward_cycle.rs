//! Stored reward cycle document.

use super::VtxDistributionId;
use serde::{Deserialize, Serialize};

/// One reward cycle as recorded by the off-chain reward pipeline.
///
/// Reward totals are kept as the stored strings; the dashboard only displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCycle {
    pub reward_cycle_index: i64,
    pub current_era_index: i64,
    pub start_era_index: i64,
    pub end_era_index: i64,
    pub start_block: i64,
    pub end_block: i64,
    pub finished: bool,
    pub need_to_calculate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_reward_in_total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workpoints_reward_in_total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakers_reward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validators_reward: Option<String>,
    pub vtx_distribution_id: VtxDistributionId,
}
