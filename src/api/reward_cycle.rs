use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{non_empty, AppState};
use crate::domain::RewardCycle;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCycleQuery {
    pub reward_cycle_index: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RewardCycleResponse {
    pub data: RewardCycle,
}

pub async fn get_reward_cycle(
    Query(params): Query<RewardCycleQuery>,
    State(state): State<AppState>,
) -> Result<Json<RewardCycleResponse>, AppError> {
    let index = non_empty(&params.reward_cycle_index)
        .ok_or_else(|| AppError::BadRequest("Reward cycle index is required".to_string()))?
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("Invalid rewardCycleIndex".to_string()))?;

    let repo = state
        .orchestrator
        .databases()
        .repository(non_empty(&params.database))
        .await?;

    let cycle = repo
        .query_reward_cycle(index)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch reward cycle {}: {}", index, e);
            AppError::Internal("Failed to fetch reward cycle data".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Reward cycle not found".to_string()))?;

    Ok(Json(RewardCycleResponse { data: cycle }))
}
