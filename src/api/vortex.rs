use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{non_empty, AppState};
use crate::domain::{CalculationReport, VtxDistributionId};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VortexCalculationQuery {
    pub account_id: Option<String>,
    pub vtx_distribution_id: Option<String>,
    pub database: Option<String>,
}

pub async fn get_vortex_calculation(
    Query(params): Query<VortexCalculationQuery>,
    State(state): State<AppState>,
) -> Result<Json<CalculationReport>, AppError> {
    let (Some(account_id), Some(distribution)) = (
        non_empty(&params.account_id),
        non_empty(&params.vtx_distribution_id),
    ) else {
        return Err(AppError::BadRequest(
            "Account ID and VTX distribution ID are required".to_string(),
        ));
    };

    let vtx_distribution_id = distribution
        .parse::<VtxDistributionId>()
        .map_err(|_| AppError::BadRequest("Invalid vtxDistributionId".to_string()))?;

    let report = state
        .orchestrator
        .run_calculation(account_id, vtx_distribution_id, non_empty(&params.database))
        .await?;

    Ok(Json(report))
}
