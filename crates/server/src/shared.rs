//! Read-only endpoints for trips shared by public link.
//!
//! A token of a trip whose sharing is off answers 404, like an unknown token.

use api_types::{budget::BudgetSummary, trip::TripDetail};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState, views};

pub async fn trip(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> Result<Json<TripDetail>, ServerError> {
    let detail = state.engine.shared_trip(&token).await?;
    Ok(Json(views::trip_detail(&detail)))
}

pub async fn budget(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> Result<Json<BudgetSummary>, ServerError> {
    let summary = state.engine.shared_trip_budget(&token).await?;
    Ok(Json(views::budget_summary(&summary)))
}
