//! Explicit trip shares

use api_types::share::{ShareNew, ShareView, SharesResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Principal;

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SharesResponse>, ServerError> {
    let shares = state
        .engine
        .list_trip_shares(&id, &principal)
        .await?
        .into_iter()
        .map(views::share_view)
        .collect();
    Ok(Json(SharesResponse { shares }))
}

/// Grant read access to a named user
pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ShareNew>,
) -> Result<(StatusCode, Json<ShareView>), ServerError> {
    let share = state
        .engine
        .share_trip_with(&id, &payload.username, &principal)
        .await?;
    Ok((StatusCode::CREATED, Json(views::share_view(share))))
}

pub async fn revoke(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path((id, username)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .revoke_trip_share(&id, &username, &principal)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
