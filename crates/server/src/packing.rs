//! Packing list endpoints

use api_types::packing::{PackingItem, PackingItemNew, PackingItemUpdate, PackingListResponse};
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
) -> Result<Json<PackingListResponse>, ServerError> {
    let items = state
        .engine
        .packing_list(&id, Some(&principal))
        .await?
        .into_iter()
        .map(views::packing_item)
        .collect();
    Ok(Json(PackingListResponse { items }))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PackingItemNew>,
) -> Result<(StatusCode, Json<PackingItem>), ServerError> {
    let item = state
        .engine
        .add_packing_item(
            &id,
            &payload.name,
            payload.quantity.unwrap_or(1),
            &principal,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::packing_item(item))))
}

/// Mark a custom item packed or unpacked
pub async fn update(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<PackingItemUpdate>,
) -> Result<Json<PackingItem>, ServerError> {
    let item = state
        .engine
        .set_packing_item_packed(&id, &item_id, payload.packed, &principal)
        .await?;
    Ok(Json(views::packing_item(item)))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .remove_packing_item(&id, &item_id, &principal)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
