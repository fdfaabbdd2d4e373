//! Trip API endpoints

use api_types::{
    budget::BudgetSummary,
    trip::{
        BudgetOverrides, PublicToggle, ShareState, TripDetail, TripListItem, TripListResponse,
        TripNew, TripUpdate,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Principal, TripCmd};

use crate::{ServerError, server::ServerState, views};

/// Handle requests for creating a new trip
pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<TripNew>,
) -> Result<(StatusCode, Json<TripDetail>), ServerError> {
    let mut cmd = TripCmd::new(
        payload.city_id,
        payload.name,
        payload.start_date,
        payload.end_date,
    );
    if let Some(style) = payload.travel_style {
        cmd = cmd.travel_style(views::travel_style(style));
    }
    if let Some(travelers) = payload.travelers {
        cmd = cmd.travelers(travelers);
    }
    if let Some(budget) = payload.budget {
        cmd = cmd.overrides(views::overrides(budget));
    }

    let trip = state.engine.create_trip(cmd, &principal).await?;
    let detail = state.engine.trip(&trip.id, Some(&principal)).await?;
    Ok((StatusCode::CREATED, Json(views::trip_detail(&detail))))
}

/// Handle requests for listing owned and shared trips
pub async fn list(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<TripListResponse>, ServerError> {
    let trips = state
        .engine
        .list_trips(&principal)
        .await?
        .into_iter()
        .map(|listing| TripListItem {
            trip: views::trip_view(&listing.trip, &listing.city_name, !listing.shared_with_me),
            shared_with_me: listing.shared_with_me,
        })
        .collect();
    Ok(Json(TripListResponse { trips }))
}

pub async fn get(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TripDetail>, ServerError> {
    let detail = state.engine.trip(&id, Some(&principal)).await?;
    Ok(Json(views::trip_detail(&detail)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TripUpdate>,
) -> Result<Json<TripDetail>, ServerError> {
    let update = engine::TripUpdate {
        name: payload.name,
        travel_style: payload.travel_style.map(views::travel_style),
        start_date: payload.start_date,
        end_date: payload.end_date,
        travelers: payload.travelers,
    };
    state.engine.update_trip(&id, update, &principal).await?;
    let detail = state.engine.trip(&id, Some(&principal)).await?;
    Ok(Json(views::trip_detail(&detail)))
}

/// Replace the per-category budget overrides
pub async fn update_budget(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BudgetOverrides>,
) -> Result<Json<TripDetail>, ServerError> {
    state
        .engine
        .update_trip_budget(&id, views::overrides(payload), &principal)
        .await?;
    let detail = state.engine.trip(&id, Some(&principal)).await?;
    Ok(Json(views::trip_detail(&detail)))
}

pub async fn summary(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<BudgetSummary>, ServerError> {
    let summary = state.engine.trip_budget(&id, Some(&principal)).await?;
    Ok(Json(views::budget_summary(&summary)))
}

/// Turn public link sharing on or off
pub async fn set_public(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PublicToggle>,
) -> Result<Json<ShareState>, ServerError> {
    let share = state
        .engine
        .set_trip_public(&id, payload.is_public, &principal)
        .await?;
    Ok(Json(views::share_state(&share)))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_trip(&id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}
