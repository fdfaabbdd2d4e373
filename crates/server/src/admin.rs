//! Admin endpoints: city content and user flags.
//!
//! Capability checks happen in the engine; a regular user gets 403.

use api_types::{
    DailyCosts, TravelStyle,
    city::{CityNew, CityUpdate, CityView},
    user::{UserFlagsUpdate, UserView, UsersResponse},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CityCmd, Principal};

use crate::{ServerError, server::ServerState, views};

pub async fn city_new(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<CityNew>,
) -> Result<(StatusCode, Json<CityView>), ServerError> {
    let mut cmd = CityCmd::new(
        payload.name,
        payload.country,
        payload.country_code,
        (payload.latitude, payload.longitude),
        payload.currency,
        views::city_costs(payload.costs),
    );
    cmd.tips = payload.tips;
    cmd.transport_info = payload.transport_info;
    cmd.cash_info = payload.cash_info;

    let city = state.engine.create_city(cmd, &principal).await?;
    Ok((StatusCode::CREATED, Json(views::city_view(&city, None))))
}

pub async fn city_update(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CityUpdate>,
) -> Result<Json<CityView>, ServerError> {
    let update = engine::CityUpdate {
        name: payload.name,
        country: payload.country,
        country_code: payload.country_code,
        latitude: payload.latitude,
        longitude: payload.longitude,
        currency: payload.currency,
        tips: payload.tips,
        transport_info: payload.transport_info,
        cash_info: payload.cash_info,
    };
    let city = state.engine.update_city(&id, update, &principal).await?;
    Ok(Json(views::city_view(&city, None)))
}

/// Replace the default daily costs of one travel style
pub async fn city_costs(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path((id, style)): Path<(String, TravelStyle)>,
    Json(payload): Json<DailyCosts>,
) -> Result<Json<CityView>, ServerError> {
    let city = state
        .engine
        .set_city_daily_costs(
            &id,
            views::travel_style(style),
            views::daily_costs(payload),
            &principal,
        )
        .await?;
    Ok(Json(views::city_view(&city, None)))
}

pub async fn city_delete(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_city(&id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn users(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<UsersResponse>, ServerError> {
    let users = state
        .engine
        .list_users(&principal)
        .await?
        .into_iter()
        .map(views::user_view)
        .collect();
    Ok(Json(UsersResponse { users }))
}

/// Grant or withdraw the admin and premium flags
pub async fn user_flags(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(username): Path<String>,
    Json(payload): Json<UserFlagsUpdate>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .set_user_flags(&username, payload.is_admin, payload.is_premium, &principal)
        .await?;
    Ok(Json(views::user_view(user)))
}
