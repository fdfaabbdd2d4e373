//! Public city catalogue

use api_types::city::{CityListQuery, CityListResponse, CityView};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, server::ServerState, views};

/// Handle requests for listing cities, optionally filtered by name and sorted
/// by distance from `lat`/`lon`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CityListQuery>,
) -> Result<Json<CityListResponse>, ServerError> {
    let origin = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        (None, None) => None,
        _ => {
            return Err(ServerError::Generic(
                "lat and lon must be given together".to_string(),
            ));
        }
    };

    let cities = state
        .engine
        .list_cities(query.q.as_deref(), origin)
        .await?
        .iter()
        .map(|listing| views::city_view(&listing.city, listing.distance_km))
        .collect();
    Ok(Json(CityListResponse { cities }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CityView>, ServerError> {
    let city = state.engine.city(&id).await?;
    Ok(Json(views::city_view(&city, None)))
}
