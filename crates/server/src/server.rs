use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post, put},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};

use std::sync::Arc;

use crate::{admin, cities, expenses, packing, shared, shares, trips};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolves HTTP Basic credentials to a [`engine::Principal`] and stores it in
/// the request extensions. Anything else is 401.
async fn auth(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(credentials) = request.headers().typed_get::<Authorization<Basic>>() else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if credentials.username().is_empty() || credentials.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let principal = state
        .engine
        .authenticate(credentials.username(), credentials.password())
        .await
        .map_err(|err| {
            tracing::error!("failed to authenticate {}: {err}", credentials.username());
            StatusCode::UNAUTHORIZED
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/shared/{token}", get(shared::trip))
        .route("/shared/{token}/budget", get(shared::budget))
        .route("/cities", get(cities::list))
        .route("/cities/{id}", get(cities::get));

    let authenticated = Router::new()
        .route("/trips", post(trips::create).get(trips::list))
        .route(
            "/trips/{id}",
            get(trips::get).patch(trips::update).delete(trips::delete),
        )
        .route("/trips/{id}/budget", put(trips::update_budget))
        .route("/trips/{id}/summary", get(trips::summary))
        .route("/trips/{id}/public", put(trips::set_public))
        .route("/trips/{id}/shares", get(shares::list).post(shares::create))
        .route(
            "/trips/{id}/shares/{username}",
            axum::routing::delete(shares::revoke),
        )
        .route(
            "/trips/{id}/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/trips/{id}/expenses/{expense_id}",
            axum::routing::delete(expenses::delete),
        )
        .route("/trips/{id}/packing", get(packing::list).post(packing::create))
        .route(
            "/trips/{id}/packing/{item_id}",
            patch(packing::update).delete(packing::delete),
        )
        .route("/admin/cities", post(admin::city_new))
        .route(
            "/admin/cities/{id}",
            patch(admin::city_update).delete(admin::city_delete),
        )
        .route("/admin/cities/{id}/costs/{style}", put(admin::city_costs))
        .route("/admin/users", get(admin::users))
        .route("/admin/users/{username}", patch(admin::user_flags))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    public.merge(authenticated).with_state(state)
}

pub async fn run(engine: Engine, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
