use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::{
    City, DailyCostSet, EngineError, RandomTokenGenerator, ResultEngine, TokenGenerator, Trip,
};

mod access;
mod cities;
mod expenses;
mod packing;
mod shares;
mod trips;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    tokens: Arc<dyn TokenGenerator>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// A trip as shown to one viewer: resolved costs plus whether the viewer may
/// edit it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripDetail {
    pub trip: Trip,
    pub city_name: String,
    pub city_currency: String,
    pub effective_costs: DailyCostSet,
    pub custom_cost_count: u8,
    pub can_edit: bool,
}

/// One row of a user's trip list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TripListing {
    pub trip: Trip,
    pub city_name: String,
    /// `true` when the trip belongs to someone else and was shared explicitly.
    pub shared_with_me: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CityListing {
    pub city: City,
    /// Set when the listing was requested relative to an origin.
    pub distance_km: Option<f64>,
}

/// A user account without its credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub username: String,
    pub is_admin: bool,
    pub is_premium: bool,
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    tokens: Arc<dyn TokenGenerator>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            tokens: Arc::new(RandomTokenGenerator),
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Replace the share token source (defaults to [`RandomTokenGenerator`]).
    pub fn token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> EngineBuilder {
        self.tokens = tokens;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            tokens: self.tokens,
        })
    }
}
