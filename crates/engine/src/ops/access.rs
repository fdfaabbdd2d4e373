use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};

use crate::{
    Capability, City, EngineError, ExplicitShare, Principal, ResultEngine, Trip, can_read,
    can_write, cities, shared_trips, trips, users,
};

use super::Engine;

fn trip_not_found() -> EngineError {
    EngineError::KeyNotFound("trip not exists".to_string())
}

impl Engine {
    pub(super) fn require_capability(
        &self,
        principal: &Principal,
        capability: Capability,
    ) -> ResultEngine<()> {
        if !principal.can(capability) {
            return Err(EngineError::Forbidden(format!(
                "missing capability {capability:?}"
            )));
        }
        Ok(())
    }

    pub(super) async fn find_trip(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
    ) -> ResultEngine<Trip> {
        let model = trips::Entity::find_by_id(trip_id.to_string())
            .one(db)
            .await?
            .ok_or_else(trip_not_found)?;
        Trip::try_from(model)
    }

    /// Looks a trip up by share token. Only public trips match: a trip whose
    /// sharing was turned off is reported as missing, not as forbidden.
    pub(super) async fn find_public_trip_by_token(
        &self,
        db: &DatabaseTransaction,
        token: &str,
    ) -> ResultEngine<Trip> {
        let model = trips::Entity::find()
            .filter(trips::Column::ShareToken.eq(token.to_string()))
            .filter(trips::Column::IsPublic.eq(true))
            .one(db)
            .await?
            .ok_or_else(trip_not_found)?;
        let trip = Trip::try_from(model)?;
        if !trip.share.token_grants_access(token) {
            return Err(trip_not_found());
        }
        Ok(trip)
    }

    pub(super) async fn explicit_shares(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
    ) -> ResultEngine<Vec<ExplicitShare>> {
        let rows = shared_trips::Entity::find()
            .filter(shared_trips::Column::TripId.eq(trip_id.to_string()))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(ExplicitShare::from).collect())
    }

    /// Loads a trip the viewer may read (owner, public or explicitly shared).
    pub(super) async fn require_trip_read(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
        viewer: Option<&Principal>,
    ) -> ResultEngine<Trip> {
        let trip = self.find_trip(db, trip_id).await?;
        let shares = self.explicit_shares(db, trip_id).await?;
        if !can_read(trip.access(), viewer, &shares) {
            return Err(EngineError::Forbidden("trip is not shared with you".to_string()));
        }
        Ok(trip)
    }

    /// Loads a trip the principal may modify. Only the owner passes, whatever
    /// the sharing state.
    pub(super) async fn require_trip_write(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
        principal: &Principal,
    ) -> ResultEngine<Trip> {
        let trip = self.find_trip(db, trip_id).await?;
        if !can_write(trip.access(), Some(principal)) {
            return Err(EngineError::Forbidden(
                "only the owner can modify a trip".to_string(),
            ));
        }
        Ok(trip)
    }

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    pub(super) async fn load_city(
        &self,
        db: &DatabaseTransaction,
        city_id: &str,
    ) -> ResultEngine<City> {
        let model = cities::Entity::find_by_id(city_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("city not exists".to_string()))?;
        let cost_rows = cities::city_daily_costs::Entity::find()
            .filter(cities::city_daily_costs::Column::CityId.eq(city_id.to_string()))
            .all(db)
            .await?;
        City::from_rows(model, cost_rows)
    }
}
