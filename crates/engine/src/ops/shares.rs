use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ExplicitShare, Principal, ResultEngine, shared_trips};

use super::{Engine, with_tx};

impl Engine {
    /// Grants `username` read access to a trip (owner-only).
    pub async fn share_trip_with(
        &self,
        trip_id: &str,
        username: &str,
        principal: &Principal,
    ) -> ResultEngine<ExplicitShare> {
        let username = username.trim();
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            if username == trip.user_id {
                return Err(EngineError::InvalidInput(
                    "cannot share a trip with its owner".to_string(),
                ));
            }
            self.require_user_exists(&db_tx, username).await?;

            let existing =
                shared_trips::Entity::find_by_id((trip.id.clone(), username.to_string()))
                    .one(&db_tx)
                    .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(format!(
                    "trip already shared with {username}"
                )));
            }

            let share = ExplicitShare {
                trip_id: trip.id.clone(),
                shared_with_id: username.to_string(),
                shared_by_id: principal.id.clone(),
                created_at: Utc::now(),
            };
            shared_trips::ActiveModel::from(&share).insert(&db_tx).await?;
            tracing::info!(trip_id = %trip.id, shared_with = %username, "trip shared");
            Ok(share)
        })
    }

    /// Withdraws an explicit share (owner-only).
    pub async fn revoke_trip_share(
        &self,
        trip_id: &str,
        username: &str,
        principal: &Principal,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let res = shared_trips::Entity::delete_by_id((trip.id.clone(), username.to_string()))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(format!(
                    "trip is not shared with {username}"
                )));
            }
            tracing::info!(trip_id = %trip.id, shared_with = %username, "trip share revoked");
            Ok(())
        })
    }

    /// Explicit shares of a trip, oldest first (owner-only).
    pub async fn list_trip_shares(
        &self,
        trip_id: &str,
        principal: &Principal,
    ) -> ResultEngine<Vec<ExplicitShare>> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let rows = shared_trips::Entity::find()
                .filter(shared_trips::Column::TripId.eq(trip.id))
                .order_by_asc(shared_trips::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            Ok(rows.into_iter().map(ExplicitShare::from).collect())
        })
    }
}
