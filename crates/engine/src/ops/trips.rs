use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};

use crate::{
    BudgetSummary, Capability, CostOverrides, EngineError, ExpenseCategory, FREE_TRIP_LIMIT,
    MoneyCents, Principal, ResultEngine, ShareState, Trip, TripCmd, TripUpdate, Visibility,
    budget, cities, count_custom_costs, expenses, resolve_effective_costs, set_public,
    shared_trips, trips, trips::validate_dates,
};

use super::{Engine, TripDetail, TripListing, normalize_required_name, with_tx};

impl Engine {
    /// Create a trip owned by `principal`.
    ///
    /// Users without [`Capability::UnlimitedTrips`] may own at most
    /// [`FREE_TRIP_LIMIT`] trips.
    pub async fn create_trip(&self, cmd: TripCmd, principal: &Principal) -> ResultEngine<Trip> {
        let name = normalize_required_name(&cmd.name, "trip")?;
        let trip = Trip::new(
            &principal.id,
            &cmd.city_id,
            name,
            cmd.travel_style,
            cmd.start_date,
            cmd.end_date,
            cmd.travelers,
            cmd.overrides,
        )?;

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, &principal.id).await?;
            self.load_city(&db_tx, &trip.city_id).await?;

            if !principal.can(Capability::UnlimitedTrips) {
                let owned = trips::Entity::find()
                    .filter(trips::Column::UserId.eq(principal.id.clone()))
                    .count(&db_tx)
                    .await?;
                if owned >= FREE_TRIP_LIMIT {
                    return Err(EngineError::LimitReached(format!(
                        "free accounts can plan up to {FREE_TRIP_LIMIT} trips"
                    )));
                }
            }

            trips::ActiveModel::try_from(&trip)?.insert(&db_tx).await?;
            Ok(trip)
        })
    }

    /// Return a trip with its effective daily costs.
    ///
    /// `viewer` must be the owner or have been granted read access (public
    /// flag or explicit share).
    pub async fn trip(&self, trip_id: &str, viewer: Option<&Principal>) -> ResultEngine<TripDetail> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_read(&db_tx, trip_id, viewer).await?;
            let can_edit = crate::can_write(trip.access(), viewer);
            self.trip_detail(&db_tx, trip, can_edit).await
        })
    }

    /// Return a publicly shared trip by its share token.
    ///
    /// A trip whose sharing is turned off is [`EngineError::KeyNotFound`],
    /// exactly like an unknown token.
    pub async fn shared_trip(&self, token: &str) -> ResultEngine<TripDetail> {
        with_tx!(self, |db_tx| {
            let trip = self.find_public_trip_by_token(&db_tx, token).await?;
            self.trip_detail(&db_tx, trip, false).await
        })
    }

    /// Trips owned by `principal` followed by trips explicitly shared with
    /// them, newest first within each group.
    pub async fn list_trips(&self, principal: &Principal) -> ResultEngine<Vec<TripListing>> {
        with_tx!(self, |db_tx| {
            let owned = trips::Entity::find()
                .filter(trips::Column::UserId.eq(principal.id.clone()))
                .order_by_desc(trips::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let shared_ids: Vec<String> = shared_trips::Entity::find()
                .filter(shared_trips::Column::SharedWithId.eq(principal.id.clone()))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|share| share.trip_id)
                .collect();
            let shared = if shared_ids.is_empty() {
                Vec::new()
            } else {
                trips::Entity::find()
                    .filter(trips::Column::Id.is_in(shared_ids))
                    .order_by_desc(trips::Column::CreatedAt)
                    .all(&db_tx)
                    .await?
            };

            let mut out = Vec::with_capacity(owned.len() + shared.len());
            for (model, shared_with_me) in owned
                .into_iter()
                .map(|m| (m, false))
                .chain(shared.into_iter().map(|m| (m, true)))
            {
                let city_name = cities::Entity::find_by_id(model.city_id.clone())
                    .one(&db_tx)
                    .await?
                    .map(|city| city.name)
                    .unwrap_or_default();
                out.push(TripListing {
                    trip: Trip::try_from(model)?,
                    city_name,
                    shared_with_me,
                });
            }
            Ok(out)
        })
    }

    /// Update name, dates, style or party size (owner-only).
    pub async fn update_trip(
        &self,
        trip_id: &str,
        update: TripUpdate,
        principal: &Principal,
    ) -> ResultEngine<Trip> {
        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_name(name, "trip"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            if let Some(name) = name {
                trip.name = name;
            }
            if let Some(style) = update.travel_style {
                trip.travel_style = style;
            }
            if let Some(start) = update.start_date {
                trip.start_date = start;
            }
            if let Some(end) = update.end_date {
                trip.end_date = end;
            }
            if let Some(travelers) = update.travelers {
                trip.travelers = travelers;
            }
            validate_dates(trip.start_date, trip.end_date)?;
            trip.validate()?;

            if update.start_date.is_some() || update.end_date.is_some() {
                let stranded = expenses::Entity::find()
                    .filter(expenses::Column::TripId.eq(trip.id.clone()))
                    .filter(
                        Condition::any()
                            .add(expenses::Column::SpentOn.lt(trip.start_date))
                            .add(expenses::Column::SpentOn.gt(trip.end_date)),
                    )
                    .count(&db_tx)
                    .await?;
                if stranded > 0 {
                    return Err(EngineError::InvalidInput(format!(
                        "{stranded} expenses fall outside the new dates"
                    )));
                }
            }

            trips::ActiveModel::try_from(&trip)?.update(&db_tx).await?;
            Ok(trip)
        })
    }

    /// Replace the per-category budget overrides (owner-only).
    ///
    /// Overrides are minor units; `None` clears a category back to the city
    /// default. Negative values are rejected.
    pub async fn update_trip_budget(
        &self,
        trip_id: &str,
        overrides: CostOverrides,
        principal: &Principal,
    ) -> ResultEngine<Trip> {
        overrides.validate()?;
        with_tx!(self, |db_tx| {
            let mut trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            trip.overrides = overrides;

            let model = trips::ActiveModel {
                id: ActiveValue::Set(trip.id.clone()),
                budget_accommodation: ActiveValue::Set(overrides.accommodation),
                budget_food: ActiveValue::Set(overrides.food),
                budget_transport: ActiveValue::Set(overrides.transport),
                budget_activities: ActiveValue::Set(overrides.activities),
                ..Default::default()
            };
            model.update(&db_tx).await?;
            Ok(trip)
        })
    }

    /// Turn public link sharing on or off (owner-only).
    ///
    /// The share token is generated the first time the trip goes public and is
    /// kept from then on, so re-enabling sharing revives the same link.
    pub async fn set_trip_public(
        &self,
        trip_id: &str,
        want_public: bool,
        principal: &Principal,
    ) -> ResultEngine<ShareState> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let next = set_public(&trip.share, want_public, self.tokens.as_ref());
            if next.visibility() == Visibility::Unresolved {
                return Err(EngineError::InvalidInput(
                    "public trip without share token".to_string(),
                ));
            }
            if next == trip.share {
                return Ok(next);
            }

            let model = trips::ActiveModel {
                id: ActiveValue::Set(trip.id.clone()),
                is_public: ActiveValue::Set(next.is_public),
                share_token: ActiveValue::Set(next.share_token.clone()),
                ..Default::default()
            };
            model.update(&db_tx).await?;
            tracing::info!(
                trip_id = %trip.id,
                visibility = ?next.visibility(),
                "trip sharing changed"
            );
            Ok(next)
        })
    }

    /// Delete a trip with its shares, expenses and packing items (owner-only).
    pub async fn delete_trip(&self, trip_id: &str, principal: &Principal) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;

            shared_trips::Entity::delete_many()
                .filter(shared_trips::Column::TripId.eq(trip.id.clone()))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_many()
                .filter(expenses::Column::TripId.eq(trip.id.clone()))
                .exec(&db_tx)
                .await?;
            crate::custom_items::Entity::delete_many()
                .filter(crate::custom_items::Column::TripId.eq(trip.id.clone()))
                .exec(&db_tx)
                .await?;
            trips::Entity::delete_by_id(trip.id.clone())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Planned versus spent totals of a trip the viewer may read.
    pub async fn trip_budget(
        &self,
        trip_id: &str,
        viewer: Option<&Principal>,
    ) -> ResultEngine<BudgetSummary> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_read(&db_tx, trip_id, viewer).await?;
            self.budget_summary(&db_tx, &trip).await
        })
    }

    /// Planned versus spent totals of a publicly shared trip.
    pub async fn shared_trip_budget(&self, token: &str) -> ResultEngine<BudgetSummary> {
        with_tx!(self, |db_tx| {
            let trip = self.find_public_trip_by_token(&db_tx, token).await?;
            self.budget_summary(&db_tx, &trip).await
        })
    }

    async fn trip_detail(
        &self,
        db: &DatabaseTransaction,
        trip: Trip,
        can_edit: bool,
    ) -> ResultEngine<TripDetail> {
        let city = self.load_city(db, &trip.city_id).await?;
        let effective_costs =
            resolve_effective_costs(&trip.overrides, city.costs.for_style(trip.travel_style));
        Ok(TripDetail {
            custom_cost_count: count_custom_costs(&trip.overrides),
            effective_costs,
            city_name: city.name,
            city_currency: city.currency,
            trip,
            can_edit,
        })
    }

    async fn budget_summary(
        &self,
        db: &DatabaseTransaction,
        trip: &Trip,
    ) -> ResultEngine<BudgetSummary> {
        let city = self.load_city(db, &trip.city_id).await?;
        let daily = resolve_effective_costs(&trip.overrides, city.costs.for_style(trip.travel_style));

        let spent = expenses::Entity::find()
            .filter(expenses::Column::TripId.eq(trip.id.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|model| {
                ExpenseCategory::try_from(model.category.as_str())
                    .map(|category| (category, MoneyCents::new(model.amount_minor)))
            })
            .collect::<ResultEngine<Vec<_>>>()?;

        budget::summarize(&daily, trip.days(), trip.travelers, &spent)
    }
}
