//! A user's planned visit to a city.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CostOverrides, EngineError, ResultEngine, ShareState, TravelStyle, TripAccess};

/// Longest trip the planner accepts, in days.
pub const MAX_TRIP_DAYS: i64 = 365;

/// Largest party a single trip plans for.
pub const MAX_TRAVELERS: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub city_id: String,
    pub name: String,
    pub travel_style: TravelStyle,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub overrides: CostOverrides,
    pub share: ShareState,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: &str,
        city_id: &str,
        name: String,
        travel_style: TravelStyle,
        start_date: NaiveDate,
        end_date: NaiveDate,
        travelers: u32,
        overrides: CostOverrides,
    ) -> ResultEngine<Self> {
        let trip = Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            city_id: city_id.to_string(),
            name,
            travel_style,
            start_date,
            end_date,
            travelers,
            overrides,
            share: ShareState::default(),
            created_at: Utc::now(),
        };
        trip.validate()?;
        Ok(trip)
    }

    /// Checks dates, party size and overrides.
    pub fn validate(&self) -> ResultEngine<()> {
        validate_dates(self.start_date, self.end_date)?;
        if self.travelers == 0 || self.travelers > MAX_TRAVELERS {
            return Err(EngineError::InvalidInput(format!(
                "travelers must be between 1 and {MAX_TRAVELERS}"
            )));
        }
        self.overrides.validate()
    }

    /// Number of days, both ends included.
    pub fn days(&self) -> u32 {
        ((self.end_date - self.start_date).num_days() + 1).max(1) as u32
    }

    pub fn access(&self) -> TripAccess<'_> {
        TripAccess {
            owner_id: &self.user_id,
            is_public: self.share.is_public,
        }
    }
}

pub(crate) fn validate_dates(start: NaiveDate, end: NaiveDate) -> ResultEngine<()> {
    if end < start {
        return Err(EngineError::InvalidInput(
            "end date precedes start date".to_string(),
        ));
    }
    if (end - start).num_days() >= MAX_TRIP_DAYS {
        return Err(EngineError::InvalidInput(format!(
            "trips are limited to {MAX_TRIP_DAYS} days"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub city_id: String,
    pub name: String,
    pub travel_style: String,
    pub start_date: Date,
    pub end_date: Date,
    pub travelers: i32,
    pub budget_accommodation: Option<i64>,
    pub budget_food: Option<i64>,
    pub budget_transport: Option<i64>,
    pub budget_activities: Option<i64>,
    pub is_public: bool,
    #[sea_orm(unique)]
    pub share_token: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::cities::Entity",
        from = "Column::CityId",
        to = "crate::cities::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Cities,
    #[sea_orm(has_many = "crate::shared_trips::Entity")]
    SharedTrips,
    #[sea_orm(has_many = "crate::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "crate::custom_items::Entity")]
    CustomItems,
}

impl Related<crate::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cities.def()
    }
}

impl Related<crate::shared_trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SharedTrips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Trip> for ActiveModel {
    type Error = EngineError;

    fn try_from(trip: &Trip) -> Result<Self, Self::Error> {
        let travelers = i32::try_from(trip.travelers)
            .map_err(|_| EngineError::InvalidInput("invalid travelers".to_string()))?;
        Ok(Self {
            id: ActiveValue::Set(trip.id.clone()),
            user_id: ActiveValue::Set(trip.user_id.clone()),
            city_id: ActiveValue::Set(trip.city_id.clone()),
            name: ActiveValue::Set(trip.name.clone()),
            travel_style: ActiveValue::Set(trip.travel_style.as_str().to_string()),
            start_date: ActiveValue::Set(trip.start_date),
            end_date: ActiveValue::Set(trip.end_date),
            travelers: ActiveValue::Set(travelers),
            budget_accommodation: ActiveValue::Set(trip.overrides.accommodation),
            budget_food: ActiveValue::Set(trip.overrides.food),
            budget_transport: ActiveValue::Set(trip.overrides.transport),
            budget_activities: ActiveValue::Set(trip.overrides.activities),
            is_public: ActiveValue::Set(trip.share.is_public),
            share_token: ActiveValue::Set(trip.share.share_token.clone()),
            created_at: ActiveValue::Set(trip.created_at),
        })
    }
}

impl TryFrom<Model> for Trip {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            city_id: model.city_id,
            name: model.name,
            travel_style: TravelStyle::try_from(model.travel_style.as_str())?,
            start_date: model.start_date,
            end_date: model.end_date,
            travelers: u32::try_from(model.travelers)
                .map_err(|_| EngineError::InvalidInput("invalid travelers".to_string()))?,
            overrides: CostOverrides {
                accommodation: model.budget_accommodation,
                food: model.budget_food,
                transport: model.budget_transport,
                activities: model.budget_activities,
            },
            share: ShareState::new(model.is_public, model.share_token),
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip(start: NaiveDate, end: NaiveDate) -> ResultEngine<Trip> {
        Trip::new(
            "u1",
            "c1",
            "Spring".to_string(),
            TravelStyle::Budget,
            start,
            end,
            2,
            CostOverrides::default(),
        )
    }

    #[test]
    fn days_include_both_ends() {
        assert_eq!(trip(date(2026, 4, 1), date(2026, 4, 1)).unwrap().days(), 1);
        assert_eq!(trip(date(2026, 4, 1), date(2026, 4, 5)).unwrap().days(), 5);
        assert_eq!(trip(date(2026, 2, 27), date(2026, 3, 2)).unwrap().days(), 4);
    }

    #[test]
    fn rejects_reversed_or_overlong_dates() {
        assert!(trip(date(2026, 4, 5), date(2026, 4, 1)).is_err());
        assert!(trip(date(2026, 1, 1), date(2027, 1, 1)).is_err());
        assert!(trip(date(2026, 1, 1), date(2026, 12, 31)).is_ok());
    }

    #[test]
    fn rejects_empty_or_oversized_party() {
        let mut t = trip(date(2026, 4, 1), date(2026, 4, 2)).unwrap();
        t.travelers = 0;
        assert!(t.validate().is_err());
        t.travelers = MAX_TRAVELERS;
        assert!(t.validate().is_ok());
        t.travelers = MAX_TRAVELERS + 1;
        assert!(t.validate().is_err());
    }

    #[test]
    fn active_model_refuses_travelers_beyond_i32() {
        let mut t = trip(date(2026, 4, 1), date(2026, 4, 2)).unwrap();
        t.travelers = 3_000_000_000;
        assert!(ActiveModel::try_from(&t).is_err());
    }

    #[test]
    fn new_trip_is_private_without_token() {
        let t = trip(date(2026, 4, 1), date(2026, 4, 2)).unwrap();
        assert_eq!(t.share, ShareState::default());
        assert!(!t.access().is_public);
    }

    #[test]
    fn model_round_trip_keeps_overrides_and_share_state() {
        let mut t = trip(date(2026, 4, 1), date(2026, 4, 2)).unwrap();
        t.overrides.food = Some(0);
        t.overrides.transport = Some(1_250);
        t.share = ShareState::new(false, Some("abc123".to_string()));

        let active = ActiveModel::try_from(&t).unwrap();
        let model = Model {
            id: active.id.unwrap(),
            user_id: active.user_id.unwrap(),
            city_id: active.city_id.unwrap(),
            name: active.name.unwrap(),
            travel_style: active.travel_style.unwrap(),
            start_date: active.start_date.unwrap(),
            end_date: active.end_date.unwrap(),
            travelers: active.travelers.unwrap(),
            budget_accommodation: active.budget_accommodation.unwrap(),
            budget_food: active.budget_food.unwrap(),
            budget_transport: active.budget_transport.unwrap(),
            budget_activities: active.budget_activities.unwrap(),
            is_public: active.is_public.unwrap(),
            share_token: active.share_token.unwrap(),
            created_at: active.created_at.unwrap(),
        };
        assert_eq!(Trip::try_from(model).unwrap(), t);
    }
}
