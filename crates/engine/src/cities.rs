//! Destination cities and their default daily costs.
//!
//! A city is read-only content for regular users; only principals with
//! [`Capability::ManageCities`](crate::Capability::ManageCities) can change it.
//! Default costs live in `city_daily_costs`, one row per travel style.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CityCosts, EngineError, ResultEngine, TravelStyle, geo};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub currency: String,
    pub tips: Option<String>,
    pub transport_info: Option<String>,
    pub cash_info: Option<String>,
    pub costs: CityCosts,
}

impl City {
    pub fn new(
        name: String,
        country: String,
        country_code: String,
        latitude: f64,
        longitude: f64,
        currency: String,
        costs: CityCosts,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            country,
            country_code: country_code.to_ascii_uppercase(),
            latitude,
            longitude,
            currency: currency.to_ascii_uppercase(),
            tips: None,
            transport_info: None,
            cash_info: None,
            costs,
        }
    }

    pub fn flag(&self) -> Option<String> {
        geo::flag_emoji(&self.country_code)
    }

    pub fn distance_km_from(&self, latitude: f64, longitude: f64) -> f64 {
        geo::distance_km((latitude, longitude), (self.latitude, self.longitude))
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if geo::flag_emoji(&self.country_code).is_none() {
            return Err(EngineError::InvalidInput(format!(
                "invalid country code: {}",
                self.country_code
            )));
        }
        if !geo::valid_coordinates(self.latitude, self.longitude) {
            return Err(EngineError::InvalidInput(
                "coordinates out of range".to_string(),
            ));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(EngineError::InvalidInput(format!(
                "invalid currency code: {}",
                self.currency
            )));
        }
        self.costs.validate()
    }

    /// Rebuilds a city from its row and its cost rows. Every travel style must
    /// be present.
    pub(crate) fn from_rows(
        model: Model,
        cost_rows: Vec<city_daily_costs::Model>,
    ) -> ResultEngine<Self> {
        let mut costs = CityCosts::default();
        for style in TravelStyle::ALL {
            let row = cost_rows
                .iter()
                .find(|row| row.travel_style == style.as_str())
                .ok_or_else(|| {
                    EngineError::KeyNotFound(format!(
                        "{} costs for city {}",
                        style.as_str(),
                        model.name
                    ))
                })?;
            costs.set_style(style, row.costs());
        }

        Ok(Self {
            id: model.id,
            name: model.name,
            country: model.country,
            country_code: model.country_code,
            latitude: model.latitude,
            longitude: model.longitude,
            currency: model.currency,
            tips: model.tips,
            transport_info: model.transport_info,
            cash_info: model.cash_info,
            costs,
        })
    }

    pub(crate) fn cost_models(&self) -> Vec<city_daily_costs::ActiveModel> {
        TravelStyle::ALL
            .into_iter()
            .map(|style| {
                city_daily_costs::ActiveModel::new(&self.id, style, self.costs.for_style(style))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub name_norm: String,
    pub country: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub currency: String,
    pub tips: Option<String>,
    pub transport_info: Option<String>,
    pub cash_info: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "city_daily_costs::Entity")]
    DailyCosts,
    #[sea_orm(has_many = "crate::trips::Entity")]
    Trips,
}

impl Related<city_daily_costs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyCosts.def()
    }
}

impl Related<crate::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn from_city(city: &City, name_norm: String) -> Self {
        Self {
            id: ActiveValue::Set(city.id.clone()),
            name: ActiveValue::Set(city.name.clone()),
            name_norm: ActiveValue::Set(name_norm),
            country: ActiveValue::Set(city.country.clone()),
            country_code: ActiveValue::Set(city.country_code.clone()),
            latitude: ActiveValue::Set(city.latitude),
            longitude: ActiveValue::Set(city.longitude),
            currency: ActiveValue::Set(city.currency.clone()),
            tips: ActiveValue::Set(city.tips.clone()),
            transport_info: ActiveValue::Set(city.transport_info.clone()),
            cash_info: ActiveValue::Set(city.cash_info.clone()),
        }
    }
}

pub mod city_daily_costs {
    //! Default daily costs of a city for one travel style (major units).

    use sea_orm::{ActiveValue, entity::prelude::*};

    use crate::{DailyCostSet, TravelStyle};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "city_daily_costs")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub city_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub travel_style: String,
        pub accommodation: f64,
        pub food: f64,
        pub transport: f64,
        pub activities: f64,
    }

    impl Model {
        pub fn costs(&self) -> DailyCostSet {
            DailyCostSet::new(self.accommodation, self.food, self.transport, self.activities)
        }
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::CityId",
            to = "super::Column::Id",
            on_update = "NoAction",
            on_delete = "Cascade"
        )]
        Cities,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Cities.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl ActiveModel {
        pub(crate) fn new(city_id: &str, style: TravelStyle, costs: &DailyCostSet) -> Self {
            Self {
                city_id: ActiveValue::Set(city_id.to_string()),
                travel_style: ActiveValue::Set(style.as_str().to_string()),
                accommodation: ActiveValue::Set(costs.accommodation),
                food: ActiveValue::Set(costs.food),
                transport: ActiveValue::Set(costs.transport),
                activities: ActiveValue::Set(costs.activities),
            }
        }
    }
}
