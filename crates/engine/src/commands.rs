//! Command structs for engine operations.
//!
//! These types group parameters for write operations (trip, city and expense
//! creation or updates), keeping call sites readable and avoiding long
//! argument lists.

use chrono::NaiveDate;

use crate::{CityCosts, CostOverrides, ExpenseCategory, MoneyCents, TravelStyle};

/// Create a trip.
#[derive(Clone, Debug)]
pub struct TripCmd {
    pub city_id: String,
    pub name: String,
    pub travel_style: TravelStyle,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub overrides: CostOverrides,
}

impl TripCmd {
    #[must_use]
    pub fn new(
        city_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            city_id: city_id.into(),
            name: name.into(),
            travel_style: TravelStyle::default(),
            start_date,
            end_date,
            travelers: 1,
            overrides: CostOverrides::default(),
        }
    }

    #[must_use]
    pub fn travel_style(mut self, travel_style: TravelStyle) -> Self {
        self.travel_style = travel_style;
        self
    }

    #[must_use]
    pub fn travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    #[must_use]
    pub fn overrides(mut self, overrides: CostOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Partial update of a trip's plan. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct TripUpdate {
    pub name: Option<String>,
    pub travel_style: Option<TravelStyle>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: Option<u32>,
}

/// Create a city.
#[derive(Clone, Debug)]
pub struct CityCmd {
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

impl CityCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        country_code: impl Into<String>,
        coordinates: (f64, f64),
        currency: impl Into<String>,
        costs: CityCosts,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            country_code: country_code.into(),
            latitude: coordinates.0,
            longitude: coordinates.1,
            currency: currency.into(),
            tips: None,
            transport_info: None,
            cash_info: None,
            costs,
        }
    }

    #[must_use]
    pub fn tips(mut self, tips: impl Into<String>) -> Self {
        self.tips = Some(tips.into());
        self
    }

    #[must_use]
    pub fn transport_info(mut self, info: impl Into<String>) -> Self {
        self.transport_info = Some(info.into());
        self
    }

    #[must_use]
    pub fn cash_info(mut self, info: impl Into<String>) -> Self {
        self.cash_info = Some(info.into());
        self
    }
}

/// Partial update of a city's content.
///
/// For the free-text fields, `Some(None)` clears the value.
#[derive(Clone, Debug, Default)]
pub struct CityUpdate {
    pub name: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub currency: Option<String>,
    pub tips: Option<Option<String>>,
    pub transport_info: Option<Option<String>>,
    pub cash_info: Option<Option<String>>,
}

/// Record an expense on a trip.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub trip_id: String,
    pub category: ExpenseCategory,
    pub amount: MoneyCents,
    pub note: Option<String>,
    pub spent_on: NaiveDate,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        trip_id: impl Into<String>,
        category: ExpenseCategory,
        amount: MoneyCents,
        spent_on: NaiveDate,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            category,
            amount,
            note: None,
            spent_on,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
