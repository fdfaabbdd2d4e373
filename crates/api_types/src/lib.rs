use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in PATCH bodies.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

/// Daily costs per person, in major currency units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyCosts {
    pub accommodation: f64,
    pub food: f64,
    pub transport: f64,
    pub activities: f64,
}

pub mod city {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct CityCosts {
        pub budget: DailyCosts,
        pub mid_range: DailyCosts,
        pub luxury: DailyCosts,
    }

    /// Query string of `GET /cities`.
    ///
    /// `lat` and `lon` must be given together; the listing is then sorted
    /// nearest first.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CityListQuery {
        pub q: Option<String>,
        pub lat: Option<f64>,
        pub lon: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CityView {
        pub id: String,
        pub name: String,
        pub country: String,
        pub country_code: String,
        pub flag: Option<String>,
        pub latitude: f64,
        pub longitude: f64,
        pub currency: String,
        pub tips: Option<String>,
        pub transport_info: Option<String>,
        pub cash_info: Option<String>,
        pub costs: CityCosts,
        /// Kilometres from the requested origin, if any.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub distance_km: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CityListResponse {
        pub cities: Vec<CityView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CityNew {
        pub name: String,
        pub country: String,
        /// ISO 3166-1 alpha-2.
        pub country_code: String,
        pub latitude: f64,
        pub longitude: f64,
        pub currency: String,
        pub tips: Option<String>,
        pub transport_info: Option<String>,
        pub cash_info: Option<String>,
        pub costs: CityCosts,
    }

    /// Partial update; `null` clears a note, an absent field keeps it.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CityUpdate {
        pub name: Option<String>,
        pub country: Option<String>,
        pub country_code: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub currency: Option<String>,
        #[serde(default, deserialize_with = "double_option")]
        pub tips: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub transport_info: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub cash_info: Option<Option<String>>,
    }
}

pub mod trip {
    use super::*;

    /// Per-category overrides in minor units. `null`/absent or `0` falls back
    /// to the city default.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BudgetOverrides {
        pub accommodation: Option<i64>,
        pub food: Option<i64>,
        pub transport: Option<i64>,
        pub activities: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripNew {
        pub city_id: String,
        pub name: String,
        pub travel_style: Option<TravelStyle>,
        pub start_date: NaiveDate,
        /// Inclusive.
        pub end_date: NaiveDate,
        pub travelers: Option<u32>,
        pub budget: Option<BudgetOverrides>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TripUpdate {
        pub name: Option<String>,
        pub travel_style: Option<TravelStyle>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub travelers: Option<u32>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Visibility {
        Private,
        Revoked,
        Public,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripView {
        pub id: String,
        pub owner: String,
        pub city_id: String,
        pub city_name: String,
        pub name: String,
        pub travel_style: TravelStyle,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub days: u32,
        pub travelers: u32,
        pub budget: BudgetOverrides,
        pub visibility: Visibility,
        /// Only returned to the owner.
        pub share_token: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripDetail {
        pub trip: TripView,
        pub currency: String,
        pub effective_costs: DailyCosts,
        pub custom_cost_count: u8,
        pub can_edit: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripListItem {
        pub trip: TripView,
        pub shared_with_me: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripListResponse {
        pub trips: Vec<TripListItem>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PublicToggle {
        pub is_public: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareState {
        pub is_public: bool,
        pub share_token: Option<String>,
        pub visibility: Visibility,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CostCategory {
        Accommodation,
        Food,
        Transport,
        Activities,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryBudget {
        pub category: CostCategory,
        pub planned_minor: i64,
        pub spent_minor: i64,
        pub remaining_minor: i64,
    }

    /// Planned versus spent totals for the whole party and trip length.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetSummary {
        pub days: u32,
        pub travelers: u32,
        pub daily: DailyCosts,
        pub categories: Vec<CategoryBudget>,
        /// Spending recorded under `other`; never planned.
        pub other_spent_minor: i64,
        pub planned_total_minor: i64,
        pub spent_total_minor: i64,
        pub remaining_total_minor: i64,
    }
}

pub mod share {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareNew {
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub username: String,
        pub shared_by: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SharesResponse {
        pub shares: Vec<ShareView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExpenseCategory {
        Accommodation,
        Food,
        Transport,
        Activities,
        Other,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub category: ExpenseCategory,
        /// Must be > 0.
        pub amount_minor: i64,
        pub note: Option<String>,
        pub spent_on: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub category: ExpenseCategory,
        pub amount_minor: i64,
        pub note: Option<String>,
        pub spent_on: NaiveDate,
        pub created_by: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod packing {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PackingCategory {
        Documents,
        Clothing,
        Toiletries,
        Electronics,
        Extras,
        Custom,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PackingItem {
        /// Only custom items have an id.
        pub id: Option<String>,
        pub name: String,
        pub category: PackingCategory,
        pub quantity: u32,
        pub packed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PackingListResponse {
        pub items: Vec<PackingItem>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PackingItemNew {
        pub name: String,
        pub quantity: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PackingItemUpdate {
        pub packed: bool,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub username: String,
        pub is_admin: bool,
        pub is_premium: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UsersResponse {
        pub users: Vec<UserView>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserFlagsUpdate {
        pub is_admin: Option<bool>,
        pub is_premium: Option<bool>,
    }
}
