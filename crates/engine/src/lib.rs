//! Trip budgeting engine.
//!
//! The pure modules ([`costs`], [`sharing`], [`budget`], [`packing`], [`geo`])
//! hold the business rules and do no I/O. [`Engine`] loads records through
//! sea-orm, applies those rules and persists the result, one database
//! transaction per operation.

pub use budget::{BudgetSummary, CategoryBudget, ExpenseCategory};
pub use cities::City;
pub use commands::{CityCmd, CityUpdate, ExpenseCmd, TripCmd, TripUpdate};
pub use costs::{
    CityCosts, CostCategory, CostOverrides, DailyCostSet, TravelStyle, count_custom_costs,
    has_custom_costs, resolve_effective_costs,
};
pub use error::EngineError;
pub use expenses::Expense;
pub use money::MoneyCents;
pub use ops::{CityListing, Engine, EngineBuilder, TripDetail, TripListing, UserView};
pub use packing::{PackingCategory, PackingItem};
pub use principal::{Capability, FREE_TRIP_LIMIT, Principal};
pub use sharing::{
    ExplicitShare, RandomTokenGenerator, SHARE_TOKEN_LEN, ShareState, TokenGenerator, TripAccess,
    Visibility, can_read, can_write, set_public,
};
pub use trips::Trip;

pub mod budget;
pub mod cities;
mod commands;
pub mod costs;
pub mod custom_items;
mod error;
pub mod expenses;
pub mod geo;
mod money;
mod ops;
pub mod packing;
mod principal;
pub mod shared_trips;
pub mod sharing;
pub mod trips;
pub mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
