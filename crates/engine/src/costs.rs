//! Daily cost resolution.
//!
//! A city carries default daily costs per [`TravelStyle`], in **major** units
//! (`f64`). A trip may override any of the four categories with an amount in
//! **minor** units (`i64` cents). The effective daily cost of a trip is
//! resolved category by category: an override wins when it is set and
//! non-zero, otherwise the city default for the trip's travel style applies.
//!
//! ```rust
//! use engine::{CostOverrides, DailyCostSet, resolve_effective_costs};
//!
//! let defaults = DailyCostSet::new(80.0, 40.0, 15.0, 25.0);
//! let overrides = CostOverrides {
//!     food: Some(5_550),
//!     ..CostOverrides::default()
//! };
//!
//! let effective = resolve_effective_costs(&overrides, &defaults);
//! assert_eq!(effective.food, 55.5);
//! assert_eq!(effective.accommodation, 80.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine};

/// How lavishly a trip is planned. Selects which city default set applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 3] = [Self::Budget, Self::MidRange, Self::Luxury];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::MidRange => "mid_range",
            Self::Luxury => "luxury",
        }
    }
}

impl TryFrom<&str> for TravelStyle {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "budget" => Ok(Self::Budget),
            "mid_range" => Ok(Self::MidRange),
            "luxury" => Ok(Self::Luxury),
            other => Err(EngineError::InvalidInput(format!(
                "invalid travel style: {other}"
            ))),
        }
    }
}

/// One of the four budgeted daily cost categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Accommodation,
    Food,
    Transport,
    Activities,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        Self::Accommodation,
        Self::Food,
        Self::Transport,
        Self::Activities,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Activities => "activities",
        }
    }
}

impl TryFrom<&str> for CostCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "accommodation" => Ok(Self::Accommodation),
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "activities" => Ok(Self::Activities),
            other => Err(EngineError::InvalidInput(format!(
                "invalid cost category: {other}"
            ))),
        }
    }
}

/// Daily costs in major currency units, always fully populated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyCostSet {
    pub accommodation: f64,
    pub food: f64,
    pub transport: f64,
    pub activities: f64,
}

impl DailyCostSet {
    #[must_use]
    pub const fn new(accommodation: f64, food: f64, transport: f64, activities: f64) -> Self {
        Self {
            accommodation,
            food,
            transport,
            activities,
        }
    }

    #[must_use]
    pub fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Accommodation => self.accommodation,
            CostCategory::Food => self.food,
            CostCategory::Transport => self.transport,
            CostCategory::Activities => self.activities,
        }
    }

    /// Sum of the four categories.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.accommodation + self.food + self.transport + self.activities
    }

    /// Rejects negative, non-finite or out-of-range figures.
    pub fn validate(&self) -> ResultEngine<()> {
        for category in CostCategory::ALL {
            let value = self.get(category);
            if !value.is_finite()
                || value < 0.0
                || MoneyCents::from_major(value) > MoneyCents::MAX
            {
                return Err(EngineError::InvalidAmount(format!(
                    "{} cost must be between 0 and {}",
                    category.as_str(),
                    MoneyCents::MAX
                )));
            }
        }
        Ok(())
    }
}

/// The default daily cost sets of a city, one per travel style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CityCosts {
    pub budget: DailyCostSet,
    pub mid_range: DailyCostSet,
    pub luxury: DailyCostSet,
}

impl CityCosts {
    #[must_use]
    pub fn for_style(&self, style: TravelStyle) -> &DailyCostSet {
        match style {
            TravelStyle::Budget => &self.budget,
            TravelStyle::MidRange => &self.mid_range,
            TravelStyle::Luxury => &self.luxury,
        }
    }

    pub fn set_style(&mut self, style: TravelStyle, costs: DailyCostSet) {
        match style {
            TravelStyle::Budget => self.budget = costs,
            TravelStyle::MidRange => self.mid_range = costs,
            TravelStyle::Luxury => self.luxury = costs,
        }
    }

    pub fn validate(&self) -> ResultEngine<()> {
        for style in TravelStyle::ALL {
            self.for_style(style).validate()?;
        }
        Ok(())
    }
}

/// Per-category trip overrides in minor units. `None` means "use the city
/// default".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostOverrides {
    pub accommodation: Option<i64>,
    pub food: Option<i64>,
    pub transport: Option<i64>,
    pub activities: Option<i64>,
}

impl CostOverrides {
    #[must_use]
    pub fn get(&self, category: CostCategory) -> Option<i64> {
        match category {
            CostCategory::Accommodation => self.accommodation,
            CostCategory::Food => self.food,
            CostCategory::Transport => self.transport,
            CostCategory::Activities => self.activities,
        }
    }

    /// The override that actually takes precedence for `category`.
    ///
    /// A stored `Some(0)` counts as unset: a zero override can never force a
    /// category to cost nothing, it falls back to the city default.
    #[must_use]
    pub fn effective(&self, category: CostCategory) -> Option<i64> {
        self.get(category).filter(|&minor| minor != 0)
    }

    /// Input validation for overrides coming from a client. Negative values
    /// are rejected here so they never reach the resolver.
    pub fn validate(&self) -> ResultEngine<()> {
        for category in CostCategory::ALL {
            if let Some(minor) = self.get(category)
                && !(0..=MoneyCents::MAX.cents()).contains(&minor)
            {
                return Err(EngineError::InvalidAmount(format!(
                    "{} override must be between 0 and {}",
                    category.as_str(),
                    MoneyCents::MAX.cents()
                )));
            }
        }
        Ok(())
    }
}

/// Resolves the daily costs a trip actually budgets with.
///
/// `city_defaults` must already be the set for the trip's travel style.
#[must_use]
pub fn resolve_effective_costs(
    overrides: &CostOverrides,
    city_defaults: &DailyCostSet,
) -> DailyCostSet {
    let pick = |category: CostCategory| match overrides.effective(category) {
        Some(minor) => minor as f64 / 100.0,
        None => city_defaults.get(category),
    };

    DailyCostSet {
        accommodation: pick(CostCategory::Accommodation),
        food: pick(CostCategory::Food),
        transport: pick(CostCategory::Transport),
        activities: pick(CostCategory::Activities),
    }
}

/// `true` if at least one override takes precedence over the city default.
#[must_use]
pub fn has_custom_costs(overrides: &CostOverrides) -> bool {
    count_custom_costs(overrides) > 0
}

/// Number of categories (0..=4) whose override takes precedence.
#[must_use]
pub fn count_custom_costs(overrides: &CostOverrides) -> u8 {
    CostCategory::ALL
        .iter()
        .filter(|&&category| overrides.effective(category).is_some())
        .count() as u8
}
