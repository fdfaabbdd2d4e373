//! Trip budget totals.
//!
//! Planned amounts are derived from the effective daily costs: each category
//! is converted to minor units once, then multiplied by the number of days and
//! travelers, so totals are exact integers. Spent amounts come from the
//! trip's expenses.

use serde::{Deserialize, Serialize};

use crate::{CostCategory, DailyCostSet, EngineError, MoneyCents, ResultEngine};

/// Category of a recorded expense. Everything that does not fit one of the
/// budgeted categories is `Other`, which is spent but never planned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Accommodation,
    Food,
    Transport,
    Activities,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Activities => "activities",
            Self::Other => "other",
        }
    }

    pub fn cost_category(self) -> Option<CostCategory> {
        match self {
            Self::Accommodation => Some(CostCategory::Accommodation),
            Self::Food => Some(CostCategory::Food),
            Self::Transport => Some(CostCategory::Transport),
            Self::Activities => Some(CostCategory::Activities),
            Self::Other => None,
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "other" => Ok(Self::Other),
            other => Ok(match CostCategory::try_from(other)? {
                CostCategory::Accommodation => Self::Accommodation,
                CostCategory::Food => Self::Food,
                CostCategory::Transport => Self::Transport,
                CostCategory::Activities => Self::Activities,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: CostCategory,
    pub planned: MoneyCents,
    pub spent: MoneyCents,
    pub remaining: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub days: u32,
    pub travelers: u32,
    pub daily: DailyCostSet,
    pub categories: Vec<CategoryBudget>,
    pub other_spent: MoneyCents,
    pub planned_total: MoneyCents,
    pub spent_total: MoneyCents,
    pub remaining_total: MoneyCents,
}

fn overflow() -> EngineError {
    EngineError::InvalidAmount("budget total out of range".to_string())
}

fn sum(amounts: impl IntoIterator<Item = MoneyCents>, start: MoneyCents) -> ResultEngine<MoneyCents> {
    amounts
        .into_iter()
        .try_fold(start, |acc, amount| acc.checked_add(amount))
        .ok_or_else(overflow)
}

/// Builds the budget summary of a trip.
///
/// `daily` is the per-person effective daily cost set. Totals that do not fit
/// in `i64` cents fail with [`EngineError::InvalidAmount`].
pub fn summarize(
    daily: &DailyCostSet,
    days: u32,
    travelers: u32,
    expenses: &[(ExpenseCategory, MoneyCents)],
) -> ResultEngine<BudgetSummary> {
    let multiplier = i64::from(days) * i64::from(travelers);

    let spent_in = |category: ExpenseCategory| {
        sum(
            expenses
                .iter()
                .filter(|(c, _)| *c == category)
                .map(|(_, amount)| *amount),
            MoneyCents::ZERO,
        )
    };

    let mut categories = Vec::with_capacity(CostCategory::ALL.len());
    for expense_category in [
        ExpenseCategory::Accommodation,
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Activities,
    ] {
        let Some(category) = expense_category.cost_category() else {
            continue;
        };
        let planned = MoneyCents::from_major(daily.get(category))
            .checked_mul(multiplier)
            .ok_or_else(overflow)?;
        let spent = spent_in(expense_category)?;
        categories.push(CategoryBudget {
            category,
            planned,
            spent,
            remaining: planned.checked_sub(spent).ok_or_else(overflow)?,
        });
    }

    let other_spent = spent_in(ExpenseCategory::Other)?;
    let planned_total = sum(categories.iter().map(|c| c.planned), MoneyCents::ZERO)?;
    let spent_total = sum(categories.iter().map(|c| c.spent), other_spent)?;

    Ok(BudgetSummary {
        days,
        travelers,
        daily: *daily,
        categories,
        other_spent,
        planned_total,
        spent_total,
        remaining_total: planned_total
            .checked_sub(spent_total)
            .ok_or_else(overflow)?,
    })
}
