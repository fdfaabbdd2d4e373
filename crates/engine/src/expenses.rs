//! Money actually spent during a trip.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ExpenseCategory, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub category: ExpenseCategory,
    pub amount: MoneyCents,
    pub note: Option<String>,
    pub spent_on: NaiveDate,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        trip_id: &str,
        category: ExpenseCategory,
        amount: MoneyCents,
        note: Option<String>,
        spent_on: NaiveDate,
        created_by: &str,
    ) -> ResultEngine<Self> {
        if amount.is_zero() || amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if amount > MoneyCents::MAX {
            return Err(EngineError::InvalidAmount(format!(
                "amount must not exceed {}",
                MoneyCents::MAX
            )));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            category,
            amount,
            note,
            spent_on,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub category: String,
    pub amount_minor: i64,
    pub note: Option<String>,
    pub spent_on: Date,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::trips::Entity",
        from = "Column::TripId",
        to = "crate::trips::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trips,
}

impl Related<crate::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.clone()),
            trip_id: ActiveValue::Set(expense.trip_id.clone()),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            note: ActiveValue::Set(expense.note.clone()),
            spent_on: ActiveValue::Set(expense.spent_on),
            created_by: ActiveValue::Set(expense.created_by.clone()),
            created_at: ActiveValue::Set(expense.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            trip_id: model.trip_id,
            category: ExpenseCategory::try_from(model.category.as_str())?,
            amount: MoneyCents::new(model.amount_minor),
            note: model.note,
            spent_on: model.spent_on,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
