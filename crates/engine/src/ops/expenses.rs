use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Expense, ExpenseCmd, Principal, ResultEngine, expenses};

use super::{Engine, normalize_optional_text, with_tx};

impl Engine {
    /// Records money spent on a trip (owner-only).
    pub async fn add_expense(&self, cmd: ExpenseCmd, principal: &Principal) -> ResultEngine<Expense> {
        let note = normalize_optional_text(cmd.note.as_deref());
        with_tx!(self, |db_tx| {
            let trip = self
                .require_trip_write(&db_tx, &cmd.trip_id, principal)
                .await?;
            if cmd.spent_on < trip.start_date || cmd.spent_on > trip.end_date {
                return Err(EngineError::InvalidInput(
                    "expense date is outside the trip".to_string(),
                ));
            }
            let expense = Expense::new(
                &trip.id,
                cmd.category,
                cmd.amount,
                note,
                cmd.spent_on,
                &principal.id,
            )?;
            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            Ok(expense)
        })
    }

    /// Expenses of a trip the viewer may read, by spending day.
    pub async fn list_expenses(
        &self,
        trip_id: &str,
        viewer: Option<&Principal>,
    ) -> ResultEngine<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_read(&db_tx, trip_id, viewer).await?;
            expenses::Entity::find()
                .filter(expenses::Column::TripId.eq(trip.id))
                .order_by_asc(expenses::Column::SpentOn)
                .order_by_asc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expense::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Deletes an expense (owner-only).
    pub async fn delete_expense(
        &self,
        trip_id: &str,
        expense_id: &str,
        principal: &Principal,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let res = expenses::Entity::delete_many()
                .filter(expenses::Column::Id.eq(expense_id.to_string()))
                .filter(expenses::Column::TripId.eq(trip.id))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("expense not exists".to_string()));
            }
            Ok(())
        })
    }
}
