//! Trip expenses

use api_types::expense::{ExpenseNew, ExpenseView, ExpensesResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ExpenseCmd, MoneyCents, Principal};

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let expenses = state
        .engine
        .list_expenses(&id, Some(&principal))
        .await?
        .into_iter()
        .map(views::expense_view)
        .collect();
    Ok(Json(ExpensesResponse { expenses }))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let mut cmd = ExpenseCmd::new(
        id,
        views::expense_category(payload.category),
        MoneyCents::new(payload.amount_minor),
        payload.spent_on,
    );
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }
    let expense = state.engine.add_expense(cmd, &principal).await?;
    Ok((StatusCode::CREATED, Json(views::expense_view(expense))))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path((id, expense_id)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_expense(&id, &expense_id, &principal)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
