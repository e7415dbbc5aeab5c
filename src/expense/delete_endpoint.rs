use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxResponseTrigger;

use crate::{
    AppState,
    alert::Alert,
    events::EXPENSES_CHANGED,
    expense::{ExpenseApiClient, core::ExpenseId},
};

const DELETE_SUCCEEDED: &str = "Expense deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete expense";

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The client for the Expense API.
    pub api: ExpenseApiClient,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for deleting an expense, responds with an alert.
///
/// The row is not removed by this response. The `expensesChanged` event makes
/// the listing reload, which drops the row along with any other changes.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    match state.api.delete_expense(&expense_id).await {
        Ok(message) => (
            HxResponseTrigger::normal([EXPENSES_CHANGED]),
            Alert::Success {
                message: message.unwrap_or_else(|| DELETE_SUCCEEDED.to_owned()),
            }
            .into_oob_html(),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response(DELETE_FAILED)
        }
    }
}
