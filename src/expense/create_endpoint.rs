//! Defines the endpoint for creating a new expense.

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxResponseTrigger;
use maud::html;

use crate::{
    AppState,
    alert::Alert,
    events::EXPENSES_CHANGED,
    expense::{
        ExpenseApiClient,
        core::{ExpenseForm, NewExpense},
        form::expense_form_view,
    },
    timezone,
};

const CREATE_SUCCEEDED: &str = "Expense added successfully!";
const CREATE_FAILED: &str = "Failed to add expense";

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The client for the Expense API.
    pub api: ExpenseApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense.
///
/// On success, responds with a reset entry form, a success alert and an
/// `expensesChanged` event so that the rest of the page reloads. On failure,
/// responds with an error alert and leaves the form as the user filled it in.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let new_expense = NewExpense::from(form);

    let message = match state.api.create_expense(&new_expense).await {
        Ok(message) => message.unwrap_or_else(|| CREATE_SUCCEEDED.to_owned()),
        Err(error) => {
            tracing::error!("Could not create expense {new_expense:?}: {error}");
            return error.into_alert_response(CREATE_FAILED);
        }
    };

    let today = match timezone::today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(CREATE_FAILED),
    };

    (
        HxResponseTrigger::normal([EXPENSES_CHANGED]),
        html! {
            (expense_form_view(today))
            (Alert::Success { message }.into_oob_html())
        },
    )
        .into_response()
}
