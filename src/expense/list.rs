//! The expense listing fragment.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    alert::{ALERT_CONTAINER_ID, Alert},
    endpoints::{self, format_endpoint},
    expense::{
        ExpenseApiClient,
        core::{Expense, ExpenseList, FilterState},
    },
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_currency,
    },
    sequence::{PageId, RequestSequencer, View},
};

const EMPTY_LIST_MESSAGE: &str = "No expenses found. Add your first expense above!";
const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this expense?";

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ExpenseListState {
    /// The client for the Expense API.
    pub api: ExpenseApiClient,
    /// Tracks the latest listing request so stale answers can be dropped.
    pub sequencer: Arc<RequestSequencer>,
}

impl FromRef<AppState> for ExpenseListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            sequencer: state.sequencer.clone(),
        }
    }
}

/// Render the expenses that match the filter in the query string.
///
/// If a newer listing request started while this one waited for the Expense
/// API, the answer is dropped with `204 No Content` so that it cannot
/// overwrite the newer list. On failure, responds with an error alert and
/// the previous list stays on the page.
pub async fn get_expenses_fragment(
    State(state): State<ExpenseListState>,
    page: Option<PageId>,
    Query(filter): Query<FilterState>,
) -> Response {
    let token = state.sequencer.issue(page, View::List);
    let result = state.api.list_expenses(&filter).await;

    if !state.sequencer.is_current(token) {
        tracing::debug!("Discarding expense list for superseded request {filter:?}");
        return StatusCode::NO_CONTENT.into_response();
    }

    match result {
        Ok(list) => expense_list_view(&list).into_response(),
        Err(error) => {
            tracing::error!("Could not list expenses with filter {filter:?}: {error}");
            Alert::Error {
                message: format!("Error loading expenses: {error}"),
            }
            .into_error_response(StatusCode::BAD_GATEWAY)
        }
    }
}

fn expense_list_view(list: &ExpenseList) -> Markup {
    if list.expenses.is_empty() {
        return html! {
            p
                class="py-8 text-center text-gray-500 dark:text-gray-400"
                data-empty-state="true"
            {
                (EMPTY_LIST_MESSAGE)
            }
        };
    }

    html! {
        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                }
            }

            tbody
            {
                @for expense in &list.expenses {
                    (expense_row_view(expense))
                }

                tr class="font-semibold text-gray-900 dark:text-white" data-total-row="true"
                {
                    td class=(TABLE_CELL_STYLE) colspan="3" { "Total:" }
                    td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                    {
                        (format_currency(list.total))
                    }
                    td class=(TABLE_CELL_STYLE) {}
                }
            }
        }
    }
}

fn expense_row_view(expense: &Expense) -> Markup {
    let delete_url = format_endpoint(endpoints::EXPENSE, expense.id.as_ref());

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-row="true" data-expense-id=(expense.id)
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                time datetime=(expense.date) { (expense.display_date()) }
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }

            td class=(TABLE_CELL_STYLE)
            {
                (expense.description)
            }

            td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
            {
                (format_currency(expense.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm=(DELETE_CONFIRMATION)
                    hx-swap="none"
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
