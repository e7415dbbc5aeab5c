//! The expense tracker page and the manual refresh endpoint.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxResponseTrigger;
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    alert::ALERT_CONTAINER_ID,
    endpoints,
    events::{EXPENSES_CHANGED, FILTERS_CLEARED},
    expense::expense_form_view,
    filters::{FILTERS_FORM_ID, filter_controls_view},
    html::{
        BUTTON_SECONDARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, currency_input_styles,
        loading_spinner,
    },
    sequence::{PAGE_ID_HEADER, PageId, RequestSequencer},
    timezone,
};

/// The ID of the element the expense listing is swapped into.
const EXPENSES_LIST_ID: &str = "expenses-list";
/// The ID of the element the statistics panel is swapped into.
const STATISTICS_ID: &str = "statistics";

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
    /// Hands out the ID that keeps this page's requests in their own sequence.
    pub sequencer: Arc<RequestSequencer>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            sequencer: state.sequencer.clone(),
        }
    }
}

/// Route handler for the expense tracker page.
///
/// The page is a shell: the listing, the statistics panel and the category
/// options load themselves once the page is on screen. Every request they make
/// carries this page's ID.
pub async fn get_expenses_page(State(state): State<ExpensesPageState>) -> Result<Response, Error> {
    let today = timezone::today(&state.local_timezone)?;
    let page_id = state.sequencer.new_page();

    Ok(expenses_page_view(today, page_id).into_response())
}

/// Ask every view on the page to reload from the Expense API.
pub async fn refresh_endpoint() -> Response {
    (
        StatusCode::NO_CONTENT,
        HxResponseTrigger::normal([EXPENSES_CHANGED]),
        (),
    )
        .into_response()
}

fn expenses_page_view(today: Date, page_id: PageId) -> Markup {
    let page_headers = format!(r#"{{"{PAGE_ID_HEADER}": "{page_id}"}}"#);
    let reload_on_change = format!("load, {EXPENSES_CHANGED} from:body");
    let list_trigger = format!(
        "{reload_on_change}, change from:#{FILTERS_FORM_ID}, {FILTERS_CLEARED} from:body"
    );

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE) hx-headers=(page_headers)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                h1 class="text-2xl font-bold" { "Expense Tracker" }

                section class=(CARD_STYLE)
                {
                    h2 class="text-xl font-semibold" { "Add Expense" }

                    (expense_form_view(today))
                }

                section class=(CARD_STYLE)
                {
                    h2 class="text-xl font-semibold" { "Statistics" }

                    div
                        id=(STATISTICS_ID)
                        hx-get=(endpoints::STATISTICS_FRAGMENT)
                        hx-trigger=(reload_on_change)
                        hx-sync="this:replace"
                    {
                        (loading_spinner())
                    }
                }

                section class=(CARD_STYLE)
                {
                    div class="flex flex-wrap justify-between items-center gap-4"
                    {
                        h2 class="text-xl font-semibold" { "Expenses" }

                        button
                            type="button"
                            hx-post=(endpoints::REFRESH)
                            hx-swap="none"
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Refresh"
                        }
                    }

                    form id=(FILTERS_FORM_ID)
                    {
                        (filter_controls_view())
                    }

                    div
                        id=(EXPENSES_LIST_ID)
                        class="relative overflow-x-auto"
                        hx-get=(endpoints::EXPENSES_FRAGMENT)
                        hx-include={ "#" (FILTERS_FORM_ID) }
                        hx-trigger=(list_trigger)
                        hx-sync="this:replace"
                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    {
                        (loading_spinner())
                    }
                }
            }
        }
    };

    base("Expenses", &[currency_input_styles()], &content)
}
