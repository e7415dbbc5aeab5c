//! The filter bar above the expense listing.

use axum::response::{IntoResponse, Response};
use axum_htmx::HxResponseTrigger;
use maud::{Markup, html};

use crate::{
    endpoints,
    events::{EXPENSES_CHANGED, FILTERS_CLEARED},
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The ID of the form that holds the filter controls.
pub const FILTERS_FORM_ID: &str = "filters";

/// Render the filter controls with no constraints selected.
///
/// The category options are loaded from [endpoints::CATEGORIES_FRAGMENT] when
/// the controls are swapped in and whenever the expenses change. The select
/// sends its own value with that request so the selection survives a reload.
pub fn filter_controls_view() -> Markup {
    html! {
        div class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="filter-category"
                    hx-get=(endpoints::CATEGORIES_FRAGMENT)
                    hx-trigger={ "load, " (EXPENSES_CHANGED) " from:body" }
                    hx-swap="innerHTML"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All Categories" }
                }
            }

            div
            {
                label for="filter-month" class=(FORM_LABEL_STYLE) { "Month" }

                input
                    name="month"
                    id="filter-month"
                    type="month"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button
                type="button"
                hx-get=(endpoints::FILTERS_FRAGMENT)
                hx-target={ "#" (FILTERS_FORM_ID) }
                hx-swap="innerHTML"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Clear Filters"
            }
        }
    }
}

/// Reset the filter bar.
///
/// The `filtersCleared` event fires once the cleared controls are on the page,
/// so the listing reloads with no constraints.
pub async fn get_filters_fragment() -> Response {
    (
        HxResponseTrigger::after_swap([FILTERS_CLEARED]),
        filter_controls_view(),
    )
        .into_response()
}
