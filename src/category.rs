//! The options of the category filter.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    expense::ExpenseApiClient,
    sequence::{PageId, RequestSequencer, View},
};

/// The state needed to list the categories.
#[derive(Debug, Clone)]
pub struct CategoryOptionsState {
    pub api: ExpenseApiClient,
    pub sequencer: Arc<RequestSequencer>,
}

impl FromRef<AppState> for CategoryOptionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            sequencer: state.sequencer.clone(),
        }
    }
}

/// The category currently selected in the filter bar, if any.
#[derive(Debug, Default, Deserialize)]
pub struct SelectedCategory {
    #[serde(default)]
    category: Option<String>,
}

/// Render the `<option>` elements for the category filter.
///
/// The first option always means "no constraint". The selected category stays
/// selected as long as it is still one of the options.
///
/// Like the statistics panel, this is a background refresh: failures are
/// logged and answered with `204 No Content` so the current options remain.
pub async fn get_category_options(
    State(state): State<CategoryOptionsState>,
    page: Option<PageId>,
    Query(selected): Query<SelectedCategory>,
) -> Response {
    let token = state.sequencer.issue(page, View::Categories);
    let result = state.api.get_categories().await;

    if !state.sequencer.is_current(token) {
        tracing::debug!("Discarding categories for superseded request");
        return StatusCode::NO_CONTENT.into_response();
    }

    match result {
        Ok(categories) => category_options_view(&categories, selected.category.as_deref())
            .into_response(),
        Err(error) => {
            tracing::error!("Error loading categories: {error}");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

fn category_options_view(categories: &[String], selected: Option<&str>) -> Markup {
    html! {
        option value="" { "All Categories" }

        @for category in categories {
            option value=(category) selected[selected == Some(category.as_str())]
            {
                (category)
            }
        }
    }
}
