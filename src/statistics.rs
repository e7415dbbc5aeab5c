//! The statistics panel: totals, average and the per-category breakdown.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    expense::ExpenseApiClient,
    html::{format_currency, format_percentage},
    sequence::{PageId, RequestSequencer, View},
};

/// Aggregate statistics over all expenses, computed by the Expense API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatisticsSummary {
    pub total: f64,
    pub count: u64,
    pub average: f64,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryShare>,
}

/// The amount spent in one category and its share of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct CategoryShare {
    pub amount: f64,
    /// Percentage of the total, 0 to 100.
    pub percentage: f64,
}

impl StatisticsSummary {
    /// The category breakdown ordered by descending amount.
    ///
    /// Categories with equal amounts keep alphabetical order.
    pub fn breakdown(&self) -> Vec<(&str, CategoryShare)> {
        let mut breakdown = self
            .categories
            .iter()
            .map(|(category, share)| (category.as_str(), *share))
            .collect::<Vec<_>>();

        breakdown.sort_by(|(_, a), (_, b)| b.amount.total_cmp(&a.amount));

        breakdown
    }
}

/// The state needed for the statistics panel.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    pub api: ExpenseApiClient,
    pub sequencer: Arc<RequestSequencer>,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            sequencer: state.sequencer.clone(),
        }
    }
}

/// Render the statistics panel.
///
/// This is a background refresh: failures are logged and answered with
/// `204 No Content`, so the panel keeps its previous content and the user is
/// not interrupted. Responses to superseded requests are discarded the same way.
pub async fn get_statistics_fragment(
    State(state): State<StatisticsState>,
    page: Option<PageId>,
) -> Response {
    let token = state.sequencer.issue(page, View::Statistics);
    let result = state.api.get_statistics().await;

    if !state.sequencer.is_current(token) {
        tracing::debug!("Discarding statistics response for superseded request");
        return StatusCode::NO_CONTENT.into_response();
    }

    match result {
        Ok(statistics) => statistics_view(&statistics).into_response(),
        Err(error) => {
            tracing::error!("Error loading statistics: {error}");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

fn statistics_view(statistics: &StatisticsSummary) -> Markup {
    html! {
        dl class="grid grid-cols-3 gap-4 text-center"
        {
            (stat_card("Total Expenses", "total-expenses", &format_currency(statistics.total)))
            (stat_card("Transactions", "transaction-count", &statistics.count.to_string()))
            (stat_card("Average", "average-expense", &format_currency(statistics.average)))
        }

        div id="category-breakdown" class="mt-6"
        {
            (category_breakdown_view(statistics))
        }
    }
}

fn stat_card(label: &str, id: &str, value: &str) -> Markup {
    html! {
        div class="rounded-lg bg-gray-50 dark:bg-gray-700 p-4"
        {
            dt class="text-xs uppercase text-gray-500 dark:text-gray-400" { (label) }
            dd id=(id) class="text-xl font-bold tabular-nums" { (value) }
        }
    }
}

fn category_breakdown_view(statistics: &StatisticsSummary) -> Markup {
    if statistics.categories.is_empty() {
        return html! {
            p
                class="text-center text-gray-500 dark:text-gray-400"
                data-empty-state="true"
            {
                "No category data available"
            }
        };
    }

    html! {
        h3 class="mb-3 font-semibold" { "By Category:" }

        ul class="space-y-2"
        {
            @for (category, share) in statistics.breakdown() {
                li
                    class="category-item flex justify-between border-b border-gray-200 dark:border-gray-700 pb-2"
                    data-category=(category)
                {
                    span class="category-name font-medium" { (category) }
                    span
                    {
                        span class="category-amount tabular-nums" { (format_currency(share.amount)) }
                        " "
                        span class="category-percentage text-sm text-gray-500 dark:text-gray-400"
                        {
                            "(" (format_percentage(share.percentage)) "%)"
                        }
                    }
                }
            }
        }
    }
}
