//! The endpoint URIs served to the browser.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The page for tracking expenses.
pub const ROOT: &str = "/";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for submitting a new expense.
pub const EXPENSES: &str = "/expenses";
/// The route for deleting a single expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";

/// The fragment with the (optionally filtered) expense listing.
pub const EXPENSES_FRAGMENT: &str = "/fragments/expenses";
/// The fragment with the statistics panel.
pub const STATISTICS_FRAGMENT: &str = "/fragments/statistics";
/// The fragment with the options for the category filter.
pub const CATEGORIES_FRAGMENT: &str = "/fragments/categories";
/// The fragment with the filter controls in their cleared state.
pub const FILTERS_FRAGMENT: &str = "/fragments/filters";
/// The route for asking every view on the page to reload.
pub const REFRESH: &str = "/fragments/refresh";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// `id` is percent-encoded so that it always forms a single path segment.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        urlencoding::encode(id),
        &endpoint_path[param_end..]
    )
}
