//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::get_category_options,
    endpoints,
    expense::{create_expense_endpoint, delete_expense_endpoint, get_expenses_fragment},
    expenses_page::{get_expenses_page, refresh_endpoint},
    filters::get_filters_fragment,
    not_found::get_404_not_found,
    statistics::get_statistics_fragment,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::EXPENSES, post(create_expense_endpoint))
        .route(endpoints::EXPENSE, delete(delete_expense_endpoint))
        .route(endpoints::EXPENSES_FRAGMENT, get(get_expenses_fragment))
        .route(endpoints::STATISTICS_FRAGMENT, get(get_statistics_fragment))
        .route(endpoints::CATEGORIES_FRAGMENT, get(get_category_options))
        .route(endpoints::FILTERS_FRAGMENT, get(get_filters_fragment))
        .route(endpoints::REFRESH, post(refresh_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
