//! An in-memory stand-in for the Expense API, served on an ephemeral port.
//!
//! It validates and aggregates expenses the same way the real service does,
//! so handlers can be tested end to end without it.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde::Deserialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use tokio::net::TcpListener;

use crate::expense::{Expense, ExpenseId};

/// List requests for this category are answered late.
pub(crate) const SLOW_CATEGORY: &str = "Slow";
const SLOW_RESPONSE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
struct StubState {
    expenses: Mutex<Vec<Expense>>,
    next_id: AtomicU64,
    fail_statistics: AtomicBool,
    delay_statistics: AtomicBool,
}

impl StubState {
    fn store(&self, description: &str, amount: f64, category: &str, date: &str) -> ExpenseId {
        let id = ExpenseId::new((self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string());

        self.expenses
            .lock()
            .expect("stub store lock poisoned")
            .push(Expense {
                id: id.clone(),
                description: description.to_owned(),
                amount,
                category: category.to_owned(),
                date: date.to_owned(),
            });

        id
    }
}

/// A running stub Expense API.
pub(crate) struct StubExpenseApi {
    /// The URL the stub is served at, e.g. "http://127.0.0.1:43567".
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubExpenseApi {
    /// Start a stub with no expenses.
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/api/expenses", get(list_expenses).post(create_expense))
            .route("/api/expenses/{expense_id}", delete(delete_expense))
            .route("/api/statistics", get(get_statistics))
            .route("/api/categories", get(get_categories))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind stub expense API");
        let address = listener
            .local_addr()
            .expect("Could not get stub expense API address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub expense API stopped");
        });

        Self {
            base_url: format!("http://{address}"),
            state,
        }
    }

    /// Add an expense directly to the store, bypassing validation.
    pub fn insert(&self, description: &str, amount: f64, category: &str, date: &str) -> ExpenseId {
        self.state.store(description, amount, category, date)
    }

    /// The stored expenses in insertion order.
    pub fn expenses(&self) -> Vec<Expense> {
        self.state
            .expenses
            .lock()
            .expect("stub store lock poisoned")
            .clone()
    }

    /// Answer statistics requests with a bare 500.
    pub fn fail_statistics(&self) {
        self.state.fail_statistics.store(true, Ordering::SeqCst);
    }

    /// Answer statistics requests late.
    pub fn delay_statistics(&self) {
        self.state.delay_statistics.store(true, Ordering::SeqCst);
    }
}

/// A URL that refuses connections.
pub(crate) async fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind listener");
    let address = listener.local_addr().expect("Could not get address");
    drop(listener);

    format!("http://{address}")
}

fn rejection(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "success": false, "error": error }))).into_response()
}

async fn create_expense(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    let text = |field: &str| {
        body.get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_owned()
    };
    let description = text("description");
    let category = text("category");
    let date = text("date");

    if description.is_empty() {
        return rejection(StatusCode::BAD_REQUEST, "Description cannot be empty");
    }

    if category.is_empty() {
        return rejection(StatusCode::BAD_REQUEST, "Category cannot be empty");
    }

    let amount = match body.get("amount") {
        None => Some(0.0),
        Some(Value::Number(amount)) => amount.as_f64(),
        Some(Value::String(amount)) => amount.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    let Some(amount) = amount else {
        return rejection(StatusCode::BAD_REQUEST, "Invalid amount");
    };
    if amount <= 0.0 {
        return rejection(StatusCode::BAD_REQUEST, "Amount must be greater than 0");
    }

    let date = if date.is_empty() {
        OffsetDateTime::now_utc().date().to_string()
    } else {
        date
    };
    state.store(&description, amount, &category, &date);

    Json(json!({ "success": true, "message": "Expense added successfully!" })).into_response()
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<String>,
    month: Option<String>,
}

async fn list_expenses(
    State(state): State<Arc<StubState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let category = query.category.filter(|category| !category.is_empty());
    let month = query.month.filter(|month| !month.is_empty());

    if category
        .as_deref()
        .is_some_and(|category| category.eq_ignore_ascii_case(SLOW_CATEGORY))
    {
        tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
    }

    let mut expenses = state
        .expenses
        .lock()
        .expect("stub store lock poisoned")
        .iter()
        .filter(|expense| {
            category
                .as_deref()
                .is_none_or(|category| expense.category.to_lowercase() == category.to_lowercase())
        })
        .filter(|expense| {
            month
                .as_deref()
                .is_none_or(|month| expense.date.starts_with(month))
        })
        .cloned()
        .collect::<Vec<_>>();
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let count = expenses.len();

    Json(json!({ "expenses": expenses, "total": total, "count": count })).into_response()
}

async fn delete_expense(
    State(state): State<Arc<StubState>>,
    Path(expense_id): Path<String>,
) -> Response {
    let mut expenses = state.expenses.lock().expect("stub store lock poisoned");
    let count_before = expenses.len();
    expenses.retain(|expense| expense.id.as_ref() != expense_id);

    if expenses.len() < count_before {
        Json(json!({ "success": true, "message": "Expense deleted successfully!" }))
            .into_response()
    } else {
        rejection(StatusCode::NOT_FOUND, "Expense not found")
    }
}

async fn get_statistics(State(state): State<Arc<StubState>>) -> Response {
    if state.delay_statistics.load(Ordering::SeqCst) {
        tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
    }

    if state.fail_statistics.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }

    let expenses = state.expenses.lock().expect("stub store lock poisoned").clone();
    if expenses.is_empty() {
        return Json(json!({ "total": 0, "count": 0, "average": 0, "categories": {} }))
            .into_response();
    }

    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let mut category_totals = BTreeMap::<String, f64>::new();
    for expense in &expenses {
        *category_totals.entry(expense.category.clone()).or_default() += expense.amount;
    }

    let categories = category_totals
        .into_iter()
        .map(|(category, amount)| {
            let percentage = if total > 0.0 {
                (amount / total * 1000.0).round() / 10.0
            } else {
                0.0
            };

            (category, json!({ "amount": amount, "percentage": percentage }))
        })
        .collect::<serde_json::Map<_, _>>();

    Json(json!({
        "total": total,
        "count": expenses.len(),
        "average": total / expenses.len() as f64,
        "categories": categories,
    }))
    .into_response()
}

async fn get_categories(State(state): State<Arc<StubState>>) -> Response {
    let categories = state
        .expenses
        .lock()
        .expect("stub store lock poisoned")
        .iter()
        .map(|expense| expense.category.clone())
        .collect::<BTreeSet<_>>();

    Json(json!({ "categories": categories })).into_response()
}
