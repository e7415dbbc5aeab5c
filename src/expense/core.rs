//! The expense records and request/response bodies exchanged with the Expense API.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The opaque identifier the Expense API assigns to an expense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for ExpenseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recorded expense, as returned by the Expense API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// The calendar date as "YYYY-MM-DD".
    pub date: String,
}

const API_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

impl Expense {
    /// The expense date, if the API sent a valid "YYYY-MM-DD" date.
    pub fn parsed_date(&self) -> Option<Date> {
        Date::parse(self.date.trim(), API_DATE_FORMAT).ok()
    }

    /// The date for display, e.g. "Jan 15, 2024".
    ///
    /// The calendar date is used as is, so no timezone can shift it to the
    /// previous or next day. Dates that cannot be parsed are shown unchanged.
    pub fn display_date(&self) -> String {
        self.parsed_date()
            .and_then(format_display_date)
            .unwrap_or_else(|| self.date.clone())
    }
}

fn format_display_date(date: Date) -> Option<String> {
    date.format(DISPLAY_DATE_FORMAT).ok()
}

/// The request body for creating an expense.
///
/// `amount` is `None` when the user's input was not a number; it is sent as
/// `null` and the API decides what to do with it. `date` is `None` when the
/// user left it empty. It is then left out of the body and the API uses the
/// current date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: Option<f64>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// The raw values of the expense entry form.
///
/// Every field is kept as text so that malformed input reaches the Expense
/// API for validation instead of being rejected while parsing the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
}

impl From<ExpenseForm> for NewExpense {
    fn from(form: ExpenseForm) -> Self {
        let date = form.date.trim();

        Self {
            description: form.description.trim().to_owned(),
            amount: parse_amount(&form.amount),
            category: form.category.trim().to_owned(),
            date: (!date.is_empty()).then(|| date.to_owned()),
        }
    }
}

/// Parse `text` as an amount, giving `None` where a browser would get NaN.
fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// The constraints that narrow the expense listing.
///
/// Empty values in the query string mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Only list expenses in this category.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    /// Only list expenses in this month, as "YYYY-MM".
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub month: Option<String>,
}

impl FilterState {
    /// A filter that lets every expense through.
    pub fn cleared() -> Self {
        Self::default()
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.and_then(|value| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    }))
}

/// The response of a create or delete request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MutationOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The (filtered) expenses and the sum of their amounts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
    pub total: f64,
}
