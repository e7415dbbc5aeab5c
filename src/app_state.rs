//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use crate::{Error, expense::ExpenseApiClient, sequence::RequestSequencer, timezone};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the Expense API that stores the expenses.
    pub api: ExpenseApiClient,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// Orders the requests for each view so that stale answers are dropped.
    pub(crate) sequencer: Arc<RequestSequencer>,
}

impl AppState {
    /// Create a new [AppState] for the Expense API served at `api_url`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns an error if `api_url` is not a valid http(s) URL or
    /// `local_timezone` is not a known timezone.
    pub fn new(api_url: &str, local_timezone: &str) -> Result<Self, Error> {
        let api = ExpenseApiClient::new(api_url)?;
        timezone::today(local_timezone)?;

        Ok(Self {
            api,
            local_timezone: local_timezone.to_owned(),
            sequencer: Arc::new(RequestSequencer::new()),
        })
    }
}
