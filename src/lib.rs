//! Expense View is a web front end for a personal expense-tracking service.
//!
//! The library serves a single HTML page plus the HTML fragments that the page
//! swaps in with htmx. Every fragment is rendered from the JSON returned by an
//! external Expense API; no expense data is stored here.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod endpoints;
mod events;
mod expense;
mod expenses_page;
mod filters;
mod html;
mod internal_server_error;
mod not_found;
mod routing;
mod sequence;
mod statistics;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use expense::ExpenseApiClient;
pub use routing::build_router;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the Expense API could not be completed, e.g., the
    /// connection was refused or dropped.
    ///
    /// The string is the message of the underlying transport error.
    #[error("{0}")]
    ApiUnavailable(String),

    /// The Expense API answered, but reported that the operation failed.
    ///
    /// `reason` is the error text supplied by the API, if any.
    #[error("the expense API answered {status}")]
    ApiRejected {
        /// The HTTP status the API answered with.
        status: StatusCode,
        /// The error text supplied by the API.
        reason: Option<String>,
    },

    /// The Expense API answered with a body that could not be decoded.
    #[error("could not decode the expense API response: {0}")]
    InvalidApiResponse(String),

    /// The base URL of the Expense API is not a valid base URL.
    #[error("invalid expense API URL \"{0}\"")]
    InvalidApiUrl(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return Error::InvalidApiResponse(error.to_string());
        }

        match error.status() {
            Some(status) => Error::ApiRejected {
                status,
                reason: None,
            },
            None => Error::ApiUnavailable(error.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// The text shown to the user when a user-initiated action fails.
    ///
    /// Transport failures are shown as "Error: <message>". API-reported
    /// failures show the API's own error text, or `fallback` if the API did
    /// not give one. Everything else falls back to `fallback`.
    fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::ApiUnavailable(message) => format!("Error: {message}"),
            Error::ApiRejected {
                reason: Some(reason),
                ..
            } if !reason.trim().is_empty() => reason.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// The status code used when the failure is reported to the browser.
    ///
    /// htmx only routes responses to the alert container when they carry an
    /// error status, so API rejections that arrived with a 2xx status are
    /// reported as 422.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ApiRejected { status, .. }
                if status.is_client_error() || status.is_server_error() =>
            {
                *status
            }
            Error::ApiRejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ApiUnavailable(_) | Error::InvalidApiResponse(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidApiUrl(_) | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Render the error as an alert for the alert container.
    ///
    /// `fallback` is shown when the error carries no user-facing text.
    fn into_alert_response(self, fallback: &str) -> Response {
        let status = self.status_code();
        let message = self.user_message(fallback);

        Alert::Error { message }.into_error_response(status)
    }
}
