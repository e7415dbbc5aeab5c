//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the page's alert container, either as the target
//! of an error response (`hx-target-error`) or as an out-of-band swap that
//! rides along with a successful response. `static/app.js` hides the alert
//! again after a few seconds.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use maud::{Markup, html};

/// The ID of the element that alerts are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The user's action succeeded.
    Success {
        /// The text to display.
        message: String,
    },
    /// The user's action failed.
    Error {
        /// The text to display.
        message: String,
    },
}

impl Alert {
    /// Render the alert as a fragment for the alert container.
    pub fn into_html(self) -> Markup {
        let (style, role, message) = match self {
            Alert::Success { message } => (
                "border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-gray-800 dark:text-green-400",
                "status",
                message,
            ),
            Alert::Error { message } => (
                "border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400",
                "alert",
                message,
            ),
        };

        html! {
            div
                class={ "message flex items-center justify-between gap-4 p-4 text-sm rounded-lg border shadow " (style) }
                role=(role)
            {
                p { (message) }

                button
                    type="button"
                    class="font-bold"
                    aria-label="Dismiss"
                    data-dismiss-alert="true"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert so that htmx swaps it into the alert container
    /// out-of-band, alongside the main response content.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id=(ALERT_CONTAINER_ID) hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }
}

impl Alert {
    /// Respond with the alert and an error `status`.
    ///
    /// The element that made the request may swap its own content with
    /// `outerHTML` or `none`, so the swap style is set to `innerHTML` here to
    /// keep the alert container in place.
    pub fn into_error_response(self, status: StatusCode) -> Response {
        (status, HxReswap(SwapOption::InnerHtml), self.into_html()).into_response()
    }
}
