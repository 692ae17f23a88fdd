//! Alert fragments for reporting the outcome of a mutation to the user.
//!
//! Alerts are swapped into the fixed container rendered by the page shell,
//! so a failed form submission never replaces the page content.

use maud::{Markup, html};

const ALERT_SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg \
    bg-green-50 dark:bg-gray-800 dark:text-green-400 shadow-lg";
const ALERT_ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg \
    bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow-lg";

/// A message shown to the user after an operation.
#[derive(Debug, Clone)]
pub enum Alert {
    /// The operation succeeded.
    #[allow(dead_code)]
    Success {
        /// The headline of the alert.
        message: String,
    },
    /// The operation failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// What happened and what the user can do about it.
        details: String,
    },
}

impl Alert {
    /// Render the alert as markup targeting the shared alert container.
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Success { message } => html! {
                div id="alert-container" hx-swap-oob="true"
                {
                    div class=(ALERT_SUCCESS_STYLE) role="alert"
                    {
                        span class="font-medium" { (message) }
                    }
                }
            },
            Alert::Error { message, details } => html! {
                div id="alert-container" hx-swap-oob="true"
                {
                    div class=(ALERT_ERROR_STYLE) role="alert"
                    {
                        span class="font-medium" { (message) }
                        " "
                        (details)
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Alert;

    #[test]
    fn error_alert_contains_message_and_details() {
        let alert = Alert::Error {
            message: "Could not delete expense".to_owned(),
            details: "Try again later.".to_owned(),
        };

        let markup = alert.into_html().into_string();

        assert!(markup.contains("Could not delete expense"));
        assert!(markup.contains("Try again later."));
        assert!(markup.contains("role=\"alert\""));
    }
}
