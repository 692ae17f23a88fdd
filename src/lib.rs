//! Spendlog is a web app for recording day-to-day spending and reviewing
//! where the money went.
//!
//! This library provides an HTTP server that directly serves HTML pages for
//! adding, editing, filtering and summarising expenses.

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
mod dashboard;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;

pub use app_state::AppState;
pub use category::Category;
pub use expense::{Expense, ExpenseDraft, ExpenseId, ExpenseStore, Ledger, SqliteExpenseStore};
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    alert::Alert,
    html::error_view,
    internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

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
    /// An empty string was used as an expense title.
    #[error("expense title cannot be empty")]
    EmptyTitle,

    /// A negative amount was used to create or edit an expense.
    ///
    /// Expenses record money that was spent, so the amount must be zero or
    /// more.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(f64),

    /// An amount that is not a finite number (NaN or infinity) was used to
    /// create or edit an expense.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A string that does not name one of the fixed expense categories.
    #[error("\"{0}\" is not a recognised category")]
    InvalidCategory(String),

    /// A string that could not be parsed as a calendar date.
    ///
    /// Callers should pass in the original string that caused the error.
    #[error("could not parse \"{0}\" as a calendar date")]
    InvalidDate(String),

    /// The requested expense could not be found.
    ///
    /// This is surfaced for edits that reference a nonexistent id. Deleting
    /// a nonexistent id is a no-op, not an error.
    #[error("the requested expense could not be found")]
    NotFound,

    /// The expense store rejected an operation or could not be reached.
    ///
    /// The record set is left as it was before the failed operation; callers
    /// should reconcile with the store before serving further reads.
    #[error("the expense store is unavailable: {0}")]
    StoreUnavailable(String),

    /// An error occurred while getting the local offset from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the lock on the application ledger.
    #[error("could not acquire the ledger lock")]
    LedgerLock,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {error}");
                Error::StoreUnavailable(error.to_string())
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::LedgerLock => InternalServerError::default().into_response(),
            error @ (Error::EmptyTitle
            | Error::NegativeAmount(_)
            | Error::InvalidAmount(_)
            | Error::InvalidCategory(_)
            | Error::InvalidDate(_)) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Bad Request",
                    "400",
                    &error.to_string(),
                    "Adjust the input and try again.",
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not find expense".to_owned(),
                    details: "The expense could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            error @ (Error::EmptyTitle
            | Error::NegativeAmount(_)
            | Error::InvalidAmount(_)
            | Error::InvalidCategory(_)
            | Error::InvalidDate(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid expense".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::InvalidTimezone(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
