//! Defines the endpoint for deleting an expense.

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    app_state::SharedLedger,
    expense::{ExpenseId, lifecycle::reconcile_after_failure},
};

/// The state needed to delete an expense.
#[derive(Clone)]
pub struct DeleteExpenseState {
    /// The ledger that owns the expense record set.
    pub ledger: SharedLedger,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for deleting an expense.
///
/// Deleting an id that no longer exists still succeeds: the row is gone
/// either way, so the client's view stays correct.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_alert_response();
        }
    };

    if let Err(error) = ledger.remove(expense_id) {
        tracing::error!("could not delete expense {expense_id}: {error}");
        reconcile_after_failure(&mut ledger);

        return error.into_alert_response();
    }

    // The status code has to be 200 OK or HTMX will not delete the table row.
    Html("").into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use super::{DeleteExpenseState, delete_expense_endpoint};
    use crate::{AppState, Category, expense::ExpenseDraft};

    fn get_test_state_with_expense() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        let app_state = AppState::new(conn, "Etc/UTC").unwrap();

        let draft =
            ExpenseDraft::new("Coffee", 4.5, Category::Food, date!(2024 - 03 - 01)).unwrap();
        app_state
            .ledger
            .lock()
            .unwrap()
            .submit(draft, None)
            .expect("could not create test expense");

        app_state
    }

    #[tokio::test]
    async fn deletes_expense() {
        let app_state = get_test_state_with_expense();
        let state = DeleteExpenseState {
            ledger: app_state.ledger.clone(),
        };

        let response = delete_expense_endpoint(State(state), Path(1))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let ledger = app_state.ledger.lock().unwrap();
        assert!(ledger.get(1).is_none());
    }

    #[tokio::test]
    async fn deleting_missing_expense_still_succeeds() {
        let app_state = get_test_state_with_expense();
        let state = DeleteExpenseState {
            ledger: app_state.ledger.clone(),
        };

        let response = delete_expense_endpoint(State(state), Path(42))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        // The record set is unchanged.
        let ledger = app_state.ledger.lock().unwrap();
        assert_eq!(ledger.records().len(), 1);
    }
}
