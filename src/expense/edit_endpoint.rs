//! Defines the endpoint for replacing an existing expense.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Category, Error, endpoints,
    app_state::SharedLedger,
    expense::{ExpenseDraft, ExpenseId, lifecycle::reconcile_after_failure},
};

/// The state needed to edit an expense.
#[derive(Clone)]
pub struct EditExpenseState {
    /// The ledger that owns the expense record set.
    pub ledger: SharedLedger,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for editing an expense. Every field is replaced; there are
/// no partial updates.
#[derive(Debug, Deserialize)]
pub struct EditExpenseForm {
    title: String,
    amount: f64,
    category: Category,
    date: Date,
}

/// A route handler that replaces the expense with the given id, redirects to
/// the expenses view on success.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<EditExpenseForm>,
) -> Response {
    let draft = match ExpenseDraft::new(&form.title, form.amount, form.category, form.date) {
        Ok(draft) => draft,
        Err(error) => {
            tracing::warn!("rejected expense form: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_alert_response();
        }
    };

    if let Err(error) = ledger.submit(draft, Some(expense_id)) {
        tracing::error!("could not update expense {expense_id}: {error}");
        reconcile_after_failure(&mut ledger);

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use super::{EditExpenseForm, EditExpenseState, edit_expense_endpoint};
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
    async fn can_update_expense() {
        let app_state = get_test_state_with_expense();
        let state = EditExpenseState {
            ledger: app_state.ledger.clone(),
        };

        let form = EditExpenseForm {
            title: "Espresso".to_string(),
            amount: 5.0,
            category: Category::Other,
            date: date!(2024 - 03 - 01),
        };

        let response = edit_expense_endpoint(State(state), Path(1), Form(form))
            .await
            .into_response();

        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(location, "/expenses");

        let ledger = app_state.ledger.lock().unwrap();
        let expense = ledger.get(1).unwrap();
        assert_eq!(expense.title, "Espresso");
        assert_eq!(expense.amount, 5.0);
        assert_eq!(expense.category, Category::Other);
    }

    #[tokio::test]
    async fn updating_missing_expense_is_not_found() {
        let app_state = get_test_state_with_expense();
        let state = EditExpenseState {
            ledger: app_state.ledger.clone(),
        };

        let form = EditExpenseForm {
            title: "Espresso".to_string(),
            amount: 5.0,
            category: Category::Other,
            date: date!(2024 - 03 - 01),
        };

        let response = edit_expense_endpoint(State(state), Path(42), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The original record is untouched.
        let ledger = app_state.ledger.lock().unwrap();
        assert_eq!(ledger.get(1).unwrap().title, "Coffee");
    }
}
