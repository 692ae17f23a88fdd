//! Defines the endpoint for recording a new expense.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Category, Error, endpoints,
    app_state::SharedLedger,
    expense::{ExpenseDraft, lifecycle::reconcile_after_failure},
};

/// The state needed to record an expense.
#[derive(Clone)]
pub struct CreateExpenseState {
    /// The ledger that owns the expense record set.
    pub ledger: SharedLedger,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for recording an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// A short description of what the money was spent on.
    pub title: String,
    /// The value of the expense in dollars.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// The day the money was spent.
    pub date: Date,
}

/// A route handler for recording a new expense, redirects to the expenses view on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
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

    if let Err(error) = ledger.submit(draft, None) {
        tracing::error!("could not record expense: {error}");
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
    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use super::{CreateExpenseState, ExpenseForm, create_expense_endpoint};
    use crate::{AppState, Category};

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        AppState::new(conn, "Etc/UTC").unwrap()
    }

    #[tokio::test]
    async fn can_record_expense() {
        let app_state = get_test_state();
        let state = CreateExpenseState {
            ledger: app_state.ledger.clone(),
        };

        let form = ExpenseForm {
            title: "Coffee".to_string(),
            amount: 4.5,
            category: Category::Food,
            date: date!(2024 - 03 - 01),
        };

        let response = create_expense_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_redirects_to_expenses_view(response);

        // Verify the expense was actually recorded. The first expense will have ID 1.
        let ledger = app_state.ledger.lock().unwrap();
        let expense = ledger.get(1).unwrap();
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.amount, 4.5);
        assert_eq!(expense.category, Category::Food);
    }

    #[tokio::test]
    async fn rejects_negative_amount_without_applying_it() {
        let app_state = get_test_state();
        let state = CreateExpenseState {
            ledger: app_state.ledger.clone(),
        };

        let form = ExpenseForm {
            title: "Refund?".to_string(),
            amount: -12.0,
            category: Category::Other,
            date: date!(2024 - 03 - 01),
        };

        let response = create_expense_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

        let ledger = app_state.ledger.lock().unwrap();
        assert_eq!(ledger.records().len(), 0);
    }

    #[track_caller]
    fn assert_redirects_to_expenses_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/expenses",
            "got redirect to {location:?}, want redirect to /expenses"
        );
    }
}
