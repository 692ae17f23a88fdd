//! Defines the route handler for the page for editing an existing expense.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    app_state::SharedLedger,
    expense::{
        Expense, ExpenseId,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

/// The state needed for the edit expense page.
#[derive(Clone)]
pub struct EditExpensePageState {
    /// The ledger that owns the expense record set.
    pub ledger: SharedLedger,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Render the page for editing the expense with the given id.
///
/// Responds with the 404 page if the id does not refer to a recorded expense.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLock)?;

    let expense = ledger.get(expense_id).ok_or(Error::NotFound)?;

    Ok(edit_expense_view(expense).into_response())
}

fn edit_expense_view(expense: &Expense) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let edit_route = endpoints::format_endpoint(endpoints::EXPENSE_API, expense.id);
    let defaults = ExpenseFormDefaults {
        title: Some(&expense.title),
        amount: Some(expense.amount),
        category: Some(expense.category),
        date: expense.date,
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            form
                hx-put=(edit_route)
                hx-target-error="#alert-container"
                class="w-full max-w-md space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Expense" }

                (expense_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save changes" }

                p class="text-sm text-center"
                {
                    (link(endpoints::EXPENSES_VIEW, "Back to expenses"))
                }
            }
        }
    };

    base("Edit Expense", &content)
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

    use super::{EditExpensePageState, get_edit_expense_page};
    use crate::{AppState, Category, Error, expense::ExpenseDraft};

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
    async fn renders_page_for_existing_expense() {
        let app_state = get_test_state_with_expense();
        let state = EditExpensePageState {
            ledger: app_state.ledger.clone(),
        };

        let response = get_edit_expense_page(State(state), Path(1))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app_state = get_test_state_with_expense();
        let state = EditExpensePageState {
            ledger: app_state.ledger.clone(),
        };

        let result = get_edit_expense_page(State(state), Path(42)).await;

        assert_eq!(result.unwrap_err(), Error::NotFound);
    }
}
