//! Defines the route handler for the page for recording a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::form::{ExpenseFormDefaults, expense_form_fields},
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::current_local_date,
};

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the page for recording a new expense.
///
/// The date field defaults to today in the server's configured timezone.
pub async fn get_new_expense_page(
    State(state): State<NewExpensePageState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    Ok(new_expense_view(today).into_response())
}

fn new_expense_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();
    let defaults = ExpenseFormDefaults {
        title: None,
        amount: None,
        category: None,
        date: today,
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                class="w-full max-w-md space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Expense" }

                (expense_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add expense" }
            }
        }
    };

    base("New Expense", &content)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use scraper::{Html, Selector};

    use super::{NewExpensePageState, get_new_expense_page};

    #[tokio::test]
    async fn page_contains_expense_form() {
        let state = NewExpensePageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_new_expense_page(State(state)).await.unwrap();

        let document = parse_response_body(response.into_response()).await;
        let form_selector = Selector::parse("form[hx-post=\"/api/expenses\"]").unwrap();
        assert!(
            document.select(&form_selector).next().is_some(),
            "want a form posting to /api/expenses"
        );
    }

    async fn parse_response_body(response: Response<Body>) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Html::parse_document(&String::from_utf8_lossy(&body))
    }
}
