//! Defines the route handler for the page that displays expenses as a table.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Category, Error, endpoints,
    app_state::SharedLedger,
    expense::{Expense, filter::FilterSpec},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, format_date, link,
    },
    navigation::NavBar,
};

/// The state needed for the expenses page.
#[derive(Clone)]
pub struct ExpensesPageState {
    /// The ledger that owns the expense record set.
    pub ledger: SharedLedger,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The raw filter values from the query string.
///
/// Kept as strings so an unfilled form field (submitted as an empty string)
/// means "no bound" rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    category: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Render an overview of the recorded expenses, filtered by the query parameters.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let spec = FilterSpec::parse(
        query.category.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLock)?;

    let records = ledger.records();
    let filtered = spec.apply(records);

    Ok(expenses_view(records.len(), &filtered, &spec).into_response())
}

fn expenses_view(total_count: usize, filtered: &[&Expense], spec: &FilterSpec) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                div class="flex justify-between items-baseline"
                {
                    h2 class="text-xl font-bold" { "Expenses" }
                    (link(endpoints::NEW_EXPENSE_VIEW, "Add expense"))
                }

                (filter_form(spec))

                @if total_count == 0 {
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "No expenses recorded yet. "
                        (link(endpoints::NEW_EXPENSE_VIEW, "Add the first one."))
                    }
                } @else if filtered.is_empty() {
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "No expenses match the current filter. "
                        (link(endpoints::EXPENSES_VIEW, "Clear the filter."))
                    }
                } @else {
                    (expenses_table(filtered))

                    p class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        (filtered.len()) " of " (total_count) " expense(s) shown"
                    }
                }
            }
        }
    };

    base("Expenses", &content)
}

/// The filter form. Submitting it applies the pending filter by reloading
/// the page with the chosen bounds in the query string.
fn filter_form(spec: &FilterSpec) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            class="flex flex-wrap items-end gap-4 p-4 rounded-lg bg-white dark:bg-gray-800 shadow"
        {
            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All categories" }

                    @for category in Category::ALL {
                        @if Some(category) == spec.category {
                            option value=(category.code()) selected { (category.label()) }
                        } @else {
                            option value=(category.code()) { (category.label()) }
                        }
                    }
                }
            }

            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "From" }

                input
                    name="start_date"
                    id="start_date"
                    type="date"
                    value=[spec.start_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "To" }

                input
                    name="end_date"
                    id="end_date"
                    type="date"
                    value=[spec.end_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="flex items-center gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

                @if !spec.is_empty() {
                    a href=(endpoints::EXPENSES_VIEW) class=(LINK_STYLE) { "Clear" }
                }
            }
        }
    }
}

fn expenses_table(expenses: &[&Expense]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_table_row(expense))
                    }
                }
            }
        }
    }
}

fn expense_table_row(expense: &Expense) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
    let delete_url = endpoints::format_endpoint(endpoints::EXPENSE_API, expense.id);
    let confirm_message = format!("Are you sure you want to delete '{}'?", expense.title);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (format_date(expense.date)) }

            td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (expense.title)
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category.label()) }
            }

            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }

            td class=(TABLE_CELL_STYLE)
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                " "
                button
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
