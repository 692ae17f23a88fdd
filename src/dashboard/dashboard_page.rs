//! Defines the route handler for the dashboard page.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    app_state::SharedLedger,
    dashboard::{
        aggregation::{Statistics, aggregate},
        cards::summary_cards_view,
    },
    html::{
        CATEGORY_BADGE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

/// The state needed for the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The ledger that owns the expense record set.
    pub ledger: SharedLedger,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the dashboard: total spent, this month's spending, and the
/// per-category breakdown.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLock)?;

    let stats = aggregate(ledger.records(), today);
    let has_expenses = !ledger.records().is_empty();

    Ok(dashboard_view(&stats, has_expenses).into_response())
}

fn dashboard_view(stats: &Statistics, has_expenses: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                h2 class="text-xl font-bold" { "Dashboard" }

                @if has_expenses {
                    (summary_cards_view(stats.total, stats.current_month_total))

                    (category_breakdown_table(stats))
                } @else {
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Nothing to summarise yet. "
                        (link(endpoints::NEW_EXPENSE_VIEW, "Record an expense"))
                        " to see where the money goes."
                    }
                }
            }
        }
    };

    base("Dashboard", &content)
}

fn category_breakdown_table(stats: &Statistics) -> Markup {
    html! {
        div
        {
            h3 class="text-lg font-semibold mb-4" { "Spending by Category" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Share" }
                        }
                    }

                    tbody
                    {
                        @for entry in &stats.per_category_totals {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    span class=(CATEGORY_BADGE_STYLE) { (entry.category.label()) }
                                }

                                td class=(TABLE_CELL_STYLE) { (format_currency(entry.total)) }

                                td class=(TABLE_CELL_STYLE) { (format_share(entry.total, stats.total)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_share(category_total: f64, total: f64) -> String {
    if total <= 0.0 {
        return "–".to_owned();
    }

    format!("{:.0}%", category_total / total * 100.0)
}
