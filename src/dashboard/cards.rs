//! Card components for displaying headline spending figures.

use maud::{Markup, html};

use crate::html::format_currency;

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-1";

/// Renders the headline cards: total spent and this month's spending.
pub(super) fn summary_cards_view(total: f64, current_month_total: f64) -> Markup {
    html! {
        div class="grid grid-cols-1 sm:grid-cols-2 gap-4 w-full"
        {
            (summary_card("Total spent", total))
            (summary_card("This month", current_month_total))
        }
    }
}

fn summary_card(label: &str, amount: f64) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            span class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            span class="text-3xl font-bold" { (format_currency(amount)) }
        }
    }
}
