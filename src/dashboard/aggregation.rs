//! Expense aggregation for the dashboard.
//!
//! These functions are pure: given the same record set and reference date
//! they always return the same statistics, and they perform no I/O.

use time::Date;

use crate::{Category, expense::Expense};

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Aggregate statistics over the full record set.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Statistics {
    /// The sum of every expense amount.
    pub total: f64,
    /// The sum of amounts dated in the same month and year as the reference date.
    pub current_month_total: f64,
    /// One entry per category, sorted by descending total.
    ///
    /// The sort is stable, so categories with equal totals keep the fixed
    /// category table order.
    pub per_category_totals: Vec<CategoryTotal>,
}

/// Compute statistics over `records`.
///
/// `today` is the current day in the viewer's timezone; the caller resolves
/// it so this function stays pure. A date belongs to the current month when
/// its month and year equal today's.
pub(super) fn aggregate(records: &[Expense], today: Date) -> Statistics {
    let total = records.iter().map(|expense| expense.amount).sum();

    let current_month_total = records
        .iter()
        .filter(|expense| {
            expense.date.month() == today.month() && expense.date.year() == today.year()
        })
        .map(|expense| expense.amount)
        .sum();

    let mut per_category_totals: Vec<CategoryTotal> = Category::ALL
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            total: records
                .iter()
                .filter(|expense| expense.category == category)
                .map(|expense| expense.amount)
                .sum(),
        })
        .collect();
    // sort_by is stable, which keeps the category table order for ties.
    per_category_totals.sort_by(|a, b| b.total.total_cmp(&a.total));

    Statistics {
        total,
        current_month_total,
        per_category_totals,
    }
}
