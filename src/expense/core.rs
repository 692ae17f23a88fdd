//! Defines the core data models for expense records.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Category, Error};

/// Alias for the integer type used for expense record ids.
pub type ExpenseId = i64;

/// A single spending event: money that left the wallet on a given day.
///
/// An `Expense` always comes from the store, which is the only place ids are
/// assigned. User input enters the system as an [ExpenseDraft] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense. Assigned by the store, immutable afterwards.
    pub id: ExpenseId,
    /// A short description of what the money was spent on.
    pub title: String,
    /// The amount of money spent. Always zero or more.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// The calendar day the money was spent.
    ///
    /// This is a plain date on purpose: storing an instant would shift the
    /// apparent day for users not at UTC+0.
    pub date: Date,
}

/// A validated expense waiting to be persisted.
///
/// Constructing a draft is the single validation point for user input, so
/// invalid titles and amounts never reach the store. The fields are private
/// to keep it that way.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    title: String,
    amount: f64,
    category: Category,
    date: Date,
}

impl ExpenseDraft {
    /// Create a draft from user input.
    ///
    /// The title is trimmed before the empty check.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyTitle] if `title` is empty or whitespace,
    /// - or [Error::InvalidAmount] if `amount` is NaN or infinite,
    /// - or [Error::NegativeAmount] if `amount` is less than zero.
    pub fn new(title: &str, amount: f64, category: Category, date: Date) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        if !amount.is_finite() {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        if amount < 0.0 {
            return Err(Error::NegativeAmount(amount));
        }

        Ok(Self {
            title: title.to_owned(),
            amount,
            category,
            date,
        })
    }

    /// The validated title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The validated amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The category of the expense.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The calendar day the money was spent.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Attach a store-assigned id, producing the persisted record.
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::ExpenseDraft;
    use crate::{Category, Error};

    #[test]
    fn draft_trims_title() {
        let draft =
            ExpenseDraft::new("  Coffee  ", 4.5, Category::Food, date!(2024 - 03 - 01)).unwrap();

        assert_eq!(draft.title(), "Coffee");
    }

    #[test]
    fn draft_rejects_empty_title() {
        let result = ExpenseDraft::new("   ", 4.5, Category::Food, date!(2024 - 03 - 01));

        assert_eq!(result, Err(Error::EmptyTitle));
    }

    #[test]
    fn draft_rejects_negative_amount() {
        let result = ExpenseDraft::new("Coffee", -4.5, Category::Food, date!(2024 - 03 - 01));

        assert_eq!(result, Err(Error::NegativeAmount(-4.5)));
    }

    #[test]
    fn draft_rejects_non_finite_amount() {
        let result = ExpenseDraft::new("Coffee", f64::NAN, Category::Food, date!(2024 - 03 - 01));

        assert_eq!(result, Err(Error::InvalidAmount("NaN".to_owned())));
    }

    #[test]
    fn draft_accepts_zero_amount() {
        let draft = ExpenseDraft::new("Free sample", 0.0, Category::Other, date!(2024 - 03 - 01));

        assert!(draft.is_ok());
    }

    #[test]
    fn into_expense_keeps_fields() {
        let expense = ExpenseDraft::new("Coffee", 4.5, Category::Food, date!(2024 - 03 - 01))
            .unwrap()
            .into_expense(7);

        assert_eq!(expense.id, 7);
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.amount, 4.5);
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.date, date!(2024 - 03 - 01));
    }
}
