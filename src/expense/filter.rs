//! Filtering of the expense record set for display.

use time::{Date, macros::format_description};

use crate::{Category, Error, expense::Expense};

/// A category/date-range predicate applied to the record set.
///
/// All bounds are optional; an empty spec passes every record. Dates are
/// compared as whole calendar days, which makes the end date inclusive: an
/// expense dated exactly on `end_date` is kept.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Keep only expenses with this category.
    pub category: Option<Category>,
    /// Keep only expenses dated on or after this day.
    pub start_date: Option<Date>,
    /// Keep only expenses dated on or before this day (inclusive).
    pub end_date: Option<Date>,
}

impl FilterSpec {
    /// Build a spec from raw query-string values.
    ///
    /// Empty strings are treated the same as absent parameters, which is
    /// what an unfilled HTML form submits.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if the category is not a known code,
    /// - or [Error::InvalidDate] if a date is not of the form `2024-03-01`.
    pub fn parse(
        category: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(Self {
            category: non_empty(category).map(Category::from_code).transpose()?,
            start_date: non_empty(start_date).map(parse_date).transpose()?,
            end_date: non_empty(end_date).map(parse_date).transpose()?,
        })
    }

    /// Whether no bounds are set at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a single expense satisfies every bound of the spec.
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.is_none_or(|category| expense.category == category)
            && self.start_date.is_none_or(|start| expense.date >= start)
            && self.end_date.is_none_or(|end| expense.date <= end)
    }

    /// The records that satisfy the spec, in their original relative order.
    pub fn apply<'a>(&self, records: &'a [Expense]) -> Vec<&'a Expense> {
        records.iter().filter(|expense| self.matches(expense)).collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(value.to_owned()))
}
