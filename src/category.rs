//! The fixed set of expense categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A category for classifying expenses.
///
/// The set of categories is closed: expenses always carry exactly one of
/// these codes, and the display label for each code is fixed (it does not
/// depend on the viewer's locale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groceries, restaurants, takeaways.
    Food,
    /// Public transport, fuel, parking.
    Transport,
    /// Movies, concerts, subscriptions.
    Entertainment,
    /// Clothing, gadgets, one-off purchases.
    Shopping,
    /// Doctor visits, pharmacy, insurance.
    Healthcare,
    /// Power, water, internet, phone.
    Utilities,
    /// Anything that does not fit the above.
    Other,
}

impl Category {
    /// Every category, in table order.
    ///
    /// This order is the tie-break order for category summaries: when two
    /// categories have equal totals they are listed in this order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Utilities,
        Category::Other,
    ];

    /// The category code as stored in the database and sent in forms.
    pub fn code(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Healthcare => "healthcare",
            Category::Utilities => "utilities",
            Category::Other => "other",
        }
    }

    /// The label shown to the user for this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }

    /// Parse a category from its code.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if `code` does not name a category.
    pub fn from_code(code: &str) -> Result<Self, Error> {
        Category::ALL
            .into_iter()
            .find(|category| category.code() == code)
            .ok_or_else(|| Error::InvalidCategory(code.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_code(s)
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;

        Category::from_code(code).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
