//! The SQLite implementation of the expense store.

use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    expense::{Expense, ExpenseDraft, ExpenseId, store::ExpenseStore},
};

/// An [ExpenseStore] backed by a single SQLite table.
///
/// Every operation is a single parameterized statement; there is no state
/// beyond the connection itself.
#[derive(Debug)]
pub struct SqliteExpenseStore {
    connection: Connection,
}

impl SqliteExpenseStore {
    /// Create a store on top of `connection`, initializing the schema if it
    /// does not exist yet.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the schema cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_expense_table(&connection)?;

        Ok(Self { connection })
    }
}

impl ExpenseStore for SqliteExpenseStore {
    fn list_all(&self) -> Result<Vec<Expense>, Error> {
        // Sort by date, and then id to keep the order stable after updates.
        self.connection
            .prepare(
                "SELECT id, title, amount, category, date FROM expense
                 ORDER BY date DESC, id ASC",
            )?
            .query_map((), map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    fn create(&mut self, draft: &ExpenseDraft) -> Result<Expense, Error> {
        let expense = self
            .connection
            .prepare(
                "INSERT INTO expense (title, amount, category, date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, title, amount, category, date",
            )?
            .query_row(
                params![draft.title(), draft.amount(), draft.category(), draft.date()],
                map_expense_row,
            )?;

        Ok(expense)
    }

    fn replace_by_id(&mut self, id: ExpenseId, draft: &ExpenseDraft) -> Result<Expense, Error> {
        let rows_affected = self.connection.execute(
            "UPDATE expense
             SET title = ?1, amount = ?2, category = ?3, date = ?4
             WHERE id = ?5",
            params![draft.title(), draft.amount(), draft.category(), draft.date(), id],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(draft.clone().into_expense(id))
    }

    fn delete_by_id(&mut self, id: ExpenseId) -> Result<(), Error> {
        // Zero rows affected means the id was already gone, which is fine.
        self.connection
            .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

        Ok(())
    }
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Index used by the date-ordered listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        title,
        amount,
        category,
        date,
    })
}
