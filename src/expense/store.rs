//! The contract between the ledger and whatever holds the expense records.

use crate::{
    Error,
    expense::{Expense, ExpenseDraft, ExpenseId},
};

/// The authoritative home of the expense records.
///
/// The [Ledger](crate::expense::Ledger) is written against this trait so it
/// does not care which backing store is used; the application ships with a
/// SQLite implementation, and tests substitute in-memory fakes.
pub trait ExpenseStore {
    /// Every expense in the store, ordered by date descending with ties
    /// broken by id ascending (insertion order).
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the store cannot be read.
    fn list_all(&self) -> Result<Vec<Expense>, Error>;

    /// Persist a new expense and return it with its assigned id.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the write is rejected.
    fn create(&mut self, draft: &ExpenseDraft) -> Result<Expense, Error>;

    /// Replace every field of the expense with the given id.
    ///
    /// There are no partial updates: the draft supplies the full record.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored expense,
    /// - or [Error::StoreUnavailable] if the write is rejected.
    fn replace_by_id(&mut self, id: ExpenseId, draft: &ExpenseDraft) -> Result<Expense, Error>;

    /// Delete the expense with the given id.
    ///
    /// Deleting an id that is not in the store is a no-op, not an error.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the write is rejected.
    fn delete_by_id(&mut self, id: ExpenseId) -> Result<(), Error>;
}
