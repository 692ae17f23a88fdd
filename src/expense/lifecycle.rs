//! The rules for moving an expense from form input to the persisted record set.

use time::Date;

use crate::{
    Error,
    expense::{Expense, ExpenseDraft, ExpenseId, store::ExpenseStore},
};

/// The application's view of the expense records and the rules for changing it.
///
/// The ledger keeps a local copy of the record set, ordered most recent
/// first (date descending, ties by id ascending). Updates are
/// server-confirmed: the local set only changes after the store has accepted
/// the write, so a failed operation can never leave a half-applied record
/// behind. After a failure, [Ledger::reconcile] re-derives the set from the
/// store.
#[derive(Debug)]
pub struct Ledger<S: ExpenseStore> {
    store: S,
    records: Vec<Expense>,
}

impl<S: ExpenseStore> Ledger<S> {
    /// Create a ledger on top of `store` and load the current record set.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the store cannot be read.
    pub fn new(store: S) -> Result<Self, Error> {
        let records = store.list_all()?;

        Ok(Self { store, records })
    }

    /// The record set, most recent first.
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    /// Look up a single record by id.
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.records.iter().find(|expense| expense.id == id)
    }

    /// Persist a draft and apply it to the record set.
    ///
    /// Without `editing_id` this creates a new record: the store assigns the
    /// id and the record is inserted at its ordered position. With
    /// `editing_id` the matching record is replaced in full, in place, so it
    /// keeps its position in the set.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `editing_id` does not refer to a stored expense,
    /// - or [Error::StoreUnavailable] if the store rejects the write.
    ///
    /// On any error the record set is left exactly as it was; callers should
    /// invoke [Ledger::reconcile] before serving further reads.
    pub fn submit(
        &mut self,
        draft: ExpenseDraft,
        editing_id: Option<ExpenseId>,
    ) -> Result<&Expense, Error> {
        match editing_id {
            None => {
                let expense = self.store.create(&draft)?;
                let index = insertion_index(&self.records, expense.date, expense.id);
                self.records.insert(index, expense);

                Ok(&self.records[index])
            }
            Some(id) => {
                let expense = self.store.replace_by_id(id, &draft)?;
                let index = self
                    .records
                    .iter()
                    .position(|record| record.id == id)
                    // The store knows the id, so the local set should too;
                    // falling back to reconcile repairs any divergence.
                    .ok_or(Error::NotFound)
                    .inspect_err(|_| {
                        tracing::warn!("expense {id} was replaced but is missing locally");
                    })?;
                self.records[index] = expense;

                Ok(&self.records[index])
            }
        }
    }

    /// Delete the record with the given id.
    ///
    /// Removing an id that is not in the set is a no-op, not an error.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the store rejects the write; the
    /// record set is left unchanged.
    pub fn remove(&mut self, id: ExpenseId) -> Result<(), Error> {
        self.store.delete_by_id(id)?;
        self.records.retain(|expense| expense.id != id);

        Ok(())
    }

    /// Replace the local record set with the store's.
    ///
    /// Idempotent: reconciling twice in a row gives the same result, so
    /// callers are free to retry it after an uncertain operation.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the store cannot be read; the
    /// local set keeps its previous (last known-good) contents.
    pub fn reconcile(&mut self) -> Result<(), Error> {
        self.records = self.store.list_all()?;

        Ok(())
    }
}

/// Where a record with the given date and id belongs in a set ordered by
/// date descending, ties by id ascending.
fn insertion_index(records: &[Expense], date: Date, id: ExpenseId) -> usize {
    records.partition_point(|record| record.date > date || (record.date == date && record.id < id))
}

/// Resynchronize the ledger after a failed mutation, logging rather than
/// propagating a reconcile failure so the original error reaches the caller.
pub(crate) fn reconcile_after_failure<S: ExpenseStore>(ledger: &mut Ledger<S>) {
    if let Err(error) = ledger.reconcile() {
        tracing::error!("could not reconcile with the expense store: {error}");
    }
}
