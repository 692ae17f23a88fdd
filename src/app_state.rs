//! Implements a struct that holds the state of the HTTP server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    expense::{Ledger, SqliteExpenseStore},
};

/// The ledger shared between request handlers.
///
/// The mutex serializes mutating operations: a second submit or remove
/// cannot apply its effects before the first one's store response has been
/// observed and folded into the record set.
pub(crate) type SharedLedger = Arc<Mutex<Ledger<SqliteExpenseStore>>>;

/// The state of the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The ledger that owns the expense record set.
    pub(crate) ledger: SharedLedger,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database schema and load the
    /// current record set. `local_timezone` should be a valid, canonical
    /// timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or read.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        let store = SqliteExpenseStore::new(db_connection)?;
        let ledger = Ledger::new(store)?;

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
