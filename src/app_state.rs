//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, clock::Clock, db::initialize, stores::SQLiteTransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection shared by the stores.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,

    /// The source of "today", used to pick the default month for analytics.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transaction table.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            transaction_store: SQLiteTransactionStore::new(connection.clone()),
            db_connection: connection,
            clock,
        })
    }
}
