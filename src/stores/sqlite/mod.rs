//! SQLite implementations of the stores.

mod transaction;

pub use transaction::{SQLiteTransactionStore, create_transaction_table};
