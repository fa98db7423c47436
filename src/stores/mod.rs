//! Contains the transaction store trait and its SQLite implementation.

mod transaction;

pub mod sqlite;

pub use sqlite::SQLiteTransactionStore;
pub(crate) use transaction::{add_amount, subtract_amount};
pub use transaction::{CategoryTotal, DailyTotals, TransactionStore, TypeTotals};
