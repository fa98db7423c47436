//! Transaction management for the finance tracker.
//!
//! This module contains everything related to individual transactions:
//! - The `Transaction` model and the `NewTransaction` used to store one
//! - Validation of transactions sent by clients
//! - Route handlers for creating, listing, updating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod validation;

pub use core::{
    InvalidTransactionType, NewTransaction, Transaction, TransactionId, TransactionType,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use validation::TransactionPayload;
