//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::{Transaction, TransactionId},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The response body for a deleted transaction.
#[derive(Debug, Serialize)]
pub struct DeletedTransaction {
    message: &'static str,
    transaction: Transaction,
}

/// A route handler for deleting a transaction, responds with the deleted transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<DeletedTransaction>, Error> {
    let transaction = state
        .transaction_store
        .delete(transaction_id)
        .inspect_err(|error| {
            tracing::warn!("Could not delete transaction {transaction_id}: {error}")
        })?;

    tracing::info!("Deleted transaction {transaction_id}");

    Ok(Json(DeletedTransaction {
        message: "Transaction deleted",
        transaction,
    }))
}
