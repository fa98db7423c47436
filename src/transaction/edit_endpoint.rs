//! Defines the endpoint for updating a transaction.

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
};

use crate::{
    AppState, Error,
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::{Transaction, TransactionId, TransactionPayload, validation::validate_json_payload},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for replacing the fields of a transaction, responds with the updated transaction.
///
/// The payload is validated the same way as for creating a transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let transaction = validate_json_payload(payload)?;

    let transaction = state
        .transaction_store
        .update(transaction_id, transaction)
        .inspect_err(|error| {
            tracing::warn!("Could not update transaction {transaction_id}: {error}")
        })?;

    Ok(Json(transaction))
}
