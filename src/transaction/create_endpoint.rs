//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::{Transaction, TransactionPayload, validation::validate_json_payload},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with the stored transaction.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let transaction = validate_json_payload(payload)?;
    let transaction = state.transaction_store.create(transaction)?;

    tracing::info!("Created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}
