//! Finance Tracker is a small service for recording personal income and
//! expenses and deriving monthly analytics from them.
//!
//! This library provides a JSON REST API over a SQLite ledger. Besides the
//! usual create, update and delete operations for transactions, it computes
//! per-month summaries (totals, balance and average daily expense), a daily
//! running-balance trend and a per-category expense breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod clock;
mod db;
pub mod endpoints;
mod logging;
mod month;
mod not_found;
mod routing;
mod stats;
mod stores;
mod transaction;

pub use app_state::AppState;
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{MonthKey, resolve_month};
pub use routing::build_router;
pub use stats::{
    CategoryTotal, DailyTrendPoint, MonthSummary, build_daily_trend, get_category_breakdown,
    get_daily_trend, get_month_summary,
};
pub use stores::{DailyTotals, SQLiteTransactionStore, TransactionStore, TypeTotals};
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionPayload, TransactionType,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a transaction that is missing required fields or
    /// contains invalid values.
    ///
    /// The message is safe to show to the client.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A sum of transaction amounts does not fit in a decimal.
    #[error("the total of the transaction amounts is too large to represent")]
    AmountOverflow,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build a JSON error response with the message `error`.
fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_owned(),
        }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(message) => {
                tracing::debug!("rejected transaction payload: {message}");
                error_response(StatusCode::BAD_REQUEST, &message)
            }
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                error_response(StatusCode::NOT_FOUND, "Transaction not found")
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
