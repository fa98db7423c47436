//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};

use crate::{
    AppState, Error,
    month::{MonthKey, MonthQuery},
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::Transaction,
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The store for managing transactions.
    pub transaction_store: SQLiteTransactionStore,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for listing transactions, newest first.
///
/// Unlike the analytics routes, all transactions are listed when `month` is
/// not given.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let month = query
        .month
        .as_deref()
        .filter(|month| !month.is_empty())
        .map(MonthKey::new_unchecked);

    let transactions = state.transaction_store.list(month.as_ref())?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        month::MonthQuery,
        stores::{SQLiteTransactionStore, TransactionStore, test_utils::get_test_connection},
        transaction::{
            NewTransaction,
            list_endpoint::{ListTransactionsState, list_transactions_endpoint},
        },
    };

    fn get_test_state() -> ListTransactionsState {
        let state = ListTransactionsState {
            transaction_store: SQLiteTransactionStore::new(Arc::new(Mutex::new(
                get_test_connection(),
            ))),
        };

        state
            .transaction_store
            .create(NewTransaction::expense(date!(2025 - 02 - 14), "Gifts", dec!(30)))
            .unwrap();
        state
            .transaction_store
            .create(NewTransaction::income(date!(2025 - 03 - 01), "Salary", dec!(1000)))
            .unwrap();

        state
    }

    #[tokio::test]
    async fn lists_all_transactions_without_month() {
        let state = get_test_state();

        let response = list_transactions_endpoint(State(state), Query(MonthQuery::default()))
            .await
            .unwrap();

        let categories: Vec<_> = response.0.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["Salary", "Gifts"]);
    }

    #[tokio::test]
    async fn empty_month_lists_all_transactions() {
        let state = get_test_state();

        let response = list_transactions_endpoint(
            State(state),
            Query(MonthQuery {
                month: Some(String::new()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.len(), 2);
    }

    #[tokio::test]
    async fn filters_by_month() {
        let state = get_test_state();

        let response = list_transactions_endpoint(
            State(state),
            Query(MonthQuery {
                month: Some("2025-02".to_owned()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.len(), 1);
        assert_eq!(response.0[0].category, "Gifts");
    }
}
