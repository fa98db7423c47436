//! HTTP handlers for the monthly analytics.
//!
//! Both handlers report store failures as an internal server error. Neither
//! substitutes zeroed statistics when the ledger cannot be read.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    clock::Clock,
    month::{MonthKey, MonthQuery, resolve_month},
    stats::{
        CategoryTotal, DailyTrendPoint, MonthSummary, get_category_breakdown, get_daily_trend,
        get_month_summary,
    },
    stores::SQLiteTransactionStore,
};

/// The state needed for computing analytics.
#[derive(Debug, Clone)]
pub struct StatsState {
    /// The store to read transactions from.
    pub store: SQLiteTransactionStore,
    /// The clock used to pick the default month.
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for StatsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store.clone(),
            clock: state.clock.clone(),
        }
    }
}

/// The response body for the summary route.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// The monthly totals.
    #[serde(flatten)]
    pub summary: MonthSummary,
    /// The running balance for each day with transactions.
    pub daily_trend: Vec<DailyTrendPoint>,
}

/// The response body for the category breakdown route.
#[derive(Debug, Serialize)]
pub struct CategoryBreakdownResponse {
    /// The month the breakdown is for.
    pub month: MonthKey,
    /// Expense totals per category, largest first.
    pub categories: Vec<CategoryTotal>,
}

/// A route handler for the summary and daily trend of a month.
///
/// Defaults to the current month when `month` is not given.
pub async fn get_summary_endpoint(
    State(state): State<StatsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SummaryResponse>, Error> {
    let month = resolve_month(query.month.as_deref(), state.clock.as_ref());

    let summary = get_month_summary(&state.store, &month)?;
    let daily_trend = get_daily_trend(&state.store, &month)?;

    Ok(Json(SummaryResponse {
        summary,
        daily_trend,
    }))
}

/// A route handler for the per-category expense totals of a month.
///
/// Defaults to the current month when `month` is not given.
pub async fn get_by_category_endpoint(
    State(state): State<StatsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CategoryBreakdownResponse>, Error> {
    let month = resolve_month(query.month.as_deref(), state.clock.as_ref());

    let categories = get_category_breakdown(&state.store, &month)?;

    Ok(Json(CategoryBreakdownResponse { month, categories }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        clock::FixedClock,
        month::MonthQuery,
        stats::handlers::{StatsState, get_by_category_endpoint, get_summary_endpoint},
        stores::{SQLiteTransactionStore, TransactionStore, test_utils::get_test_connection},
        transaction::NewTransaction,
    };

    fn get_test_state() -> StatsState {
        let connection = Arc::new(Mutex::new(get_test_connection()));

        StatsState {
            store: SQLiteTransactionStore::new(connection),
            clock: Arc::new(FixedClock(date!(2025 - 03 - 17))),
        }
    }

    #[tokio::test]
    async fn summary_defaults_to_current_month() {
        let state = get_test_state();
        state
            .store
            .create(NewTransaction::expense(date!(2025 - 03 - 02), "Food", dec!(20)))
            .unwrap();
        state
            .store
            .create(NewTransaction::expense(date!(2025 - 02 - 02), "Food", dec!(99)))
            .unwrap();

        let response = get_summary_endpoint(State(state), Query(MonthQuery::default()))
            .await
            .unwrap();

        let got = serde_json::to_value(&response.0).unwrap();
        assert_eq!(
            got,
            json!({
                "month": "2025-03",
                "total_income": 0.0,
                "total_expense": 20.0,
                "balance": -20.0,
                "avg_daily_expense": 20.0,
                "daily_trend": [
                    {"date": "2025-03-02", "income": 0.0, "expense": 20.0, "balance": -20.0},
                ],
            })
        );
    }

    #[tokio::test]
    async fn category_breakdown_uses_requested_month() {
        let state = get_test_state();
        state
            .store
            .create(NewTransaction::expense(date!(2024 - 11 - 30), "Gifts", dec!(35.5)))
            .unwrap();

        let response = get_by_category_endpoint(
            State(state),
            Query(MonthQuery {
                month: Some("2024-11".to_owned()),
            }),
        )
        .await
        .unwrap();

        let got = serde_json::to_value(&response.0).unwrap();
        assert_eq!(
            got,
            json!({
                "month": "2024-11",
                "categories": [{"category": "Gifts", "total_expense": 35.5}],
            })
        );
    }

    #[tokio::test]
    async fn store_failures_are_internal_server_errors_for_both_routes() {
        let connection = get_test_connection();
        connection
            .execute("DROP TABLE \"transaction\"", ())
            .unwrap();
        let broken_state = StatsState {
            store: SQLiteTransactionStore::new(Arc::new(Mutex::new(connection))),
            clock: Arc::new(FixedClock(date!(2025 - 03 - 17))),
        };

        let summary =
            get_summary_endpoint(State(broken_state.clone()), Query(MonthQuery::default()))
                .await
                .into_response();
        let categories =
            get_by_category_endpoint(State(broken_state), Query(MonthQuery::default()))
                .await
                .into_response();

        assert_eq!(summary.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(categories.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
