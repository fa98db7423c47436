//! Application router configuration.

use axum::{
    Json, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, put},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    stats::{get_by_category_endpoint, get_summary_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::STATS_SUMMARY, get(get_summary_endpoint))
        .route(endpoints::STATS_BY_CATEGORY, get(get_by_category_endpoint))
        .fallback(get_404_not_found)
        .layer(cors)
        .with_state(state)
}

/// The root path '/' reports that the API is up.
async fn get_index() -> Json<Value> {
    Json(json!({ "message": "Finance Tracker API is running" }))
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::http::{HeaderValue, StatusCode, header};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        AppState, FixedClock, build_router,
        endpoints::{self, format_endpoint},
    };

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            Arc::new(FixedClock(date!(2025 - 03 - 20))),
        )
        .unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn create(server: &TestServer, body: Value) -> Value {
        let response = server.post(endpoints::TRANSACTIONS).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        response.json::<Value>()
    }

    async fn seed_march(server: &TestServer) {
        create(
            server,
            json!({"tx_date": "2025-03-01", "type": "income", "category": "Salary", "amount": 1000}),
        )
        .await;
        create(
            server,
            json!({"tx_date": "2025-03-01", "type": "expense", "category": "Food", "amount": 200}),
        )
        .await;
        create(
            server,
            json!({"tx_date": "2025-03-03", "type": "expense", "category": "Transport", "amount": "50"}),
        )
        .await;
    }

    #[tokio::test]
    async fn root_reports_running() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({"message": "Finance Tracker API is running"})
        );
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/budgets").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let server = get_test_server();

        let response = server
            .get(endpoints::ROOT)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://localhost:5173"),
            )
            .await;

        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test]
    async fn summary_for_example_month() {
        let server = get_test_server();
        seed_march(&server).await;

        let response = server
            .get(endpoints::STATS_SUMMARY)
            .add_query_param("month", "2025-03")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "month": "2025-03",
                "total_income": 1000.0,
                "total_expense": 250.0,
                "balance": 750.0,
                "avg_daily_expense": 125.0,
                "daily_trend": [
                    {"date": "2025-03-01", "income": 1000.0, "expense": 200.0, "balance": 800.0},
                    {"date": "2025-03-03", "income": 0.0, "expense": 50.0, "balance": 750.0},
                ],
            })
        );
    }

    #[tokio::test]
    async fn summary_defaults_to_clock_month() {
        let server = get_test_server();
        seed_march(&server).await;

        let response = server.get(endpoints::STATS_SUMMARY).await;

        let body = response.json::<Value>();
        assert_eq!(body["month"], json!("2025-03"));
        assert_eq!(body["balance"], json!(750.0));
    }

    #[tokio::test]
    async fn category_breakdown_for_example_month() {
        let server = get_test_server();
        seed_march(&server).await;

        let response = server
            .get(endpoints::STATS_BY_CATEGORY)
            .add_query_param("month", "2025-03")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "month": "2025-03",
                "categories": [
                    {"category": "Food", "total_expense": 200.0},
                    {"category": "Transport", "total_expense": 50.0},
                ],
            })
        );
    }

    #[tokio::test]
    async fn malformed_month_yields_empty_analytics() {
        let server = get_test_server();
        seed_march(&server).await;

        let response = server
            .get(endpoints::STATS_BY_CATEGORY)
            .add_query_param("month", "March")
            .await;

        assert_eq!(
            response.json::<Value>(),
            json!({"month": "March", "categories": []})
        );
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"tx_date": "2025-03-01", "type": "expense"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "tx_date, type, category, and amount are required"})
        );
    }

    #[tokio::test]
    async fn list_update_and_delete_round_trip() {
        let server = get_test_server();
        let created = create(
            &server,
            json!({"tx_date": "2025-03-05", "type": "expense", "category": "Food", "amount": 12.5, "note": "Lunch"}),
        )
        .await;
        let id = created["id"].as_i64().unwrap();
        let path = format_endpoint(endpoints::TRANSACTION, id);

        let updated = server
            .put(&path)
            .json(&json!({"tx_date": "2025-03-06", "type": "expense", "category": "Dining", "amount": 15}))
            .await;
        assert_eq!(updated.status_code(), StatusCode::OK);
        assert_eq!(updated.json::<Value>()["category"], json!("Dining"));

        let listed = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["amount"], json!(15.0));
        assert_eq!(listed[0]["note"], Value::Null);

        let deleted = server.delete(&path).await;
        assert_eq!(deleted.status_code(), StatusCode::OK);
        assert_eq!(
            deleted.json::<Value>()["message"],
            json!("Transaction deleted")
        );

        let deleted_again = server.delete(&path).await;
        assert_eq!(deleted_again.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            deleted_again.json::<Value>(),
            json!({"error": "Transaction not found"})
        );
    }

    #[tokio::test]
    async fn update_missing_transaction_is_not_found() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 404))
            .json(&json!({"tx_date": "2025-03-06", "type": "income", "category": "Gift", "amount": 5}))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn analytics_fail_with_500_when_totals_overflow() {
        let server = get_test_server();
        for _ in 0..2 {
            create(
                &server,
                json!({"tx_date": "2025-03-02", "type": "expense", "category": "Food", "amount": "79228162514264337593543950335"}),
            )
            .await;
        }

        for endpoint in [endpoints::STATS_SUMMARY, endpoints::STATS_BY_CATEGORY] {
            let response = server.get(endpoint).add_query_param("month", "2025-03").await;

            assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.json::<Value>(),
                json!({"error": "Internal server error"})
            );
        }
    }

    #[tokio::test]
    async fn analytics_fail_with_500_when_store_fails() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            Arc::new(FixedClock(date!(2025 - 03 - 20))),
        )
        .unwrap();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE \"transaction\"", ())
            .unwrap();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        for endpoint in [endpoints::STATS_SUMMARY, endpoints::STATS_BY_CATEGORY] {
            let response = server.get(endpoint).await;

            assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.json::<Value>(),
                json!({"error": "Internal server error"})
            );
        }
    }
}
