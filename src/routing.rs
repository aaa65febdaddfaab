//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, Error, endpoints,
    index_page::get_index_page,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Requests from any origin are allowed.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode, header};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::{AppState, build_router, endpoints, endpoints::format_endpoint};

    fn get_test_server(temp_dir: &TempDir) -> TestServer {
        let state = AppState::load(temp_dir.path().join("data.json"))
            .expect("Could not load transaction store.");
        let app = build_router(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn coffee() -> Value {
        json!({"text": "Coffee", "amount": 3.5, "month": "Feb", "type": "expense"})
    }

    #[tokio::test]
    async fn create_on_empty_store_returns_first_transaction() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server.post(endpoints::TRANSACTIONS_API).json(&coffee()).await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "id": 1, "text": "Coffee", "amount": 3.5, "month": "Feb", "type": "expense"
        }));
    }

    #[tokio::test]
    async fn create_coerces_string_amount() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"text": "Lunch", "amount": "12.5", "month": "Feb", "type": "expense"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["amount"], json!(12.5));
    }

    #[tokio::test]
    async fn list_returns_transactions_in_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);
        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"text": "Salary", "amount": 1000, "month": "2025-02", "type": "income"}))
            .await;
        server.post(endpoints::TRANSACTIONS_API).json(&coffee()).await;

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Value>>();
        let texts: Vec<_> = transactions.iter().map(|t| t["text"].clone()).collect();
        assert_eq!(texts, vec![json!("Salary"), json!("Coffee")]);
    }

    #[tokio::test]
    async fn delete_then_list_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);
        server.post(endpoints::TRANSACTIONS_API).json(&coffee()).await;

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_TRANSACTION, 1))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"result": "success", "deleted": 1}));
        server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_TRANSACTION, 99))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"result": "not found"}));
    }

    #[tokio::test]
    async fn delete_with_non_integer_id_is_bad_request() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server.delete("/delete/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["result"], json!("error"));
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"text": "Coffee", "amount": 3.5, "month": "Feb"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["result"], json!("error"));
        server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn create_with_invalid_json_is_bad_request() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .text("{ not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ids_continue_after_restart() {
        let temp_dir = TempDir::new().unwrap();
        {
            let server = get_test_server(&temp_dir);
            server.post(endpoints::TRANSACTIONS_API).json(&coffee()).await;
            server.post(endpoints::TRANSACTIONS_API).json(&coffee()).await;
            server
                .delete(&format_endpoint(endpoints::DELETE_TRANSACTION, 1))
                .await
                .assert_status_ok();
        }

        let server = get_test_server(&temp_dir);
        let response = server.post(endpoints::TRANSACTIONS_API).json(&coffee()).await;

        assert_eq!(response.json::<Value>()["id"], json!(3));
    }

    #[tokio::test]
    async fn allows_any_origin() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://example.com"),
            )
            .await;

        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[tokio::test]
    async fn index_page_is_html() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn no_static_files_are_served() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server.get("/static/app.js").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"result": "not found"}));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let server = get_test_server(&temp_dir);

        let response = server.get("/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"result": "not found"}));
    }
}
