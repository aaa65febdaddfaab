//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    transaction::{TransactionForm, TransactionStore},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store holding the transactions.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with the created
/// transaction and the status code 201 on success.
///
/// The body is validated before the store is touched, so malformed bodies
/// are rejected with a 400 and never use up an ID.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    form: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(form) = form.map_err(|rejection| {
        tracing::debug!("rejected transaction body: {rejection}");
        Error::MalformedRequest(rejection.body_text())
    })?;

    let new_transaction = form.validate()?;

    let mut store = state.transaction_store.lock().map_err(|error| {
        tracing::error!("could not acquire transaction store lock: {error}");
        Error::StoreLock
    })?;

    let transaction = store
        .create(new_transaction)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, body::to_bytes, extract::State, http::StatusCode};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::{
        Error,
        transaction::{TransactionForm, TransactionStore, create_transaction_endpoint},
    };

    use super::CreateTransactionState;

    fn get_test_state() -> (TempDir, CreateTransactionState) {
        let temp_dir = TempDir::new().unwrap();
        let store = TransactionStore::load(temp_dir.path().join("data.json")).unwrap();
        let state = CreateTransactionState {
            transaction_store: Arc::new(Mutex::new(store)),
        };

        (temp_dir, state)
    }

    fn form(value: Value) -> TransactionForm {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (_temp_dir, state) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            Ok(Json(form(json!({
                "text": "Coffee", "amount": 3.5, "month": "Feb", "type": "expense"
            })))),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({"id": 1, "text": "Coffee", "amount": 3.5, "month": "Feb", "type": "expense"})
        );
        let store = state.transaction_store.lock().unwrap();
        assert_eq!(store.transactions().len(), 1);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_using_an_id() {
        let (_temp_dir, state) = get_test_state();

        let result = create_transaction_endpoint(
            State(state.clone()),
            Ok(Json(form(json!({
                "text": "", "amount": 3.5, "month": "Feb", "type": "expense"
            })))),
        )
        .await;

        assert!(matches!(result, Err(Error::MalformedRequest(_))));
        let store = state.transaction_store.lock().unwrap();
        assert!(store.transactions().is_empty());
        assert_eq!(store.next_id(), 1);
    }
}
