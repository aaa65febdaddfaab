//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::TransactionStore,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The store holding the transactions.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The body sent after a transaction was deleted.
#[derive(Debug, PartialEq, Serialize)]
pub struct DeletedResponse {
    result: &'static str,
    deleted: TransactionId,
}

/// A route handler for deleting a transaction.
///
/// Responds with `{"result": "success", "deleted": id}`, or a 404 with
/// `{"result": "not found"}` if there is no transaction with that ID.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<DeletedResponse>, Error> {
    let Path(transaction_id) =
        transaction_id.map_err(|rejection| Error::MalformedRequest(rejection.body_text()))?;

    let mut store = state.transaction_store.lock().map_err(|error| {
        tracing::error!("could not acquire transaction store lock: {error}");
        Error::StoreLock
    })?;

    match store.remove(transaction_id) {
        Ok(true) => Ok(Json(DeletedResponse {
            result: "success",
            deleted: transaction_id,
        })),
        Ok(false) => {
            tracing::debug!("tried to delete missing transaction {transaction_id}");
            Err(Error::NotFound)
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            Err(error)
        }
    }
}
