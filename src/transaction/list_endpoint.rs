//! Defines the endpoint for listing every transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The store holding the transactions.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler that responds with all transactions as a JSON array, in
/// the order they were created.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let store = state.transaction_store.lock().map_err(|error| {
        tracing::error!("could not acquire transaction store lock: {error}");
        Error::StoreLock
    })?;

    Ok(Json(store.transactions().to_vec()))
}
