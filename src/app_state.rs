//! Implements a struct that holds the state of the REST server.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Error, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store that owns every transaction.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl AppState {
    /// Create a new [AppState] from an already loaded store.
    pub fn new(transaction_store: TransactionStore) -> Self {
        Self {
            transaction_store: Arc::new(Mutex::new(transaction_store)),
        }
    }

    /// Create a new [AppState] by loading the transactions stored at `data_path`.
    ///
    /// # Errors
    /// Returns an error if the data file exists but cannot be read or parsed.
    pub fn load(data_path: impl AsRef<Path>) -> Result<Self, Error> {
        TransactionStore::load(data_path).map(Self::new)
    }
}
