//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated form for creating transactions
//! - The `TransactionStore` that keeps the transactions on disk
//! - The JSON endpoints for listing, creating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod store;

pub use core::{NewTransaction, Transaction, TransactionForm};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use store::TransactionStore;
