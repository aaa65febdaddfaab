//! Transaction ID type definition.

/// Alias for the integer type used for transaction IDs.
///
/// IDs are assigned by the [TransactionStore](crate::TransactionStore) and
/// are never reused, even after the transaction is deleted.
pub type TransactionId = i64;
