//! Defines the core data models for transactions and the validation of
//! incoming transaction data.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and hand the
/// result to [TransactionStore::create](crate::TransactionStore::create),
/// which assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A human-readable label, e.g. "Groceries".
    pub text: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// The sign is chosen by the client, nothing ties it to `kind`.
    pub amount: f64,
    /// The label used to group transactions, usually "YYYY-MM".
    pub month: String,
    /// Whether this is an "income" or "expense". Not validated.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Transaction {
    /// Create a new transaction without an ID.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(text: &str, amount: f64, month: &str, kind: &str) -> NewTransaction {
        NewTransaction {
            text: text.to_owned(),
            amount,
            month: month.to_owned(),
            kind: kind.to_owned(),
        }
    }
}

/// A transaction that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A human-readable label, must not be empty.
    pub text: String,
    /// The signed amount of money.
    pub amount: f64,
    /// The grouping label.
    pub month: String,
    /// "income" or "expense".
    pub kind: String,
}

impl NewTransaction {
    /// Attach `id` to create a full [Transaction].
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            text: self.text,
            amount: self.amount,
            month: self.month,
            kind: self.kind,
        }
    }
}

// ============================================================================
// REQUEST DATA
// ============================================================================

/// The JSON body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text describing the transaction.
    pub text: String,
    /// The value of the transaction, either a JSON number or a numeric string.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// The grouping label.
    pub month: String,
    /// "income" or "expense".
    #[serde(rename = "type")]
    pub kind: String,
}

impl TransactionForm {
    /// Check the form and convert it into a [NewTransaction].
    ///
    /// # Errors
    /// Returns [Error::MalformedRequest] if `text` is empty or only whitespace.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        if self.text.trim().is_empty() {
            return Err(Error::MalformedRequest(
                "the field `text` must not be empty".to_owned(),
            ));
        }

        Ok(Transaction::build(
            &self.text,
            self.amount,
            &self.month,
            &self.kind,
        ))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Accept amounts sent either as numbers or as numeric strings, e.g. `"12.5"`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)
        .map_err(|_| serde::de::Error::custom("`amount` must be a number or numeric string"))?
    {
        RawAmount::Number(number) => number,
        RawAmount::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("could not parse \"{text}\" as an amount"))
        })?,
    };

    if !amount.is_finite() {
        return Err(serde::de::Error::custom("`amount` must be a finite number"));
    }

    Ok(amount)
}
