//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body for creating a transaction was missing a field, had
    /// the wrong shape or contained a value that could not be coerced.
    ///
    /// The message is safe to show to the client.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The requested resource was not found.
    ///
    /// For the delete endpoint, the client should check that the ID is
    /// correct and that the transaction has not already been deleted.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The data file exists but does not contain a valid list of transactions.
    ///
    /// This is fatal at startup, the server should not run on top of a data
    /// file that it would overwrite on the next write.
    #[error("the data file \"{path}\" is corrupt: {reason}")]
    CorruptData {
        /// The path to the data file.
        path: String,
        /// Why the file could not be parsed.
        reason: String,
    },

    /// Reading, writing or renaming the data file failed.
    ///
    /// The error string should only be logged on the server.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// An error occurred while serializing the transactions as JSON.
    #[error("could not serialize as JSON: {0}")]
    Serialization(String),

    /// A transaction had the largest possible ID, so no ID is left to assign
    /// after it.
    #[error("no transaction ID is left after {0}")]
    IdOverflow(i64),

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the transaction store lock")]
    StoreLock,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MalformedRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "result": "error", "message": message })),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "result": "not found" })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "result": "error",
                        "message": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response()
            }
        }
    }
}
