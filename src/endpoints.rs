//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/delete/{transaction_id}', use [format_endpoint].

/// The root route which serves the ledger page.
pub const ROOT: &str = "/";
/// The route for listing and creating transactions.
pub const TRANSACTIONS_API: &str = "/transactions";
/// The route for deleting a single transaction.
pub const DELETE_TRANSACTION: &str = "/delete/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/delete/{transaction_id}', '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
