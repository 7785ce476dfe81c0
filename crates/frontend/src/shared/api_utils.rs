//! URL building and error normalisation for the backend-as-a-service endpoints
//!
//! Everything here is pure: request construction lives in `shared::supabase`.

use contracts::shared::database_error::DatabaseError;

/// Path of the runtime configuration served by the host
pub const CONFIG_PATH: &str = "/api/config";

/// `{base}/rest/v1/{table}` with optional query pairs
///
/// # Example
/// ```ignore
/// let url = rest_url("https://x.supabase.co", "bug_reports", &[("order", "created_at.desc")]);
/// ```
pub fn rest_url(base: &str, table: &str, query: &[(&str, &str)]) -> String {
    with_query(format!("{}/rest/v1/{}", base, table), query)
}

/// REST filter value selecting a single row by id (`eq.<id>`)
pub fn eq_filter(id: &str) -> String {
    format!("eq.{}", id)
}

/// `{base}/auth/v1/{path}` with optional query pairs
pub fn auth_url(base: &str, path: &str, query: &[(&str, &str)]) -> String {
    with_query(format!("{}/auth/v1/{}", base, path), query)
}

/// Upload target for an object inside a storage bucket
pub fn storage_object_url(base: &str, bucket: &str, object: &str) -> String {
    format!(
        "{}/storage/v1/object/{}/{}",
        base,
        bucket,
        urlencoding::encode(object)
    )
}

/// Publicly readable URL of a stored object
pub fn storage_public_url(base: &str, bucket: &str, object: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base,
        bucket,
        urlencoding::encode(object)
    )
}

fn with_query(mut url: String, query: &[(&str, &str)]) -> String {
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        // Column lists and filter operators stay readable
        url.push_str(&encode_query_value(value));
    }
    url
}

fn encode_query_value(value: &str) -> String {
    value
        .split(',')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Error normalisation
// ============================================================================

/// Request could not be sent or the body could not be read
pub fn network_error(operation: &str) -> DatabaseError {
    DatabaseError::new(format!("Network error while {}", operation))
}

/// Success status, but the body did not match the expected shape
pub fn decode_error(operation: &str) -> DatabaseError {
    DatabaseError::with_code(format!("Unexpected response while {}", operation), "decode")
}

/// Map a non-success HTTP response to a `DatabaseError`.
///
/// Auth endpoints answer with `error_description`/`msg`, REST with
/// `message`/`code`, storage with `error`/`message`.
pub fn http_error(operation: &str, status: u16, body: &str) -> DatabaseError {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();

    let text_field = |keys: &[&str]| -> Option<String> {
        let value = parsed.as_ref()?;
        keys.iter().find_map(|k| match value.get(*k)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    };

    let message = text_field(&["message", "msg", "error_description", "error"])
        .unwrap_or_else(|| format!("Request failed while {} (HTTP {})", operation, status));
    let code = text_field(&["code", "error_code", "statusCode"]).unwrap_or_else(|| status.to_string());

    DatabaseError::with_code(message, code)
}
