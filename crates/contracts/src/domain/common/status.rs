use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status value: {0}")]
pub struct UnknownStatus(pub String);

/// Reduce a stored status string to its canonical token.
///
/// Older rows were written with capitalised labels ("Fixed", "In Progress"),
/// so matching is case-insensitive and spaces/hyphens collapse to `_`.
pub fn normalize_status_token(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

/// Deserialize an optional status column, treating values outside the
/// enumerated set as "no status".
pub fn deserialize_lenient_status<'de, D, S>(deserializer: D) -> Result<Option<S>, D::Error>
where
    D: Deserializer<'de>,
    S: FromStr<Err = UnknownStatus>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(value) if value.trim().is_empty() => None,
        Some(value) => match value.parse::<S>() {
            Ok(status) => Some(status),
            Err(e) => {
                log::warn!("ignoring stored status: {}", e);
                None
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_legacy_labels() {
        assert_eq!(normalize_status_token("Fixed"), "fixed");
        assert_eq!(normalize_status_token(" In Progress "), "in_progress");
        assert_eq!(normalize_status_token("in-progress"), "in_progress");
    }
}
