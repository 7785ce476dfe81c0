use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a stored record.
///
/// The backing tables may use either `uuid` or `bigint` primary keys, so the
/// id is kept as its textual form and accepts both JSON strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Ok(RecordId(s)),
            Raw::Int(n) => Ok(RecordId(n.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_and_numeric_ids() {
        let a: RecordId = serde_json::from_str("\"3f1c-aa\"").unwrap();
        let b: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(a.as_str(), "3f1c-aa");
        assert_eq!(b.to_string(), "42");
    }
}
