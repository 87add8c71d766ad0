use serde::{Deserialize, Serialize};

/// A persisted short code → long URL record.
///
/// Field names on the wire and in the store are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub short_code: String,
    pub long_url: String,
    #[serde(default)]
    pub clicks: u64,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds, 0 until the first resolve.
    #[serde(default)]
    pub last_accessed: i64,
}

impl Mapping {
    /// Fresh mapping as written by a successful create.
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>, created_at: i64) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
            clicks: 0,
            created_at,
            last_accessed: 0,
        }
    }
}

/// Result of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A mapping with that short code already exists; nothing was written.
    Conflict,
}
