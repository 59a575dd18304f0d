//! Note identifier: fresh ULIDs, or caller-chosen keys for forward references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use ulid::Ulid;

/// Maximum length of a note identifier.
pub const MAX_ID_LEN: usize = 128;

/// A unique identifier for notes.
///
/// Freshly assigned identifiers are ULIDs: 26-character Crockford Base32
/// strings that sort chronologically. Any other key made of ASCII
/// alphanumerics, `-`, `_` and `.` is also a valid identifier, which lets a
/// note body reference `[[meeting-notes]]` before that note exists.
///
/// Identifiers are case-sensitive.
///
/// # Examples
///
/// ```
/// use quill::domain::NoteId;
///
/// let id = NoteId::new();
/// assert_eq!(id.as_str().len(), 26);
///
/// let key: NoteId = "meeting-notes".parse().unwrap();
/// assert_eq!(key.prefix(), "meeting-no");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a new ULID-based NoteId with the current timestamp.
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Creates a ULID-based NoteId from a specific datetime (useful for testing).
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let system_time: SystemTime = datetime.into();
        Self(Ulid::from_datetime(system_time).to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns up to the first 10 characters, used for compact listings.
    ///
    /// For ULIDs this is the full 48-bit millisecond timestamp.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(10) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Returns the embedded timestamp if this identifier is a ULID.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let ulid = Ulid::from_string(&self.0).ok()?;
        DateTime::from_timestamp_millis(ulid.timestamp_ms() as i64)
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid note identifier.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| ParseNoteIdError {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(err("identifier cannot be empty"));
        }
        if s.len() > MAX_ID_LEN {
            return Err(err("identifier is longer than 128 characters"));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(err(
                "only alphanumeric characters, hyphens, underscores and dots are allowed",
            ));
        }

        Ok(Self(s.to_string()))
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
