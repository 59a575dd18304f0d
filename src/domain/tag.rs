//! Case-insensitive `#`-prefixed tag type for categorizing notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A case-insensitive tag for categorizing notes.
///
/// Tags are flat labels written with a leading `#`. They are normalized to
/// lowercase with the prefix always present, making `Draft`, `#draft` and
/// `#DRAFT` equivalent.
///
/// # Validation Rules
/// - Non-empty after the `#` prefix
/// - Must contain only alphanumeric characters, hyphens, underscores and slashes
///
/// # Normalization
/// - Surrounding whitespace is trimmed
/// - Converted to lowercase
/// - A missing `#` prefix is added
///
/// # Examples
///
/// ```
/// use quill::domain::Tag;
///
/// let tag = Tag::new("Draft").unwrap();
/// assert_eq!(tag.as_str(), "#draft");
///
/// // Case-insensitive equality
/// let tag2 = Tag::new("#DRAFT").unwrap();
/// assert_eq!(tag, tag2);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String); // Always stored lowercase with '#' prefix

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// The input is normalized (trimmed, lowercased, `#`-prefixed) and validated.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if:
    /// - The tag name is empty or whitespace-only
    /// - The tag contains invalid characters
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let lowered = s.trim().to_lowercase();
        let name = lowered.strip_prefix('#').unwrap_or(&lowered);

        if name.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
        {
            return Err(ParseTagError(format!(
                "invalid tag '#{}': tags must contain only alphanumeric characters, hyphens, underscores, and slashes",
                name
            )));
        }

        Ok(Self(format!("#{}", name)))
    }

    /// Returns the normalized tag including its `#` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the tag name without the `#` prefix.
    pub fn name(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a list of raw tag strings, removing duplicates (first occurrence kept).
pub fn parse_tags<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Tag>, ParseTagError> {
    let tags = raw
        .iter()
        .map(|s| Tag::new(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(deduplicate_tags(tags))
}

/// Removes duplicate tags (by equality, which is case-insensitive for Tag).
pub(crate) fn deduplicate_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = Vec::new();
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}
