//! SHA-256 fingerprints for comparing derived state.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest of a canonical byte serialization.
///
/// Stored as a 64-character lowercase hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    hex: String,
}

impl Fingerprint {
    /// Computes the fingerprint of the given bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            hex: format!("{:x}", hasher.finalize()),
        }
    }

    /// Returns the full 64-character hex digest.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Returns the first 12 hex characters for display.
    pub fn short(&self) -> &str {
        &self.hex[..12]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_of_empty_bytes() {
        assert_eq!(
            Fingerprint::compute(&[]).as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn fingerprint_of_known_content() {
        assert_eq!(
            Fingerprint::compute(b"hello world").as_str(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn short_is_prefix() {
        let fp = Fingerprint::compute(b"test");
        assert_eq!(fp.short().len(), 12);
        assert!(fp.as_str().starts_with(fp.short()));
    }

    #[test]
    fn different_input_different_fingerprint() {
        assert_ne!(Fingerprint::compute(b"a"), Fingerprint::compute(b"b"));
    }
}
