//! Supporting utilities: fingerprints and plain-text extraction

mod fingerprint;
mod plain_text;

pub use fingerprint::Fingerprint;
pub use plain_text::plain_text;
