//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod text;
pub mod url;

use sha2::{Digest, Sha256};

pub use text::normalize_whitespace;
pub use url::resolve_url;

/// Width of derived hash identifiers, in hex characters.
pub const HASH_WIDTH: usize = 16;

/// SHA-256 of `input`, hex encoded and truncated to [`HASH_WIDTH`].
pub fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_WIDTH);
    encoded
}
