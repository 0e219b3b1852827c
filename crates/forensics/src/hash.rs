//! Hashing boundary.
//!
//! Single call site for the evidentiary hash primitive. Any compliant,
//! unsalted SHA-256 implementation dropped in behind `sha256_hex` produces
//! identical digests; nothing else in the workspace touches a hasher.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::canonicalize;

/// SHA-256 digest as 64 lowercase hex characters.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hash the canonical serialization of a JSON value.
pub fn sha256_canonical(value: &Value) -> String {
    sha256_hex(canonicalize(value).as_bytes())
}
