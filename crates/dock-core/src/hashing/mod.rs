//! Hashing determinista de inputs, reportes y valores JSON.

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{empty_digest, hash_bytes, hash_inputs, hash_inputs_detailed, hash_report, hash_value, Digest256, InputDigest};
