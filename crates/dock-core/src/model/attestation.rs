use serde::{Deserialize, Serialize};

use crate::hashing::Digest256;

/// Compromiso (par de hashes) más la referencia externa de la transacción.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationRecord {
    pub analysis_id: String,
    pub input_hash: Digest256,
    pub report_hash: Digest256,
    pub transaction_ref: String,
    pub network: String,
}
