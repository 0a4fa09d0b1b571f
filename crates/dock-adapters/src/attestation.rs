//! Envío de atestaciones.
//!
//! El core entrega `{analysis_id, input_hash, report_hash}` y recibe un
//! `Result<AttestationOutcome, AttestationError>`; nunca captura pánicos ni
//! interpreta cómo se firma o envía la transacción.
use dock_core::constants::MAX_ANALYSIS_ID_LEN;
use dock_core::Digest256;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::AttestationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationPayload {
    pub analysis_id: String,
    pub input_hash: Digest256,
    pub report_hash: Digest256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationOutcome {
    pub transaction_ref: String,
    pub network: String,
}

pub trait AttestationSubmitter {
    fn submit(&self, payload: &AttestationPayload) -> Result<AttestationOutcome, AttestationError>;

    /// Consulta una atestación previa. `Ok(None)` si no existe.
    fn verify(&self, analysis_id: &str) -> Result<Option<AttestationOutcome>, AttestationError>;
}

/// Valida el payload con las mismas reglas que el programa on-chain.
pub fn validate_payload(payload: &AttestationPayload) -> Result<(), AttestationError> {
    if payload.analysis_id.is_empty() {
        return Err(AttestationError::InvalidPayload("analysis_id is empty".into()));
    }
    if payload.analysis_id.len() > MAX_ANALYSIS_ID_LEN {
        return Err(AttestationError::InvalidPayload(format!("analysis_id longer than {MAX_ANALYSIS_ID_LEN} bytes")));
    }
    // Digest256 siempre serializa a 64 caracteres hex; no hay más que validar.
    Ok(())
}

/// Submitter sin red: valida y devuelve una referencia `mock_tx_<id>`.
#[derive(Debug, Clone)]
pub struct DryRunSubmitter {
    network: String,
}

impl DryRunSubmitter {
    pub fn new(network: impl Into<String>) -> Self {
        Self { network: network.into() }
    }
}

impl Default for DryRunSubmitter {
    fn default() -> Self {
        Self::new("devnet")
    }
}

impl AttestationSubmitter for DryRunSubmitter {
    fn submit(&self, payload: &AttestationPayload) -> Result<AttestationOutcome, AttestationError> {
        validate_payload(payload)?;
        let tx = format!("mock_tx_{}", payload.analysis_id);
        info!("dry-run attestation {} on {} (input={}, report={})",
              payload.analysis_id, self.network, payload.input_hash, payload.report_hash);
        Ok(AttestationOutcome { transaction_ref: tx,
                                network: self.network.clone() })
    }

    fn verify(&self, _analysis_id: &str) -> Result<Option<AttestationOutcome>, AttestationError> {
        Ok(None)
    }
}
