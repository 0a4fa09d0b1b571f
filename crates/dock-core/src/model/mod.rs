//! Registros que un `AnalysisRun` acumula a lo largo de las etapas.

pub mod attestation;
pub mod visualization;

pub use attestation::AttestationRecord;
pub use visualization::{VisualizationKind, VisualizationRef};

use serde::{Deserialize, Serialize};

/// Estado final visible de un run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Complete,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Complete => "complete",
            RunStatus::Failed => "failed",
        }
    }
}

/// Interacciones por ligando. Hoy siempre vacío: la extracción de contactos
/// no está implementada.
pub type InteractionMap = indexmap::IndexMap<String, serde_json::Value>;
