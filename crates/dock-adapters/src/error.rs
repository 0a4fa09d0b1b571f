//! Errores de los colaboradores. Ninguno es fatal para el run.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VisualizationError {
    #[error("Pose file not found: {0}")]
    PoseFileMissing(String),
    #[error("No ranked ligands provided")]
    NothingToRender,
    #[error("Visualization generation failed: {0}")]
    Render(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("No ranked ligands to report")]
    EmptyRanking,
    #[error("Report composition failed: {0}")]
    Compose(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttestationError {
    #[error("invalid attestation payload: {0}")]
    InvalidPayload(String),
    #[error("submission failed: {0}")]
    Submission(String),
    #[error("Skipping attestation: invalid state transition")]
    StateRejected,
    #[error("Skipping attestation: no report available")]
    NoReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reasons_read_as_warnings() {
        assert_eq!(AttestationError::StateRejected.to_string(), "Skipping attestation: invalid state transition");
        assert_eq!(AttestationError::NoReport.to_string(), "Skipping attestation: no report available");
    }
}
