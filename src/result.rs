//! Superficie final de un run: lo que la CLI imprime y el almacén persiste.

use chrono::{DateTime, Utc};
use dock_core::{AnalysisRun, AttestationRecord, Digest256, InteractionMap, RunStatus, Stage, StageTransition,
                VisualizationRef};
use dock_domain::RankedLigand;
use dock_persistence::AnalysisRecord;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: RunStatus,
    pub analysis_id: String,
    /// Etapa en la que terminó el run (`complete`, `failed` o `initialized`
    /// si falló antes de parsear).
    pub stage: Stage,
    pub started_at: DateTime<Utc>,
    pub uploaded_files: Vec<String>,
    pub ranked_ligands: Vec<RankedLigand>,
    pub interactions: InteractionMap,
    pub visualizations: Vec<VisualizationRef>,
    pub report: Option<String>,
    pub attestation: Option<AttestationRecord>,
    /// Causas del fallo; vacío en runs completos.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Problemas no fatales de un run completo.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub ranking_fingerprint: Option<Digest256>,
    #[serde(default)]
    pub history: Vec<StageTransition>,
}

impl AnalysisResult {
    /// Snapshot del run. Los errores acumulados van a `errors` si el run falló
    /// y a `warnings` si completó.
    pub fn from_run(run: &AnalysisRun, uploaded_files: &[String]) -> Self {
        let status = if run.is_complete() { RunStatus::Complete } else { RunStatus::Failed };
        let messages = run.validation_errors().to_vec();
        let (errors, warnings) = match status {
            RunStatus::Complete => (Vec::new(), messages),
            RunStatus::Failed => (messages, Vec::new()),
        };
        let ranking_fingerprint = if run.ranked_ligands().is_empty() {
            None
        } else {
            match run.ranking_fingerprint() {
                Ok(digest) => Some(digest),
                Err(e) => {
                    warn!("run {}: ranking fingerprint unavailable: {}", run.run_id(), e);
                    None
                }
            }
        };
        Self { status,
               analysis_id: run.analysis_id(),
               stage: run.stage(),
               started_at: run.started_at(),
               uploaded_files: uploaded_files.to_vec(),
               ranked_ligands: run.ranked_ligands().to_vec(),
               interactions: run.interactions().clone(),
               visualizations: run.visualization_refs().to_vec(),
               report: run.report_text().map(str::to_string),
               attestation: run.attestation().cloned(),
               errors,
               warnings,
               ranking_fingerprint,
               history: run.history().to_vec() }
    }

    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }

    /// Documento persistible con los metadatos de usuario.
    pub fn to_record(&self, tags: Vec<String>, project: Option<String>, notes: Option<String>) -> AnalysisRecord {
        AnalysisRecord { analysis_id: self.analysis_id.clone(),
                         timestamp: self.started_at,
                         status: self.status,
                         uploaded_files: self.uploaded_files.clone(),
                         ranked_ligands: self.ranked_ligands.clone(),
                         interactions: self.interactions.clone(),
                         visualizations: self.visualizations.clone(),
                         report: self.report.clone(),
                         attestation: self.attestation.clone(),
                         errors: self.errors.clone(),
                         warnings: self.warnings.clone(),
                         ranking_fingerprint: self.ranking_fingerprint,
                         tags,
                         project: project.filter(|p| !p.trim().is_empty()),
                         notes: notes.unwrap_or_default() }
    }
}
