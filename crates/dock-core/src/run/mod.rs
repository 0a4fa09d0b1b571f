//! `AnalysisRun`: estado mutable de una ejecución del pipeline.
//!
//! Es el único componente que puede avanzar `stage`, y sólo a través de la
//! tabla de `crate::stage`. Los setters con guarda verifican la etapa actual y
//! que los campos de escritura única no se sobrescriban. Los errores de
//! validación van a un sumidero aparte (`add_validation_error`) que nunca
//! falla ni participa del grafo.
mod history;

pub use history::StageTransition;

use chrono::{DateTime, Utc};
use dock_domain::{ParsedLigand, RankedLigand};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::constants::{MAX_ANALYSIS_ID_LEN, PIPELINE_VERSION};
use crate::errors::StateError;
use crate::hashing::{hash_value, Digest256};
use crate::model::{AttestationRecord, InteractionMap, VisualizationRef};
use crate::stage::{edge_kind, EdgeKind, Stage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    stage: Stage,
    raw_inputs: Vec<String>,
    parsed_results: Vec<ParsedLigand>,
    ranked_ligands: Option<Vec<RankedLigand>>,
    visualization_refs: Vec<VisualizationRef>,
    interactions: InteractionMap,
    report_text: Option<String>,
    attestation: Option<AttestationRecord>,
    validation_errors: Vec<String>,
    history: Vec<StageTransition>,
}

impl Default for AnalysisRun {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRun {
    pub fn new() -> Self {
        Self::with_identity(Uuid::new_v4(), Utc::now())
    }

    /// Constructor con identidad explícita (replays y tests deterministas).
    pub fn with_identity(run_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self { run_id,
               started_at,
               stage: Stage::Initialized,
               raw_inputs: Vec::new(),
               parsed_results: Vec::new(),
               ranked_ligands: None,
               visualization_refs: Vec::new(),
               interactions: InteractionMap::new(),
               report_text: None,
               attestation: None,
               validation_errors: Vec::new(),
               history: Vec::new() }
    }

    // ------------------------------------------------------------------
    // Transiciones
    // ------------------------------------------------------------------

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Predicado puro sobre la misma tabla que `transition`.
    pub fn can_transition(&self, target: Stage) -> bool {
        edge_kind(self.stage, target).is_some()
    }

    /// Intenta avanzar a `target`. Si la arista no existe no muta nada.
    pub fn try_transition(&mut self, target: Stage) -> Result<EdgeKind, StateError> {
        let from = self.stage;
        let Some(edge) = edge_kind(from, target) else {
            warn!("run {}: rejected transition {} -> {}", self.run_id, from, target);
            return Err(StateError::IllegalTransition { from, to: target });
        };
        self.stage = target;
        self.history.push(StageTransition { seq: self.history.len() as u32,
                                            from,
                                            to: target,
                                            edge,
                                            at: Utc::now() });
        debug!("run {}: {} -> {} ({:?})", self.run_id, from, target, edge);
        Ok(edge)
    }

    /// `true` si la etapa cambió exactamente una vez; `false` sin efectos.
    pub fn transition(&mut self, target: Stage) -> bool {
        self.try_transition(target).is_ok()
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    pub fn is_failed(&self) -> bool {
        self.stage == Stage::Failed
    }

    pub fn history(&self) -> &[StageTransition] {
        &self.history
    }

    /// Si el run pasó por `stage` en algún momento.
    pub fn visited(&self, stage: Stage) -> bool {
        self.history.iter().any(|t| t.to == stage)
    }

    // ------------------------------------------------------------------
    // Sumidero de errores
    // ------------------------------------------------------------------

    pub fn add_validation_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        debug!("run {}: validation error recorded: {}", self.run_id, error);
        self.validation_errors.push(error);
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    pub fn has_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    // ------------------------------------------------------------------
    // Setters con guarda
    // ------------------------------------------------------------------

    fn require(&self, operation: &'static str, expected: Stage) -> Result<(), StateError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(StateError::StageMismatch { operation,
                                            expected,
                                            actual: self.stage })
        }
    }

    /// Sólo durante la validación (antes de `Parsing`).
    pub fn add_raw_input(&mut self, identifier: impl Into<String>) -> Result<(), StateError> {
        self.require("add_raw_input", Stage::Initialized)?;
        self.raw_inputs.push(identifier.into());
        Ok(())
    }

    pub fn add_parsed_result(&mut self, parsed: ParsedLigand) -> Result<(), StateError> {
        self.require("add_parsed_result", Stage::Parsing)?;
        self.parsed_results.push(parsed);
        Ok(())
    }

    /// Escritura única, durante `Ranking`.
    pub fn set_ranked_ligands(&mut self, ranked: Vec<RankedLigand>) -> Result<(), StateError> {
        self.require("set_ranked_ligands", Stage::Ranking)?;
        if self.ranked_ligands.is_some() {
            return Err(StateError::AlreadyWritten("ranked_ligands"));
        }
        self.ranked_ligands = Some(ranked);
        Ok(())
    }

    pub fn add_visualization(&mut self, reference: VisualizationRef) -> Result<(), StateError> {
        self.require("add_visualization", Stage::Visualizing)?;
        self.visualization_refs.push(reference);
        Ok(())
    }

    pub fn set_report(&mut self, text: String) -> Result<(), StateError> {
        self.require("set_report", Stage::Reporting)?;
        if self.report_text.is_some() {
            return Err(StateError::AlreadyWritten("report_text"));
        }
        self.report_text = Some(text);
        Ok(())
    }

    pub fn set_attestation(&mut self, record: AttestationRecord) -> Result<(), StateError> {
        self.require("set_attestation", Stage::Attesting)?;
        if self.attestation.is_some() {
            return Err(StateError::AlreadyWritten("attestation"));
        }
        self.attestation = Some(record);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lectura
    // ------------------------------------------------------------------

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn raw_inputs(&self) -> &[String] {
        &self.raw_inputs
    }

    pub fn parsed_results(&self) -> &[ParsedLigand] {
        &self.parsed_results
    }

    pub fn ranked_ligands(&self) -> &[RankedLigand] {
        self.ranked_ligands.as_deref().unwrap_or(&[])
    }

    pub fn visualization_refs(&self) -> &[VisualizationRef] {
        &self.visualization_refs
    }

    pub fn interactions(&self) -> &InteractionMap {
        &self.interactions
    }

    pub fn report_text(&self) -> Option<&str> {
        self.report_text.as_deref()
    }

    pub fn attestation(&self) -> Option<&AttestationRecord> {
        self.attestation.as_ref()
    }

    /// `analysis_<YYYYmmdd_HHMMSS>_<n>ligands_<8 hex del run_id>`.
    pub fn analysis_id(&self) -> String {
        let short = &self.run_id.simple().to_string()[..8];
        let id = format!("analysis_{}_{}ligands_{}",
                         self.started_at.format("%Y%m%d_%H%M%S"),
                         self.ranked_ligands().len(),
                         short);
        debug_assert!(id.len() <= MAX_ANALYSIS_ID_LEN);
        id
    }

    /// Fingerprint del ranking: JSON canónico de los ligandos rankeados más la
    /// versión del pipeline. No incluye timestamps.
    pub fn ranking_fingerprint(&self) -> Result<Digest256, serde_json::Error> {
        let ranked = serde_json::to_value(self.ranked_ligands())?;
        Ok(hash_value(&json!({
                          "pipeline_version": PIPELINE_VERSION,
                          "ranked_ligands": ranked,
                      })))
    }
}
