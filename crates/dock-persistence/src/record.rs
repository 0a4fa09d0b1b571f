//! Documentos persistidos: registro completo por run y entrada de índice.

use chrono::{DateTime, Utc};
use dock_core::{AttestationRecord, Digest256, InteractionMap, RunStatus, VisualizationRef};
use dock_domain::RankedLigand;
use serde::{Deserialize, Serialize};

/// Snapshot inmutable de un run terminado, tal como lo entrega el orquestador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: RunStatus,
    pub uploaded_files: Vec<String>,
    pub ranked_ligands: Vec<RankedLigand>,
    #[serde(default)]
    pub interactions: InteractionMap,
    #[serde(default)]
    pub visualizations: Vec<VisualizationRef>,
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub attestation: Option<AttestationRecord>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub ranking_fingerprint: Option<Digest256>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl AnalysisRecord {
    pub fn top_candidate(&self) -> Option<TopCandidate> {
        self.ranked_ligands.first().map(|l| TopCandidate { name: l.ligand_name.clone(),
                                                           affinity: l.best_affinity })
    }

    /// Resumen que va al índice.
    pub fn index_entry(&self) -> IndexEntry {
        let attestation = match &self.attestation {
            Some(a) => AttestationSummary { verified: true,
                                            transaction_ref: Some(a.transaction_ref.clone()),
                                            network: Some(a.network.clone()) },
            None => AttestationSummary::default(),
        };
        IndexEntry { analysis_id: self.analysis_id.clone(),
                     timestamp: self.timestamp,
                     status: self.status,
                     ligand_count: self.ranked_ligands.len(),
                     top_candidate: self.top_candidate(),
                     attestation,
                     uploaded_files: self.uploaded_files.clone(),
                     tags: self.tags.clone(),
                     project: self.project.clone(),
                     notes: self.notes.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCandidate {
    pub name: String,
    pub affinity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationSummary {
    pub verified: bool,
    pub transaction_ref: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: RunStatus,
    pub ligand_count: usize,
    pub top_candidate: Option<TopCandidate>,
    #[serde(default)]
    pub attestation: AttestationSummary,
    #[serde(default)]
    pub uploaded_files: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl IndexEntry {
    fn apply(&mut self, update: &MetadataUpdate) {
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(project) = &update.project {
            self.project = normalize_project(project);
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
    }
}

/// Filtros de `list`. Todos opcionales; `limit = None` significa sin límite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub project: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery {
    /// `search` busca (sin mayúsculas) en id, nombre del mejor candidato y
    /// proyecto; `tags` basta con que coincida uno; `project` es igualdad
    /// sin distinguir mayúsculas.
    pub fn matches(&self, entry: &IndexEntry) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let in_id = entry.analysis_id.to_lowercase().contains(&needle);
            let in_top = entry.top_candidate
                              .as_ref()
                              .is_some_and(|t| t.name.to_lowercase().contains(&needle));
            let in_project = entry.project
                                  .as_deref()
                                  .is_some_and(|p| p.to_lowercase().contains(&needle));
            if !(in_id || in_top || in_project) {
                return false;
            }
        }
        if !self.tags.is_empty() && !entry.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if let Some(project) = &self.project {
            match &entry.project {
                Some(p) if p.eq_ignore_ascii_case(project) => {}
                _ => return false,
            }
        }
        true
    }

    /// Aplica filtros y paginación sobre entradas ya ordenadas.
    pub fn select(&self, entries: &[IndexEntry]) -> Vec<IndexEntry> {
        let matching = entries.iter().filter(|e| self.matches(e)).skip(self.offset);
        match self.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }
}

/// Cambios de metadatos; `None` deja el campo como está.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub tags: Option<Vec<String>>,
    pub project: Option<String>,
    pub notes: Option<String>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.project.is_none() && self.notes.is_none()
    }

    pub(crate) fn apply_to_record(&self, record: &mut AnalysisRecord) {
        if let Some(tags) = &self.tags {
            record.tags = tags.clone();
        }
        if let Some(project) = &self.project {
            record.project = normalize_project(project);
        }
        if let Some(notes) = &self.notes {
            record.notes = notes.clone();
        }
    }

    pub(crate) fn apply_to_entry(&self, entry: &mut IndexEntry) {
        entry.apply(self);
    }
}

/// Proyecto vacío equivale a "sin proyecto".
fn normalize_project(project: &str) -> Option<String> {
    let trimmed = project.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_analyses: usize,
    pub total_ligands_tested: usize,
    pub verified_analyses: usize,
    pub best_overall_candidate: Option<TopCandidate>,
    pub total_projects: usize,
    pub total_tags: usize,
}

impl StoreStatistics {
    pub fn from_entries(entries: &[IndexEntry]) -> Self {
        let best = entries.iter()
                          .filter_map(|e| e.top_candidate.as_ref())
                          .fold(None::<&TopCandidate>, |best, c| match best {
                              Some(b) if b.affinity <= c.affinity => Some(b),
                              _ => Some(c),
                          });
        Self { total_analyses: entries.len(),
               total_ligands_tested: entries.iter().map(|e| e.ligand_count).sum(),
               verified_analyses: entries.iter().filter(|e| e.attestation.verified).count(),
               best_overall_candidate: best.cloned(),
               total_projects: distinct_projects(entries).len(),
               total_tags: distinct_tags(entries).len() }
    }
}

pub(crate) fn distinct_tags(entries: &[IndexEntry]) -> Vec<String> {
    let mut tags: Vec<String> = entries.iter().flat_map(|e| e.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}

pub(crate) fn distinct_projects(entries: &[IndexEntry]) -> Vec<String> {
    let mut projects: Vec<String> = entries.iter().filter_map(|e| e.project.clone()).collect();
    projects.sort();
    projects.dedup();
    projects
}
