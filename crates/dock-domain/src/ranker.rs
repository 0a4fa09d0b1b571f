//! Ranking de ligandos por afinidad de unión.
//!
//! Reducción pura: no hace IO ni muta su entrada, por lo que el mismo input
//! produce siempre el mismo orden.
use serde::{Deserialize, Serialize};

use crate::error::RankingError;
use crate::pose::{ParsedLigand, Pose, RankedLigand};

/// Ligando descartado por no tener poses. No es fatal por sí solo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedLigand {
    pub ligand_name: String,
    pub source: String,
}

impl DroppedLigand {
    pub fn message(&self) -> String {
        format!("No poses found for ligand: {}", self.ligand_name)
    }
}

/// Resultado de `LigandRanker::rank`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOutcome {
    pub ranked: Vec<RankedLigand>,
    pub dropped: Vec<DroppedLigand>,
    pub error: Option<RankingError>,
}

impl RankOutcome {
    /// Todos los mensajes (descartes + error fatal) en orden de aparición.
    pub fn messages(&self) -> Vec<String> {
        let mut out: Vec<String> = self.dropped.iter().map(DroppedLigand::message).collect();
        if let Some(e) = &self.error {
            out.push(e.to_string());
        }
        out
    }

    pub fn is_fatal(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub total_ligands: usize,
    pub best_ligand: Option<String>,
    pub best_affinity: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LigandRanker;

impl LigandRanker {
    pub fn new() -> Self {
        Self
    }

    pub fn rank(&self, parsed: &[ParsedLigand]) -> RankOutcome {
        if parsed.is_empty() {
            return RankOutcome { ranked: vec![],
                                 dropped: vec![],
                                 error: Some(RankingError::NoResults) };
        }

        let mut ranked = Vec::with_capacity(parsed.len());
        let mut dropped = Vec::new();
        for ligand in parsed {
            match best_pose(&ligand.poses) {
                Some(best) => ranked.push(RankedLigand { ligand_name: ligand.ligand_name.clone(),
                                                         source: ligand.source.clone(),
                                                         best_affinity: best.binding_affinity,
                                                         best_pose_index: best.pose_index,
                                                         total_pose_count: ligand.poses.len() }),
                None => dropped.push(DroppedLigand { ligand_name: ligand.ligand_name.clone(),
                                                     source: ligand.source.clone() }),
            }
        }

        // sort_by es estable: empates conservan el orden de entrada.
        ranked.sort_by(|a, b| a.best_affinity.total_cmp(&b.best_affinity));

        let error = ranked.is_empty().then(|| RankingError::NoSurvivors { dropped: dropped.len() });
        RankOutcome { ranked, dropped, error }
    }

    pub fn summarize(&self, ranked: &[RankedLigand]) -> RankingSummary {
        RankingSummary { total_ligands: ranked.len(),
                         best_ligand: ranked.first().map(|r| r.ligand_name.clone()),
                         best_affinity: ranked.first().map(|r| r.best_affinity) }
    }

    /// Conserva los ligandos con `best_affinity <= threshold`.
    pub fn filter_by_threshold(&self, ranked: &[RankedLigand], threshold: f64) -> Vec<RankedLigand> {
        ranked.iter().filter(|r| r.best_affinity <= threshold).cloned().collect()
    }
}

/// Pose de afinidad mínima; ante empate gana la primera.
fn best_pose(poses: &[Pose]) -> Option<&Pose> {
    poses.iter()
         .fold(None, |best: Option<&Pose>, p| match best {
             Some(b) if b.binding_affinity <= p.binding_affinity => Some(b),
             _ => Some(p),
         })
}
