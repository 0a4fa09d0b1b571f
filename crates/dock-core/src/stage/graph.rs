//! Tabla de adyacencia del pipeline.
//!
//! Cada arista lleva su `EdgeKind`:
//! - `Hard`: camino obligatorio; debe recorrerse antes de completar.
//! - `Soft`: entra, sale o salta una etapa opcional (visualización, reporte,
//!   atestación). Omitirla no invalida el resultado.
//! - `Failure`: lleva a `Failed`, terminal.
use serde::{Deserialize, Serialize};

use super::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Hard,
    Soft,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Stage,
    pub kind: EdgeKind,
}

const fn hard(to: Stage) -> Edge {
    Edge { to, kind: EdgeKind::Hard }
}

const fn soft(to: Stage) -> Edge {
    Edge { to, kind: EdgeKind::Soft }
}

const FAIL: Edge = Edge { to: Stage::Failed,
                          kind: EdgeKind::Failure };

const FROM_INITIALIZED: &[Edge] = &[hard(Stage::Parsing)];
const FROM_PARSING: &[Edge] = &[hard(Stage::Parsed), FAIL];
const FROM_PARSED: &[Edge] = &[hard(Stage::Ranking)];
const FROM_RANKING: &[Edge] = &[soft(Stage::Visualizing), soft(Stage::Reporting), soft(Stage::Complete), FAIL];
const FROM_VISUALIZING: &[Edge] = &[soft(Stage::Visualized), FAIL];
const FROM_VISUALIZED: &[Edge] = &[soft(Stage::Reporting)];
const FROM_REPORTING: &[Edge] = &[soft(Stage::Attesting), soft(Stage::Complete), FAIL];
const FROM_ATTESTING: &[Edge] = &[soft(Stage::Attested), soft(Stage::Complete), FAIL];
const FROM_ATTESTED: &[Edge] = &[soft(Stage::Complete)];

/// Aristas salientes de `from`. Vacío para etapas terminales.
pub fn edges_from(from: Stage) -> &'static [Edge] {
    match from {
        Stage::Initialized => FROM_INITIALIZED,
        Stage::Parsing => FROM_PARSING,
        Stage::Parsed => FROM_PARSED,
        Stage::Ranking => FROM_RANKING,
        Stage::Visualizing => FROM_VISUALIZING,
        Stage::Visualized => FROM_VISUALIZED,
        Stage::Reporting => FROM_REPORTING,
        Stage::Attesting => FROM_ATTESTING,
        Stage::Attested => FROM_ATTESTED,
        Stage::Complete | Stage::Failed => &[],
    }
}

/// Tipo de la arista `from -> to`, o `None` si no existe.
pub fn edge_kind(from: Stage, to: Stage) -> Option<EdgeKind> {
    edges_from(from).iter().find(|e| e.to == to).map(|e| e.kind)
}
