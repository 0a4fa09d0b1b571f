//! Historial append-only de transiciones de un run.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stage::{EdgeKind, Stage};

/// Una transición aceptada. Las rechazadas no quedan registradas aquí.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTransition {
    pub seq: u32,
    pub from: Stage,
    pub to: Stage,
    pub edge: EdgeKind,
    pub at: DateTime<Utc>, // metadato (no entra en fingerprints)
}
