use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Posición de un `AnalysisRun` en el grafo de etapas.
///
/// El camino obligatorio es `Initialized -> Parsing -> Parsed -> Ranking`.
/// Visualización, reporte y atestación son opcionales. `Complete` y `Failed`
/// son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Initialized,
    Parsing,
    Parsed,
    Ranking,
    Visualizing,
    Visualized,
    Reporting,
    Attesting,
    Attested,
    Complete,
    Failed,
}

impl Stage {
    pub const ALL: [Stage; 11] = [Stage::Initialized,
                                  Stage::Parsing,
                                  Stage::Parsed,
                                  Stage::Ranking,
                                  Stage::Visualizing,
                                  Stage::Visualized,
                                  Stage::Reporting,
                                  Stage::Attesting,
                                  Stage::Attested,
                                  Stage::Complete,
                                  Stage::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Initialized => "initialized",
            Stage::Parsing => "parsing",
            Stage::Parsed => "parsed",
            Stage::Ranking => "ranking",
            Stage::Visualizing => "visualizing",
            Stage::Visualized => "visualized",
            Stage::Reporting => "reporting",
            Stage::Attesting => "attesting",
            Stage::Attested => "attested",
            Stage::Complete => "complete",
            Stage::Failed => "failed",
        }
    }

    /// Sin aristas salientes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL.iter()
                  .copied()
                  .find(|st| st.as_str() == s)
                  .ok_or_else(|| format!("unknown stage: {s}"))
    }
}
