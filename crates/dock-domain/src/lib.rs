//! dock-domain: modelo normalizado de poses y herramientas puras sobre él.
//!
//! - `pose`: `Pose`, `ParsedLigand`, `RankedLigand`.
//! - `parser`: convierte la salida cruda de docking (log tabular o registros
//!   `REMARK VINA RESULT`) en un `ParsedLigand`.
//! - `ranker`: reduce cada ligando a su mejor pose y ordena por afinidad.
//!
//! Nada en este crate conoce el estado del pipeline; el orquestador decide qué
//! hacer con cada error.
pub mod error;
pub mod parser;
pub mod pose;
pub mod ranker;

pub use error::{InputError, RankingError};
pub use parser::{DockingParser, SUPPORTED_EXTENSIONS};
pub use pose::{LigandInfo, ParsedLigand, Pose, PoseFormat, RankedLigand};
pub use ranker::{DroppedLigand, LigandRanker, RankOutcome, RankingSummary};
