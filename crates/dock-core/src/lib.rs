//! dock-core: máquina de estados del pipeline de análisis y hashing
//! determinista.
//!
//! - `stage`: etapas y tabla de transiciones (con tipo de arista).
//! - `run`: `AnalysisRun`, único dueño del estado mutable de una ejecución.
//! - `hashing`: digests SHA-256 de inputs y reporte, JSON canónico.
//! - `model`: registros que el run acumula (atestación, visualizaciones).
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod run;
pub mod stage;

pub use errors::StateError;
pub use hashing::{empty_digest, hash_inputs, hash_report, Digest256, InputDigest};
pub use model::{AttestationRecord, InteractionMap, RunStatus, VisualizationKind, VisualizationRef};
pub use run::{AnalysisRun, StageTransition};
pub use stage::{EdgeKind, Stage};
