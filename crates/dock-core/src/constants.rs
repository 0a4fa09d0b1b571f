//! Constantes del pipeline.

/// Versión lógica del pipeline. Entra en el fingerprint del ranking, así que
/// cambiarla invalida fingerprints previos aunque los datos no cambien.
pub const PIPELINE_VERSION: &str = "docksight-1.0";

/// Ligandos del top que reciben imagen de pose.
pub const DEFAULT_TOP_N: usize = 5;

/// Límite del identificador de análisis aceptado por el programa on-chain.
pub const MAX_ANALYSIS_ID_LEN: usize = 64;
