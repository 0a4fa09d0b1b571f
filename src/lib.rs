//! DockSight
//!
//! Librería central del análisis de resultados de docking molecular:
//! - `pipeline`: orquestador de etapas sobre un `AnalysisRun`.
//! - `result`: superficie final (`AnalysisResult`) y su conversión a registro
//!   persistible.
//! - `config`: `AppConfig` desde `.env` / entorno.
//! - `errors`: `AppError` para lo que rodea al pipeline (CLI, almacén).
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod pipeline;
pub mod result;

pub use config::AppConfig;
pub use errors::AppError;
pub use pipeline::{DockingAnalysisPipeline, PipelineOptions};
pub use result::AnalysisResult;
