//! dock-adapters: colaboradores externos del pipeline.
//!
//! El core sólo ve estos traits; cada uno devuelve `Result` tipado y el
//! orquestador decide si el error es fatal (nunca lo es para estas etapas).
//!
//! - `Visualizer` / `PlaceholderVisualizer`: referencias a imágenes de pose y
//!   gráfico comparativo.
//! - `ReportComposer` / `MarkdownReportComposer`: reporte determinista.
//! - `AttestationSubmitter` / `DryRunSubmitter`: envío del par de hashes.

pub mod attestation;
pub mod error;
pub mod report;
pub mod visualization;

pub use attestation::{AttestationOutcome, AttestationPayload, AttestationSubmitter, DryRunSubmitter};
pub use error::{AttestationError, ReportError, VisualizationError};
pub use report::{MarkdownReportComposer, ReportComposer, ReportInput, ReportMetadata};
pub use visualization::{PlaceholderVisualizer, Visualizer};
