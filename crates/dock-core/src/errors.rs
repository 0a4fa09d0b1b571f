//! Errores de estado del pipeline.
//!
//! `transition` nunca devuelve estos errores (sólo `bool`); los devuelven
//! `try_transition` y los setters con guarda de `AnalysisRun`.
use thiserror::Error;

use crate::stage::Stage;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StateError {
    #[error("invalid state transition: {from} -> {to}")]
    IllegalTransition { from: Stage, to: Stage },
    #[error("{operation} is not allowed in stage {actual} (requires {expected})")]
    StageMismatch {
        operation: &'static str,
        expected: Stage,
        actual: Stage,
    },
    #[error("{0} already written for this run")]
    AlreadyWritten(&'static str),
}
