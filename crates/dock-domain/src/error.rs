//! Errores del dominio de docking.
//!
//! Se separan en dos familias: `InputError` (por archivo, tolerable dentro de
//! un lote) y `RankingError` (invalida la capacidad de producir un ranking).
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error asociado a un único input. Siempre incluye el identificador.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputError {
    #[error("Unsupported file format: {0}")]
    UnsupportedExtension(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Failed to parse {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("No valid poses found in {0}")]
    NoPoses(String),
}

impl InputError {
    /// Identificador del input que originó el error.
    pub fn identifier(&self) -> &str {
        match self {
            InputError::UnsupportedExtension(p) | InputError::NotFound(p) | InputError::NoPoses(p) => p,
            InputError::Unreadable { path, .. } => path,
        }
    }
}

/// Error fatal de ranking.
///
/// `NoResults` y `NoSurvivors` son distinguibles a propósito: el primero indica
/// que no llegó nada al ranker, el segundo que llegaron ligandos pero ninguno
/// tenía poses.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingError {
    #[error("No docking results to rank")]
    NoResults,
    #[error("No valid poses found for ranking ({dropped} ligand(s) dropped)")]
    NoSurvivors { dropped: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_messages_reference_identifier() {
        let errs = [InputError::UnsupportedExtension("a.txt".into()),
                    InputError::NotFound("missing.log".into()),
                    InputError::Unreadable { path: "bin.log".into(),
                                             reason: "invalid utf-8".into() },
                    InputError::NoPoses("empty.pdbqt".into())];
        for e in &errs {
            assert!(e.to_string().contains(e.identifier()), "{e}");
        }
    }

    #[test]
    fn ranking_errors_are_distinct() {
        assert_ne!(RankingError::NoResults.to_string(),
                   RankingError::NoSurvivors { dropped: 2 }.to_string());
        assert_eq!(RankingError::NoResults.to_string(), "No docking results to rank");
    }
}
