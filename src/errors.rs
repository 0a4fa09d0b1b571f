//! Errores de la aplicación (configuración, almacenamiento, CLI).
//!
//! El pipeline no devuelve `Err`: sus fallos son datos dentro de
//! `AnalysisResult`. `AppError` cubre sólo lo que rodea al pipeline.

use dock_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Análisis no encontrado: {0}")]
    NotFound(String),
    #[error(transparent)]
    Persistence(PersistenceError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_variant_format() {
        let err = AppError::Config("DOCKSIGHT_TOP_N inválido".into());
        assert_eq!(err.to_string(), "Error de configuración: DOCKSIGHT_TOP_N inválido");
    }

    #[test]
    fn persistence_not_found_maps_to_not_found() {
        let err: AppError = PersistenceError::NotFound("analysis_x".into()).into();
        assert!(matches!(err, AppError::NotFound(ref id) if id == "analysis_x"));
    }

    #[test]
    fn io_variant_from() {
        let err: AppError = std::io::Error::other("falló IO").into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }
}
