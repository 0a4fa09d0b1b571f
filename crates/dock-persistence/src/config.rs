//! Carga de configuración de almacenamiento desde variables de entorno.
//! Usa `DOCKSIGHT_STORAGE_DIR` (por defecto `outputs/analyses`).

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// `.env` es opcional; se intenta una sola vez por proceso.
static DOTENV: Lazy<bool> = Lazy::new(|| dotenv().is_ok());

pub const DEFAULT_STORAGE_DIR: &str = "outputs/analyses";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR) }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        init_dotenv();
        let storage_dir = env::var("DOCKSIGHT_STORAGE_DIR").ok()
                                                           .filter(|v| !v.trim().is_empty())
                                                           .map(PathBuf::from)
                                                           .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));
        Self { storage_dir }
    }
}

/// Carga `.env` si existe. Idempotente; la CLI y `AppConfig` lo llaman antes
/// de leer el entorno.
pub fn init_dotenv() -> bool {
    *Lazy::force(&DOTENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_outputs_dir() {
        assert_eq!(StoreConfig::default().storage_dir, PathBuf::from("outputs/analyses"));
    }

    #[test]
    fn from_env_never_yields_empty_dir() {
        assert!(!StoreConfig::from_env().storage_dir.as_os_str().is_empty());
    }
}
