//! Configuración de la aplicación.
//! Carga variables de entorno (.env) y construye un `AppConfig` explícito que
//! se pasa a quien lo necesite; no hay instancia global.

use std::env;
use std::path::PathBuf;

use dock_core::constants::DEFAULT_TOP_N;
use dock_persistence::{init_dotenv, StoreConfig};

use crate::errors::AppError;

pub const DEFAULT_VISUALIZATION_DIR: &str = "outputs/visualizations";
pub const DEFAULT_NETWORK: &str = "devnet";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const KNOWN_NETWORKS: &[&str] = &["devnet", "testnet", "mainnet-beta", "localnet"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StoreConfig,
    pub visualization_dir: PathBuf,
    pub attestation_enabled: bool,
    /// Red donde se registran las atestaciones.
    pub network: String,
    /// Cuántos ligandos reciben imagen de pose.
    pub top_n: usize,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { storage: StoreConfig::default(),
               visualization_dir: PathBuf::from(DEFAULT_VISUALIZATION_DIR),
               attestation_enabled: true,
               network: DEFAULT_NETWORK.to_string(),
               top_n: DEFAULT_TOP_N,
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl AppConfig {
    /// Lee `.env` (una vez) y luego el entorno del proceso.
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda; valores
    /// vacíos cuentan como ausentes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let storage = get("DOCKSIGHT_STORAGE_DIR").map(|dir| StoreConfig { storage_dir: PathBuf::from(dir) })
                                                  .unwrap_or(defaults.storage);
        let visualization_dir = get("DOCKSIGHT_VISUALIZATION_DIR").map(PathBuf::from)
                                                                  .unwrap_or(defaults.visualization_dir);
        let attestation_enabled = match get("DOCKSIGHT_ENABLE_ATTESTATION") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                             AppError::Config(format!("DOCKSIGHT_ENABLE_ATTESTATION must be true/false, got '{raw}'"))
                         })?,
            None => defaults.attestation_enabled,
        };
        let top_n = match get("DOCKSIGHT_TOP_N") {
            Some(raw) => raw.parse::<usize>()
                            .map_err(|_| AppError::Config(format!("DOCKSIGHT_TOP_N must be an integer, got '{raw}'")))?,
            None => defaults.top_n,
        };
        Ok(Self { storage,
                  visualization_dir,
                  attestation_enabled,
                  network: get("SOLANA_NETWORK").unwrap_or(defaults.network),
                  top_n,
                  log_filter: get("DOCKSIGHT_LOG").unwrap_or(defaults.log_filter) })
    }

    /// Problemas semánticos de la configuración; vacío si es utilizable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.top_n == 0 {
            problems.push("DOCKSIGHT_TOP_N must be at least 1".to_string());
        }
        if !KNOWN_NETWORKS.contains(&self.network.as_str()) {
            problems.push(format!("unknown network '{}' (expected one of {})", self.network, KNOWN_NETWORKS.join(", ")));
        }
        if self.storage.storage_dir.as_os_str().is_empty() {
            problems.push("storage directory is empty".to_string());
        }
        problems
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.top_n, 5);
        assert!(cfg.attestation_enabled);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn overrides_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[("DOCKSIGHT_STORAGE_DIR", "/tmp/a"),
                                                  ("DOCKSIGHT_ENABLE_ATTESTATION", "false"),
                                                  ("SOLANA_NETWORK", "testnet"),
                                                  ("DOCKSIGHT_TOP_N", "3"),
                                                  ("DOCKSIGHT_LOG", "debug")])).unwrap();
        assert_eq!(cfg.storage.storage_dir, PathBuf::from("/tmp/a"));
        assert!(!cfg.attestation_enabled);
        assert_eq!(cfg.network, "testnet");
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn unparsable_values_are_config_errors() {
        assert!(matches!(AppConfig::from_lookup(lookup(&[("DOCKSIGHT_TOP_N", "five")])), Err(AppError::Config(_))));
        assert!(matches!(AppConfig::from_lookup(lookup(&[("DOCKSIGHT_ENABLE_ATTESTATION", "maybe")])),
                         Err(AppError::Config(_))));
    }

    #[test]
    fn validate_reports_problems() {
        let cfg = AppConfig { top_n: 0,
                              network: "moonnet".into(),
                              ..AppConfig::default() };
        let problems = cfg.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[1].contains("moonnet"));
    }
}
