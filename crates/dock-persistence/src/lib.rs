//! dock-persistence
//!
//! Almacenamiento del historial de análisis. El core no lee ni escribe aquí:
//! el orquestador entrega un `AnalysisRecord` inmutable al final del run.
//!
//! Módulos:
//! - `config`: carga de configuración desde `.env` / entorno.
//! - `record`: documento por run, entrada de índice, filtros y estadísticas.
//! - `store`: trait `AnalysisStore` + backend en memoria.
//! - `json`: `JsonFileStore`, un JSON por run más `index.json`.

pub mod config;
pub mod error;
pub mod json;
pub mod record;
pub mod store;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use json::JsonFileStore;
pub use record::{AnalysisRecord, AttestationSummary, IndexEntry, ListQuery, MetadataUpdate, StoreStatistics, TopCandidate};
pub use store::{AnalysisStore, InMemoryAnalysisStore};
