//! `JsonFileStore`: un documento `<analysis_id>.json` por run más un
//! `index.json` con el resumen de todos, más reciente primero.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::StoreConfig;
use crate::error::PersistenceError;
use crate::record::{AnalysisRecord, IndexEntry, MetadataUpdate};
use crate::store::{upsert_front, validate_analysis_id, AnalysisStore};

pub const INDEX_FILENAME: &str = "index.json";

pub struct JsonFileStore {
    root: PathBuf,
    // Serializa lectura-modificación-escritura del índice entre hilos.
    write_guard: Mutex<()>,
}

impl JsonFileStore {
    /// Abre (y crea si falta) el directorio de almacenamiento.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        info!("JsonFileStore: storage dir {}", root.display());
        Ok(Self { root, write_guard: Mutex::new(()) })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, PersistenceError> {
        Self::open(config.storage_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, analysis_id: &str) -> PathBuf {
        self.root.join(format!("{analysis_id}.json"))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILENAME)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.write_guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Índice ausente o ilegible se trata como vacío.
    fn read_index(&self) -> Vec<IndexEntry> {
        let path = self.index_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(index) => index,
            Err(e) => {
                warn!("JsonFileStore: corrupt index {} ({e}); treating as empty", path.display());
                Vec::new()
            }
        }
    }

    fn write_index(&self, index: &[IndexEntry]) -> Result<(), PersistenceError> {
        write_json_atomic(&self.root, &self.index_path(), &index)
    }

    fn read_record(&self, analysis_id: &str) -> Result<AnalysisRecord, PersistenceError> {
        let path = self.record_path(analysis_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(analysis_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt { path: path.display().to_string(),
                                                                           reason: e.to_string() })
    }
}

/// Escribe en un temporal del mismo directorio y renombra encima del destino.
fn write_json_atomic<T: Serialize + ?Sized>(dir: &Path, target: &Path, value: &T) -> Result<(), PersistenceError> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.flush()?;
    tmp.persist(target).map_err(|e| PersistenceError::Io(e.error))?;
    Ok(())
}

impl AnalysisStore for JsonFileStore {
    fn save(&self, record: &AnalysisRecord) -> Result<(), PersistenceError> {
        validate_analysis_id(&record.analysis_id)?;
        let _guard = self.guard();
        write_json_atomic(&self.root, &self.record_path(&record.analysis_id), record)?;
        let mut index = self.read_index();
        upsert_front(&mut index, record.index_entry());
        self.write_index(&index)?;
        debug!("JsonFileStore: saved {} ({} entries in index)", record.analysis_id, index.len());
        Ok(())
    }

    fn get(&self, analysis_id: &str) -> Result<AnalysisRecord, PersistenceError> {
        validate_analysis_id(analysis_id)?;
        self.read_record(analysis_id)
    }

    fn delete(&self, analysis_id: &str) -> Result<bool, PersistenceError> {
        validate_analysis_id(analysis_id)?;
        let _guard = self.guard();
        let mut existed = false;
        match fs::remove_file(self.record_path(analysis_id)) {
            Ok(()) => existed = true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let mut index = self.read_index();
        let before = index.len();
        index.retain(|e| e.analysis_id != analysis_id);
        if index.len() != before {
            existed = true;
            self.write_index(&index)?;
        }
        if existed {
            info!("JsonFileStore: deleted {analysis_id}");
        }
        Ok(existed)
    }

    fn update_metadata(&self, analysis_id: &str, update: &MetadataUpdate) -> Result<bool, PersistenceError> {
        validate_analysis_id(analysis_id)?;
        let _guard = self.guard();
        let mut record = match self.read_record(analysis_id) {
            Ok(record) => record,
            Err(PersistenceError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        update.apply_to_record(&mut record);
        write_json_atomic(&self.root, &self.record_path(analysis_id), &record)?;

        let mut index = self.read_index();
        match index.iter_mut().find(|e| e.analysis_id == analysis_id) {
            Some(entry) => update.apply_to_entry(entry),
            // Registro presente pero fuera del índice: se reincorpora.
            None => upsert_front(&mut index, record.index_entry()),
        }
        self.write_index(&index)?;
        Ok(true)
    }

    fn entries(&self) -> Result<Vec<IndexEntry>, PersistenceError> {
        Ok(self.read_index())
    }
}
