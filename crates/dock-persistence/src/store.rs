//! Trait `AnalysisStore` y backend en memoria.

use std::sync::Mutex;

use crate::error::PersistenceError;
use crate::record::{distinct_projects, distinct_tags, AnalysisRecord, IndexEntry, ListQuery, MetadataUpdate, StoreStatistics};

/// Almacén de runs terminados. Las escrituras se serializan dentro de cada
/// implementación, por eso todos los métodos toman `&self`.
pub trait AnalysisStore {
    /// Guarda el registro y lo pone al frente del índice (reemplaza si ya
    /// existía uno con el mismo id).
    fn save(&self, record: &AnalysisRecord) -> Result<(), PersistenceError>;
    fn get(&self, analysis_id: &str) -> Result<AnalysisRecord, PersistenceError>;
    /// Devuelve `false` si el id no existía.
    fn delete(&self, analysis_id: &str) -> Result<bool, PersistenceError>;
    fn update_metadata(&self, analysis_id: &str, update: &MetadataUpdate) -> Result<bool, PersistenceError>;
    /// Índice completo, más reciente primero.
    fn entries(&self) -> Result<Vec<IndexEntry>, PersistenceError>;

    fn list(&self, query: &ListQuery) -> Result<Vec<IndexEntry>, PersistenceError> {
        Ok(query.select(&self.entries()?))
    }

    fn all_tags(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(distinct_tags(&self.entries()?))
    }

    fn all_projects(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(distinct_projects(&self.entries()?))
    }

    fn statistics(&self) -> Result<StoreStatistics, PersistenceError> {
        Ok(StoreStatistics::from_entries(&self.entries()?))
    }
}

/// Ids válidos: no vacíos, sin separadores de ruta ni `..`.
pub fn validate_analysis_id(analysis_id: &str) -> Result<(), PersistenceError> {
    let bad = analysis_id.is_empty()
              || analysis_id.contains(['/', '\\'])
              || analysis_id.contains("..")
              || analysis_id.chars().any(char::is_control);
    if bad {
        return Err(PersistenceError::InvalidId(analysis_id.to_string()));
    }
    Ok(())
}

/// Inserta `entry` al frente, quitando cualquier entrada previa con el mismo id.
pub(crate) fn upsert_front(index: &mut Vec<IndexEntry>, entry: IndexEntry) {
    index.retain(|e| e.analysis_id != entry.analysis_id);
    index.insert(0, entry);
}

/// Backend en memoria para tests y para `--no-save`.
#[derive(Default)]
pub struct InMemoryAnalysisStore {
    inner: Mutex<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    records: Vec<AnalysisRecord>,
    index: Vec<IndexEntry>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        // Un panic en otro hilo no deja el estado a medio escribir.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AnalysisStore for InMemoryAnalysisStore {
    fn save(&self, record: &AnalysisRecord) -> Result<(), PersistenceError> {
        validate_analysis_id(&record.analysis_id)?;
        let mut state = self.lock();
        state.records.retain(|r| r.analysis_id != record.analysis_id);
        state.records.push(record.clone());
        upsert_front(&mut state.index, record.index_entry());
        Ok(())
    }

    fn get(&self, analysis_id: &str) -> Result<AnalysisRecord, PersistenceError> {
        self.lock()
            .records
            .iter()
            .find(|r| r.analysis_id == analysis_id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(analysis_id.to_string()))
    }

    fn delete(&self, analysis_id: &str) -> Result<bool, PersistenceError> {
        let mut state = self.lock();
        let before = state.index.len();
        state.records.retain(|r| r.analysis_id != analysis_id);
        state.index.retain(|e| e.analysis_id != analysis_id);
        Ok(state.index.len() != before)
    }

    fn update_metadata(&self, analysis_id: &str, update: &MetadataUpdate) -> Result<bool, PersistenceError> {
        let mut state = self.lock();
        let Some(entry) = state.index.iter_mut().find(|e| e.analysis_id == analysis_id) else {
            return Ok(false);
        };
        update.apply_to_entry(entry);
        if let Some(record) = state.records.iter_mut().find(|r| r.analysis_id == analysis_id) {
            update.apply_to_record(record);
        }
        Ok(true)
    }

    fn entries(&self) -> Result<Vec<IndexEntry>, PersistenceError> {
        Ok(self.lock().index.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_ids() {
        for id in ["", "../x", "a/b", "a\\b", "a..b"] {
            assert!(matches!(validate_analysis_id(id), Err(PersistenceError::InvalidId(_))), "{id:?}");
        }
        assert!(validate_analysis_id("analysis_20250101_120000_3ligands_abcd1234").is_ok());
    }
}
