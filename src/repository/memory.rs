//! In-memory store for owning records and translation rows.
//!
//! Validation mirrors what a relational store would enforce: a translation
//! row needs an existing owner and a non-blank locale, and the locale is
//! unique per owner. The whole store can be written to and read from a JSON
//! file.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    RecordStore,
    RepositoryError,
    TranslationRepository,
    ValidationErrors,
};
use crate::translation::TranslationRecord;
use crate::types::{
    RecordId,
    TranslationId,
};

/// Rows of one model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Table {
    /// Last id handed out to an owning record
    last_record_id: u64,
    /// Last id handed out to a translation row
    last_translation_id: u64,
    /// Ids of the owning records that exist
    records: BTreeSet<RecordId>,
    /// Translation rows in insertion order
    translations: Vec<TranslationRecord>,
}

impl Table {
    /// Checks owner presence, locale presence and locale uniqueness per owner.
    fn validate(&self, record: &TranslationRecord) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match record.owner_id {
            Some(owner) if self.records.contains(&owner) => {}
            _ => errors.add("owner", "must exist"),
        }

        if record.locale.is_blank() {
            errors.add("locale", "can't be blank");
        } else if self.translations.iter().any(|existing| {
            existing.owner_id == record.owner_id
                && existing.locale == record.locale
                && existing.id != record.id
        }) {
            errors.add("locale", "has already been taken");
        }

        errors.into_result()
    }
}

/// Store kept entirely in memory, one table per model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    /// Model name → table
    #[serde(default)]
    tables: BTreeMap<String, Table>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a store from a JSON file. A missing file yields an empty store.
    pub async fn open(path: &Path) -> Result<Self, RepositoryError> {
        if !tokio::fs::try_exists(path).await? {
            tracing::debug!("Store file not found, starting empty: {:?}", path);
            return Ok(Self::new());
        }

        tracing::debug!("Loading store from: {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the whole store to a JSON file.
    pub async fn write_to(&self, path: &Path) -> Result<(), RepositoryError> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        tracing::debug!("Store written to: {:?}", path);
        Ok(())
    }

    /// Number of owning records of `model`.
    #[must_use]
    pub fn record_count(&self, model: &str) -> usize {
        self.tables.get(model).map_or(0, |table| table.records.len())
    }

    /// Number of translation rows of `model`.
    #[must_use]
    pub fn translation_count(&self, model: &str) -> usize {
        self.tables.get(model).map_or(0, |table| table.translations.len())
    }

    /// Table of `model`, created on first use.
    fn table_mut(&mut self, model: &str) -> &mut Table {
        self.tables.entry(model.to_string()).or_default()
    }
}

impl RecordStore for MemoryStore {
    async fn save_record(
        &mut self,
        model: &str,
        id: Option<RecordId>,
    ) -> Result<RecordId, RepositoryError> {
        let table = self.table_mut(model);

        match id {
            Some(id) if table.records.contains(&id) => Ok(id),
            Some(id) => Err(RepositoryError::NotFound { model: model.to_string(), id }),
            None => {
                table.last_record_id += 1;
                let id = RecordId(table.last_record_id);
                table.records.insert(id);
                tracing::debug!(model, %id, "Inserted record");
                Ok(id)
            }
        }
    }

    async fn destroy_record(&mut self, model: &str, id: RecordId) -> Result<(), RepositoryError> {
        if self.table_mut(model).records.remove(&id) {
            tracing::debug!(model, %id, "Destroyed record");
            Ok(())
        } else {
            Err(RepositoryError::NotFound { model: model.to_string(), id })
        }
    }

    async fn record_exists(&self, model: &str, id: RecordId) -> Result<bool, RepositoryError> {
        Ok(self.tables.get(model).is_some_and(|table| table.records.contains(&id)))
    }
}

impl TranslationRepository for MemoryStore {
    async fn load_translations(
        &self,
        model: &str,
        owner: RecordId,
    ) -> Result<Vec<TranslationRecord>, RepositoryError> {
        let mut rows: Vec<TranslationRecord> = self
            .tables
            .get(model)
            .map(|table| {
                table
                    .translations
                    .iter()
                    .filter(|row| row.owner_id == Some(owner))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn persist(
        &mut self,
        model: &str,
        mut record: TranslationRecord,
    ) -> Result<TranslationRecord, RepositoryError> {
        let table = self.table_mut(model);
        table.validate(&record)?;

        if let Some(id) = record.id {
            let existing = table
                .translations
                .iter_mut()
                .find(|row| row.id == Some(id))
                .ok_or_else(|| RepositoryError::TranslationNotFound {
                    model: model.to_string(),
                    id,
                })?;
            existing.clone_from(&record);
            tracing::debug!(model, %id, locale = %record.locale, "Updated translation");
        } else {
            table.last_translation_id += 1;
            let id = TranslationId(table.last_translation_id);
            record.id = Some(id);
            table.translations.push(record.clone());
            tracing::debug!(model, %id, locale = %record.locale, "Inserted translation");
        }

        Ok(record)
    }

    async fn delete_all(&mut self, model: &str, owner: RecordId) -> Result<usize, RepositoryError> {
        let table = self.table_mut(model);
        let before = table.translations.len();
        table.translations.retain(|row| row.owner_id != Some(owner));
        let removed = before - table.translations.len();

        tracing::debug!(model, %owner, removed, "Deleted translations");
        Ok(removed)
    }
}
