//! Persistence collaborators for owning records and their translation rows.
//!
//! The core never talks to storage directly: it loads rows once, buffers
//! writes in memory and hands rows back through these traits at save time.

/// Repository error types
mod error;
/// In-memory store with JSON snapshots
pub mod memory;

use std::future::Future;

pub use error::{
    RepositoryError,
    ValidationErrors,
};
pub use memory::MemoryStore;

use crate::translation::TranslationRecord;
use crate::types::RecordId;

/// Primary persistence of the owning record itself.
pub trait RecordStore {
    /// Saves the owning record, inserting it when `id` is `None`.
    ///
    /// Returns the record's id.
    fn save_record(
        &mut self,
        model: &str,
        id: Option<RecordId>,
    ) -> impl Future<Output = Result<RecordId, RepositoryError>> + Send;

    /// Removes the owning record.
    fn destroy_record(
        &mut self,
        model: &str,
        id: RecordId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn record_exists(
        &self,
        model: &str,
        id: RecordId,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Loads and persists the translation rows of owning records.
pub trait TranslationRepository {
    /// Rows of `owner`, most recently created first.
    fn load_translations(
        &self,
        model: &str,
        owner: RecordId,
    ) -> impl Future<Output = Result<Vec<TranslationRecord>, RepositoryError>> + Send;

    /// Inserts or updates `record` after validating it.
    ///
    /// Validation covers the owner reference, a non-blank locale and locale
    /// uniqueness per owner; failures come back as
    /// [`RepositoryError::Validation`]. Returns the row as stored.
    fn persist(
        &mut self,
        model: &str,
        record: TranslationRecord,
    ) -> impl Future<Output = Result<TranslationRecord, RepositoryError>> + Send;

    /// Removes every row of `owner`. Returns the number removed.
    fn delete_all(
        &mut self,
        model: &str,
        owner: RecordId,
    ) -> impl Future<Output = Result<usize, RepositoryError>> + Send;
}
