//! Two-phase save: the owning record first, then the overlay flush.

use thiserror::Error;

use super::TranslatedRecord;
use crate::repository::{
    RecordStore,
    RepositoryError,
    TranslationRepository,
    ValidationErrors,
};
use crate::types::{
    Locale,
    RecordId,
};

#[derive(Error, Debug)]
pub enum SaveError {
    /// The owning record itself could not be saved. Nothing was flushed.
    #[error("Failed to save record: {0}")]
    Primary(#[source] RepositoryError),

    /// The owning record was saved but a translation row was rejected.
    ///
    /// The overlay is kept, so saving again retries the pending writes.
    #[error("Failed to save '{locale}' translation: {source}")]
    Flush {
        locale: Locale,
        #[source]
        source: RepositoryError,
    },
}

impl SaveError {
    /// Validation details of the underlying repository error, if any.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Primary(source) | Self::Flush { source, .. } => source.validation(),
        }
    }
}

impl TranslatedRecord {
    /// Saves the owning record, then flushes the overlay into translation rows.
    ///
    /// Either phase failing fails the whole save. A flush failure leaves the
    /// owning record committed and the overlay pending.
    pub async fn save<S>(&mut self, store: &mut S) -> Result<RecordId, SaveError>
    where
        S: RecordStore + TranslationRepository + Send,
    {
        let id =
            store.save_record(self.model.name(), self.id).await.map_err(SaveError::Primary)?;
        if self.id.is_none() {
            tracing::debug!(model = self.model.name(), record = %id, "Created record");
        }
        self.id = Some(id);

        self.flush(store).await?;
        Ok(id)
    }

    /// Merges every pending locale into its translation row and persists it.
    ///
    /// Returns the number of rows written. An empty overlay touches nothing.
    /// The overlay is cleared only after every row was persisted.
    pub async fn flush<R>(&mut self, repository: &mut R) -> Result<usize, SaveError>
    where
        R: TranslationRepository + Send,
    {
        if self.overlay.is_empty() {
            tracing::debug!(model = self.model.name(), "Nothing to flush");
            return Ok(0);
        }

        let mut written = 0;
        for (locale, attributes) in self.overlay.iter() {
            let mut row = self.translations.find_or_initialize(self.id, locale);
            row.merge(attributes);

            match repository.persist(self.model.name(), row).await {
                Ok(saved) => {
                    tracing::debug!(
                        model = self.model.name(),
                        %locale,
                        attributes = attributes.len(),
                        "Flushed translation"
                    );
                    self.translations.store(saved);
                    written += 1;
                }
                Err(source) => {
                    tracing::warn!(
                        model = self.model.name(),
                        %locale,
                        error = %source,
                        "Flush aborted, keeping pending writes"
                    );
                    return Err(SaveError::Flush { locale: locale.clone(), source });
                }
            }
        }

        self.overlay.clear();
        Ok(written)
    }

    /// Destroys the owning record together with all of its translation rows.
    ///
    /// A record that was never saved has nothing to destroy.
    pub async fn destroy<S>(self, store: &mut S) -> Result<usize, RepositoryError>
    where
        S: RecordStore + TranslationRepository + Send,
    {
        let Some(id) = self.id else {
            return Ok(0);
        };

        let removed = store.delete_all(self.model.name(), id).await?;
        store.destroy_record(self.model.name(), id).await?;
        tracing::debug!(model = self.model.name(), record = %id, removed, "Destroyed record");

        Ok(removed)
    }
}
