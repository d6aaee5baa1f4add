//! Repository error types.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{
    RecordId,
    TranslationId,
};

/// Field-level validation failures reported when persisting a row.
///
/// Field → reasons, e.g. `locale` → `["has already been taken"]`.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", format_field_errors(.errors))]
pub struct ValidationErrors {
    /// Field → reasons
    errors: BTreeMap<String, Vec<String>>,
}

/// Formats as `"<field> <reason>; ..."`.
fn format_field_errors(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .flat_map(|(field, reasons)| reasons.iter().map(move |reason| format!("{field} {reason}")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(reason.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Reasons recorded for `field` (empty if none).
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Record {id} of model '{model}' not found")]
    NotFound { model: String, id: RecordId },

    #[error("Translation {id} of model '{model}' not found")]
    TranslationNotFound { model: String, id: TranslationId },

    #[error("Failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RepositoryError {
    /// Validation details, if this is a validation failure.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
