//! Translation rows and the per-record set of loaded rows.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::{
    Locale,
    RecordId,
    TranslationId,
};

/// One locale's worth of attribute values for one owning record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// `None` until the repository persists the row.
    pub id: Option<TranslationId>,

    /// Owning record. `None` when the owner was never saved.
    pub owner_id: Option<RecordId>,

    pub locale: Locale,

    /// Attribute name → value. A missing key means the attribute is unset.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl TranslationRecord {
    /// Creates an unsaved row bound to `owner_id` and `locale`.
    #[must_use]
    pub fn new(owner_id: Option<RecordId>, locale: Locale) -> Self {
        Self { id: None, owner_id, locale, attributes: BTreeMap::new() }
    }

    /// Sets an attribute (builder style).
    #[must_use]
    pub fn with_attribute(
        mut self,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Merges `attributes` into this row: written keys win, the rest stay.
    pub fn merge(&mut self, attributes: &BTreeMap<String, String>) {
        for (attribute, value) in attributes {
            self.attributes.insert(attribute.clone(), value.clone());
        }
    }
}

/// Translation rows already associated with an owning record.
///
/// Rows are kept most recent first, which is the order the last-resort
/// fallback relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSet {
    rows: Vec<TranslationRecord>,
}

impl TranslationSet {
    /// Wraps rows that are already ordered most recent first.
    #[must_use]
    pub const fn new(rows: Vec<TranslationRecord>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationRecord> {
        self.rows.iter()
    }

    /// The most recently created row.
    #[must_use]
    pub fn first(&self) -> Option<&TranslationRecord> {
        self.rows.first()
    }

    /// Row whose locale matches exactly.
    #[must_use]
    pub fn find(&self, locale: &str) -> Option<&TranslationRecord> {
        self.rows.iter().find(|row| row.locale == *locale)
    }

    /// Row whose locale matches exactly and which has `attribute` set.
    #[must_use]
    pub fn detect(&self, locale: &str, attribute: &str) -> Option<&TranslationRecord> {
        self.rows.iter().find(|row| row.locale == *locale && row.has(attribute))
    }

    /// Existing row for `locale`, or a new unsaved one bound to `owner_id`.
    #[must_use]
    pub fn find_or_initialize(
        &self,
        owner_id: Option<RecordId>,
        locale: &Locale,
    ) -> TranslationRecord {
        self.find(locale.as_str())
            .cloned()
            .unwrap_or_else(|| TranslationRecord::new(owner_id, locale.clone()))
    }

    /// Records a freshly persisted row.
    ///
    /// A row with a known id replaces its previous version in place; a new
    /// row becomes the most recent one.
    pub fn store(&mut self, row: TranslationRecord) {
        if let Some(existing) =
            self.rows.iter_mut().find(|existing| existing.id.is_some() && existing.id == row.id)
        {
            *existing = row;
        } else {
            self.rows.insert(0, row);
        }
    }
}

impl From<Vec<TranslationRecord>> for TranslationSet {
    fn from(rows: Vec<TranslationRecord>) -> Self {
        Self::new(rows)
    }
}
