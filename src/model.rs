//! Registration of a translated model: its attributes, locales and accessor names.

use std::collections::HashMap;
use std::sync::{
    PoisonError,
    RwLock,
};

use thiserror::Error;

use crate::config::I18nSettings;
use crate::types::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessorError {
    #[error("Unknown translated accessor '{name}' on model '{model}'")]
    UnknownAccessor { model: String, name: String },
}

/// What a named accessor such as `title` or `title_it` refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub attribute: String,
    /// `None` reads/writes at the ambient locale.
    pub locale: Option<Locale>,
}

/// Type-level description of a model with translated attributes.
///
/// Shared between every record of the model (usually behind an `Arc`). The
/// model-level default locale may be installed or removed at any time and
/// is read again on every lookup.
#[derive(Debug)]
pub struct TranslatedModel {
    /// Model name, also the repository table name
    name: String,
    /// Translated attribute names in registration order
    attributes: Vec<String>,
    /// Locales the per-locale accessors were built for
    locales: Vec<Locale>,
    /// Model-level default locale override
    default_locale: RwLock<Option<Locale>>,
    /// Accessor name → attribute and pinned locale
    accessors: HashMap<String, Accessor>,
}

impl TranslatedModel {
    /// Registers `attributes` for `name` and builds the accessor table for
    /// `locales` (`title`, `title_en`, `title_de`, ...).
    #[must_use]
    pub fn new<A, S>(name: impl Into<String>, attributes: A, locales: &[Locale]) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        let accessors = build_accessors(&name, &attributes, locales);

        Self {
            name,
            attributes,
            locales: locales.to_vec(),
            default_locale: RwLock::new(None),
            accessors,
        }
    }

    /// Registers a model using the locales from `settings`.
    #[must_use]
    pub fn from_settings<A, S>(
        name: impl Into<String>,
        attributes: A,
        settings: &I18nSettings,
    ) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: Vec<Locale> =
            settings.available_locales.iter().map(|code| Locale::new(code.as_str())).collect();
        Self::new(name, attributes, &locales)
    }

    /// Sets the model-level default locale (builder style).
    #[must_use]
    pub fn with_default_locale(self, locale: impl Into<Locale>) -> Self {
        self.set_default_locale(Some(locale.into()));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[must_use]
    pub fn is_translated(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|known| known == attribute)
    }

    /// Model-level default locale override, if installed.
    #[must_use]
    pub fn default_locale(&self) -> Option<Locale> {
        self.default_locale.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Installs (`Some`) or removes (`None`) the model-level default locale.
    pub fn set_default_locale(&self, locale: Option<Locale>) {
        tracing::debug!(model = %self.name, locale = ?locale, "Setting model default locale");
        *self.default_locale.write().unwrap_or_else(PoisonError::into_inner) = locale;
    }

    /// Looks up a named accessor (`title`, `title_it`, ...).
    pub fn accessor(&self, name: &str) -> Result<&Accessor, AccessorError> {
        self.accessors.get(name).ok_or_else(|| AccessorError::UnknownAccessor {
            model: self.name.clone(),
            name: name.to_string(),
        })
    }

    /// All accessor names, sorted.
    #[must_use]
    pub fn accessor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builds the accessor table. Plain attribute names take precedence over a
/// colliding `<attribute>_<locale>` name.
fn build_accessors(
    model: &str,
    attributes: &[String],
    locales: &[Locale],
) -> HashMap<String, Accessor> {
    let mut accessors = HashMap::new();

    for attribute in attributes {
        accessors
            .insert(attribute.clone(), Accessor { attribute: attribute.clone(), locale: None });
    }

    for attribute in attributes {
        for locale in locales {
            let name = format!("{attribute}_{locale}");
            if accessors.contains_key(&name) {
                tracing::warn!(
                    model,
                    accessor = %name,
                    "Accessor name collides with an attribute, keeping the attribute"
                );
                continue;
            }
            accessors.insert(
                name,
                Accessor { attribute: attribute.clone(), locale: Some(locale.clone()) },
            );
        }
    }

    accessors
}
