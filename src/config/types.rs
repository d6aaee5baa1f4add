use std::collections::{
    BTreeMap,
    HashSet,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "availableLocales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Process-wide default locale, the last step of the default-locale lookup.
    pub default_locale: String,

    /// Known locales, in display order.
    ///
    /// Drives the per-locale accessor names (`title_en`, `title_de`, ...) and
    /// the entries returned by `all_translations`.
    pub available_locales: Vec<String>,

    /// Model name → translated attribute names.
    pub models: BTreeMap<String, Vec<String>>,
}

impl I18nSettings {
    /// # Errors
    /// - Default locale is empty
    /// - No available locales, or an empty/duplicated one
    /// - Empty model or attribute name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The default locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.available_locales.is_empty() {
            errors.push(ValidationError::new(
                "availableLocales",
                "At least one locale is required. Example: [\"en\", \"de\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.available_locales.iter().enumerate() {
            if locale.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("availableLocales[{index}]"),
                    "The locale cannot be empty",
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("availableLocales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        for (model, attributes) in &self.models {
            if model.trim().is_empty() {
                errors.push(ValidationError::new("models", "The model name cannot be empty"));
            }
            for (index, attribute) in attributes.iter().enumerate() {
                if attribute.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("models.{model}[{index}]"),
                        "The attribute name cannot be empty",
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            available_locales: vec!["en".to_string()],
            models: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"availableLocales": ["en", "de", "it"]}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.default_locale, eq("en"));
        assert_that!(settings.available_locales, elements_are![eq("en"), eq("de"), eq("it")]);
        assert_that!(settings.models.is_empty(), eq(true));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: I18nSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings, I18nSettings::default());
    }

    #[rstest]
    fn deserialize_models() {
        let json = r#"{"models": {"post": ["title", "text"]}}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_eq!(
            settings.models.get("post"),
            Some(&vec!["title".to_string(), "text".to_string()])
        );
    }

    #[rstest]
    fn validate_invalid_default_locale_empty() {
        let settings = I18nSettings { default_locale: String::new(), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLocale")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_available_locales_empty() {
        let settings = I18nSettings { available_locales: vec![], ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("availableLocales")),
                field!(ValidationError.message, contains_substring("At least one locale"))
            ]])
        );
    }

    #[rstest]
    #[case::blank(vec!["en", " "], "availableLocales[1]", "cannot be empty")]
    #[case::duplicate(vec!["en", "de", "en"], "availableLocales[2]", "Duplicate locale 'en'")]
    fn validate_invalid_available_locale_entry(
        #[case] locales: Vec<&str>,
        #[case] field_path: &str,
        #[case] message: &str,
    ) {
        let settings = I18nSettings {
            available_locales: locales.into_iter().map(ToString::to_string).collect(),
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_attribute_name() {
        let settings = I18nSettings {
            models: BTreeMap::from([(
                "post".to_string(),
                vec!["title".to_string(), String::new()],
            )]),
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("models.post[1]"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            default_locale: String::new(),
            available_locales: vec![],
            ..I18nSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. defaultLocale"));
        assert_that!(error_message, contains_substring("2. availableLocales"));
        assert_that!(error_message, contains_substring("At least one locale"));
    }
}
