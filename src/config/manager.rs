//! Settings file and what is built from it: the registered models and the
//! locale context handed to every read and write.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use super::{
    ConfigError,
    I18nSettings,
    LocaleContext,
};
use crate::model::TranslatedModel;

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".record-i18n.json";

/// Validated settings plus the models they register.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Validated settings
    settings: I18nSettings,
    /// Model name → registered model
    models: HashMap<String, Arc<TranslatedModel>>,
}

impl ConfigManager {
    /// Validates `settings` and registers every model listed under `models`.
    ///
    /// Each model gets accessors for all `availableLocales`.
    pub fn from_settings(settings: I18nSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let models: HashMap<String, Arc<TranslatedModel>> = settings
            .models
            .iter()
            .map(|(name, attributes)| {
                let attributes = attributes.iter().map(String::as_str);
                let model = TranslatedModel::from_settings(name, attributes, &settings);
                (name.clone(), Arc::new(model))
            })
            .collect();
        tracing::debug!(
            default_locale = %settings.default_locale,
            models = models.len(),
            "Registered models"
        );

        Ok(Self { settings, models })
    }

    /// `dir` にある `.record-i18n.json` を読み込む
    ///
    /// ファイルがなければデフォルト設定（モデルなし）になります。
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);

        let settings = match std::fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("Loading configuration from: {:?}", path);
                serde_json::from_str(&content)?
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("Configuration file not found: {:?}", path);
                I18nSettings::default()
            }
            Err(error) => return Err(error.into()),
        };

        Self::from_settings(settings)
    }

    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }

    /// Registered model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<Arc<TranslatedModel>> {
        self.models.get(name).cloned()
    }

    /// Locale context at `locale`, or at the default locale when `None`.
    #[must_use]
    pub fn context(&self, locale: Option<&str>) -> LocaleContext {
        let ctx = LocaleContext::from_settings(&self.settings);
        match locale {
            Some(locale) => ctx.with_locale(locale),
            None => ctx,
        }
    }
}
