//! 読み書き時に渡すロケールコンテキスト

use super::I18nSettings;
use crate::types::Locale;

/// 現在のロケールとプロセス全体のロケール設定
///
/// グローバル状態を持たず、読み書きのたびに呼び出し側から渡します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    /// 現在の（アンビエント）ロケール
    pub locale: Locale,
    /// プロセス全体のデフォルトロケール
    pub default_locale: Locale,
    /// 既知のロケール（設定順）
    pub available_locales: Vec<Locale>,
}

impl LocaleContext {
    /// デフォルトロケールを現在のロケールとするコンテキストを作成
    #[must_use]
    pub fn new(default_locale: impl Into<Locale>) -> Self {
        let default_locale = default_locale.into();
        Self {
            locale: default_locale.clone(),
            available_locales: vec![default_locale.clone()],
            default_locale,
        }
    }

    /// 設定からコンテキストを作成（現在のロケールはデフォルトロケール）
    #[must_use]
    pub fn from_settings(settings: &I18nSettings) -> Self {
        let default_locale = Locale::new(settings.default_locale.as_str());
        Self {
            locale: default_locale.clone(),
            default_locale,
            available_locales: settings
                .available_locales
                .iter()
                .map(|code| Locale::new(code.as_str()))
                .collect(),
        }
    }

    /// 現在のロケールを差し替えたコンテキストを返す（ビルダーパターン風）
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    /// 既知のロケールを差し替えたコンテキストを返す（ビルダーパターン風）
    #[must_use]
    pub fn with_available_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locale>,
    {
        self.available_locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// 現在のロケールを切り替える
    pub fn set_locale(&mut self, locale: impl Into<Locale>) {
        self.locale = locale.into();
    }
}
