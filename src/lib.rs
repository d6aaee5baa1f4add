//! record-i18n
//!
//! レコード単位の翻訳属性。未保存の書き込みをオーバーレイに保持し、
//! ロケールのフォールバックチェーンで値を解決します。

pub mod cli;
pub mod config;
pub mod model;
pub mod overlay;
pub mod record;
pub mod repository;
pub mod resolver;
pub mod translation;
pub mod types;

/// テスト用ユーティリティ
mod test_utils;

pub use config::LocaleContext;
pub use model::TranslatedModel;
pub use record::{
    SaveError,
    TranslatedRecord,
};
pub use repository::{
    MemoryStore,
    RecordStore,
    TranslationRepository,
};
pub use types::{
    Locale,
    RecordId,
};
