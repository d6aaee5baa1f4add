//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::sync::Arc;

use crate::model::TranslatedModel;
use crate::translation::TranslationRecord;
use crate::types::{
    Locale,
    RecordId,
    TranslationId,
};

/// テスト用の永続化済み翻訳行を作成する
///
/// # Arguments
/// * `id` - 翻訳行の ID（大きいほど新しい）
/// * `locale` - ロケール（例: "en", "de"）
/// * `attributes` - 属性名と値の組
pub(crate) fn persisted_translation(
    id: u64,
    locale: &str,
    attributes: &[(&str, &str)],
) -> TranslationRecord {
    let mut row = TranslationRecord::new(Some(RecordId(1)), Locale::from(locale));
    row.id = Some(TranslationId(id));
    for (attribute, value) in attributes {
        row.attributes.insert((*attribute).to_string(), (*value).to_string());
    }
    row
}

/// `title` と `text` を翻訳属性に持つ `post` モデルを作成する
///
/// ロケールは `en`, `de`, `it`, `sv`。
pub(crate) fn post_model() -> Arc<TranslatedModel> {
    Arc::new(TranslatedModel::new(
        "post",
        ["title", "text"],
        &[Locale::from("en"), Locale::from("de"), Locale::from("it"), Locale::from("sv")],
    ))
}
