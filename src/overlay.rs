//! 未保存の翻訳書き込みを保持するオーバーレイ
//!
//! ロケール → 属性 → 値 のマッピングをメモリ上にのみ保持します。
//! 永続化は `record::sync` が担当し、成功後に `clear` されます。
//!
//! ロケールは最初に書き込まれた順に並びます。フラッシュはこの順で行を作るため、
//! 最後に書き込まれたロケールの行が最新の行になります。

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::types::Locale;

/// 属性名 → 値
pub type PendingAttributes = BTreeMap<String, String>;

/// レコード単位の未保存書き込みバッファ
///
/// 値の検証は行いません。空文字列も「設定済み」の値として扱います。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    /// ロケール → 未保存の属性値（書き込み順）
    pending: IndexMap<Locale, PendingAttributes>,
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `(locale, attribute)` に値を設定する（既存の未保存値は上書き）
    pub fn set(&mut self, locale: &Locale, attribute: &str, value: impl Into<String>) {
        self.pending
            .entry(locale.clone())
            .or_default()
            .insert(attribute.to_string(), value.into());
    }

    /// `(locale, attribute)` の未保存値を取得する
    ///
    /// 設定されていない場合は `None`。`Some("")` は空文字列が設定済みであることを示します。
    #[must_use]
    pub fn get(&self, locale: &str, attribute: &str) -> Option<&str> {
        self.pending.get(locale)?.get(attribute).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.values().all(BTreeMap::is_empty)
    }

    /// 未保存の `(locale, attribute)` の総数
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.values().map(BTreeMap::len).sum()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// 最初に書き込まれた順にロケールを走査する
    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &PendingAttributes)> {
        self.pending.iter().filter(|(_, attributes)| !attributes.is_empty())
    }
}
