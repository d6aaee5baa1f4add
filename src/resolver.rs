//! 翻訳属性のフォールバック解決
//!
//! # 解決順序（最初に見つかったものを返す）
//! 1. オーバーレイ上の `(locale, attribute)` の未保存値
//! 2. 未保存のレコード → `None`（フォールバック先がない）
//! 3. 読み込み済みの翻訳行
//!    a. `locale` が一致し、属性が設定されている行
//!    b. デフォルトロケールが一致し、属性が設定されている行
//!    c. 最初の行（作成日時の降順）。ロケール・属性の有無は問わない
//! 4. 候補の行があればその属性値（3c の場合は `None` もありうる）

use crate::overlay::Overlay;
use crate::translation::TranslationSet;

/// どの段階で値が見つかったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// 未保存の書き込み
    Overlay,
    /// 要求ロケールの翻訳行
    Locale,
    /// デフォルトロケールの翻訳行
    DefaultLocale,
    /// 最後の手段としての最新の翻訳行
    FirstTranslation,
}

/// 解決結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// 属性値（3c の行に属性がない場合は `None`）
    pub value: Option<&'a str>,
    pub source: Source,
}

/// 1 レコード分の状態に対するフォールバック解決
#[derive(Debug, Clone, Copy)]
pub struct FallbackResolver<'a> {
    /// 未保存の書き込み
    overlay: &'a Overlay,
    /// 読み込み済みの翻訳行
    translations: &'a TranslationSet,
    /// レコードが永続化済みかどうか
    persisted: bool,
}

impl<'a> FallbackResolver<'a> {
    #[must_use]
    pub const fn new(
        overlay: &'a Overlay,
        translations: &'a TranslationSet,
        persisted: bool,
    ) -> Self {
        Self { overlay, translations, persisted }
    }

    /// `locale` での `attribute` の値をフォールバックチェーンに沿って解決する
    #[must_use]
    pub fn resolve(&self, attribute: &str, locale: &str, default_locale: &str) -> Option<&'a str> {
        self.resolve_with_source(attribute, locale, default_locale)
            .and_then(|resolved| resolved.value)
    }

    /// `resolve` と同じ解決を行い、値の出どころも返す
    ///
    /// 候補が一つも見つからない場合は `None`。
    #[must_use]
    pub fn resolve_with_source(
        &self,
        attribute: &str,
        locale: &str,
        default_locale: &str,
    ) -> Option<Resolved<'a>> {
        if let Some(value) = self.overlay.get(locale, attribute) {
            return Some(Resolved { value: Some(value), source: Source::Overlay });
        }

        if !self.persisted {
            return None;
        }

        let (row, source) = self
            .translations
            .detect(locale, attribute)
            .map(|row| (row, Source::Locale))
            .or_else(|| {
                self.translations
                    .detect(default_locale, attribute)
                    .map(|row| (row, Source::DefaultLocale))
            })
            .or_else(|| self.translations.first().map(|row| (row, Source::FirstTranslation)))?;

        tracing::trace!(
            attribute,
            locale,
            row_locale = %row.locale,
            ?source,
            "Resolved from translation row"
        );

        Some(Resolved { value: row.get(attribute), source })
    }

    /// ロケール固定の解決（`title_it` などのアクセサ用）
    ///
    /// オーバーレイの次は `locale` と完全一致する行だけを見ます。
    /// デフォルトロケールや最初の行へのフォールバックは行いません。
    #[must_use]
    pub fn resolve_pinned(&self, attribute: &str, locale: &str) -> Option<&'a str> {
        if let Some(value) = self.overlay.get(locale, attribute) {
            return Some(value);
        }

        if !self.persisted {
            return None;
        }

        self.translations.find(locale).and_then(|row| row.get(attribute))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::persisted_translation;
    use crate::types::Locale;

    /// sv（最新・属性なし）, de（title あり）, en（title と text あり）
    #[fixture]
    fn translations() -> TranslationSet {
        TranslationSet::new(vec![
            persisted_translation(3, "sv", &[]),
            persisted_translation(2, "de", &[("title", "Deutscher Titel")]),
            persisted_translation(1, "en", &[("title", "English title"), ("text", "English text")]),
        ])
    }

    #[rstest]
    fn overlay_wins_over_persisted_rows(translations: TranslationSet) {
        let mut overlay = Overlay::new();
        overlay.set(&Locale::from("de"), "title", "Neuer Titel");
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        let resolved = resolver.resolve_with_source("title", "de", "en").unwrap();

        assert_that!(resolved.value, some(eq("Neuer Titel")));
        assert_that!(resolved.source, eq(Source::Overlay));
    }

    #[rstest]
    fn new_record_without_pending_value_is_absent(translations: TranslationSet) {
        let overlay = Overlay::new();
        let resolver = FallbackResolver::new(&overlay, &translations, false);

        assert_that!(resolver.resolve("title", "en", "en"), none());
        assert_that!(resolver.resolve_pinned("title", "en"), none());
    }

    #[rstest]
    #[case::exact_locale("de", "en", "title", Some("Deutscher Titel"), Source::Locale)]
    #[case::attribute_missing("de", "en", "text", Some("English text"), Source::DefaultLocale)]
    #[case::locale_missing("fr", "en", "title", Some("English title"), Source::DefaultLocale)]
    #[case::first_row_without_attribute("fr", "it", "title", None, Source::FirstTranslation)]
    #[case::default_row_needs_attribute("fr", "sv", "text", None, Source::FirstTranslation)]
    fn persisted_fallback_chain(
        translations: TranslationSet,
        #[case] locale: &str,
        #[case] default_locale: &str,
        #[case] attribute: &str,
        #[case] expected: Option<&str>,
        #[case] expected_source: Source,
    ) {
        let overlay = Overlay::new();
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        let resolved = resolver.resolve_with_source(attribute, locale, default_locale).unwrap();

        assert_that!(resolved.value, eq(expected));
        assert_that!(resolved.source, eq(expected_source));
    }

    #[rstest]
    fn single_row_is_last_resort() {
        let translations =
            TranslationSet::new(vec![persisted_translation(1, "sv", &[("title", "Svensk titel")])]);
        let overlay = Overlay::new();
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        assert_that!(resolver.resolve("title", "de", "en"), some(eq("Svensk titel")));
    }

    #[rstest]
    fn persisted_record_without_rows_is_absent() {
        let translations = TranslationSet::default();
        let overlay = Overlay::new();
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        assert_that!(resolver.resolve_with_source("title", "en", "en"), none());
    }

    #[rstest]
    fn pinned_reads_only_the_exact_locale(translations: TranslationSet) {
        let overlay = Overlay::new();
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        assert_that!(resolver.resolve_pinned("title", "de"), some(eq("Deutscher Titel")));
        assert_that!(resolver.resolve_pinned("text", "de"), none());
        assert_that!(resolver.resolve_pinned("title", "it"), none());
    }

    #[rstest]
    fn pinned_reads_consult_overlay(translations: TranslationSet) {
        let mut overlay = Overlay::new();
        overlay.set(&Locale::from("it"), "title", "Titolo italiano");
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        assert_that!(resolver.resolve_pinned("title", "it"), some(eq("Titolo italiano")));
    }

    #[rstest]
    fn overlay_of_other_locale_does_not_leak(translations: TranslationSet) {
        let mut overlay = Overlay::new();
        overlay.set(&Locale::from("sv"), "title", "Svensk titel");
        let resolver = FallbackResolver::new(&overlay, &translations, true);

        assert_that!(resolver.resolve("title", "en", "en"), some(eq("English title")));
    }
}
