//! 翻訳属性を持つレコード（オーナー）
//!
//! 読み取りは [`FallbackResolver`] に委譲し、書き込みはオーバーレイにのみ行います。
//! 永続化は [`TranslatedRecord::save`] で行います（`sync` モジュール）。

/// 保存・フラッシュ・削除
mod sync;

use std::sync::Arc;

pub use sync::SaveError;

use crate::config::LocaleContext;
use crate::model::{
    AccessorError,
    TranslatedModel,
};
use crate::overlay::Overlay;
use crate::repository::{
    RecordStore,
    RepositoryError,
    TranslationRepository,
};
use crate::resolver::FallbackResolver;
use crate::translation::{
    TranslationRecord,
    TranslationSet,
};
use crate::types::{
    Locale,
    RecordId,
};

/// 翻訳属性を持つレコードのメモリ上の状態
///
/// オーバーレイはこのインスタンスだけのもので、スレッド間で共有しません。
#[derive(Debug, Clone)]
pub struct TranslatedRecord {
    /// 登録済みモデル
    model: Arc<TranslatedModel>,
    /// 未保存なら `None`
    id: Option<RecordId>,
    /// インスタンス単位のデフォルトロケール
    default_locale: Option<Locale>,
    /// 未保存の書き込み
    overlay: Overlay,
    /// 読み込み済みの翻訳行（新しい順）
    translations: TranslationSet,
}

impl TranslatedRecord {
    /// 未保存の新しいレコードを作成
    #[must_use]
    pub fn new(model: Arc<TranslatedModel>) -> Self {
        Self {
            model,
            id: None,
            default_locale: None,
            overlay: Overlay::new(),
            translations: TranslationSet::default(),
        }
    }

    /// 永続化済みのレコードを翻訳行とともに読み込む
    ///
    /// # Errors
    /// - レコードが存在しない場合は [`RepositoryError::NotFound`]
    pub async fn load<S>(
        model: Arc<TranslatedModel>,
        id: RecordId,
        store: &S,
    ) -> Result<Self, RepositoryError>
    where
        S: RecordStore + TranslationRepository,
    {
        if !store.record_exists(model.name(), id).await? {
            return Err(RepositoryError::NotFound { model: model.name().to_string(), id });
        }

        let rows = store.load_translations(model.name(), id).await?;
        tracing::debug!(model = model.name(), record = %id, rows = rows.len(), "Loaded record");

        Ok(Self { id: Some(id), translations: TranslationSet::new(rows), ..Self::new(model) })
    }

    /// 翻訳行を読み込み直す（オーバーレイはそのまま）
    pub async fn reload<R>(&mut self, repository: &R) -> Result<(), RepositoryError>
    where
        R: TranslationRepository,
    {
        if let Some(id) = self.id {
            let rows = repository.load_translations(self.model.name(), id).await?;
            self.translations = TranslationSet::new(rows);
        }
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// 一度も永続化されていないか
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn model(&self) -> &TranslatedModel {
        &self.model
    }

    #[must_use]
    pub const fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[must_use]
    pub const fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    /// インスタンス単位のデフォルトロケールを設定（`None` で解除）
    pub fn set_default_locale(&mut self, locale: Option<Locale>) {
        self.default_locale = locale;
    }

    /// このレコードのデフォルトロケール
    ///
    /// インスタンス → モデル → プロセス全体（`ctx`）の順。呼び出しごとに評価し直します。
    #[must_use]
    pub fn default_locale(&self, ctx: &LocaleContext) -> Locale {
        self.default_locale
            .clone()
            .or_else(|| self.model.default_locale())
            .unwrap_or_else(|| ctx.default_locale.clone())
    }

    /// 現在のロケールで属性を読む（フォールバックあり）
    #[must_use]
    pub fn get(&self, attribute: &str, ctx: &LocaleContext) -> Option<&str> {
        let default_locale = self.default_locale(ctx);
        self.resolver().resolve(attribute, ctx.locale.as_str(), default_locale.as_str())
    }

    /// ロケールを固定して属性を読む（フォールバックなし）
    #[must_use]
    pub fn get_in(&self, attribute: &str, locale: &str) -> Option<&str> {
        self.resolver().resolve_pinned(attribute, locale)
    }

    /// 型変換前の値。変換は行わないので `get` と同じ値を返す
    #[must_use]
    pub fn get_before_type_cast(&self, attribute: &str, ctx: &LocaleContext) -> Option<&str> {
        self.get(attribute, ctx)
    }

    /// 現在のロケールで属性を書く（保存まではオーバーレイのみ）
    pub fn set(&mut self, attribute: &str, value: impl Into<String>, ctx: &LocaleContext) {
        self.set_in(attribute, value, &ctx.locale);
    }

    /// ロケールを指定して属性を書く
    pub fn set_in(&mut self, attribute: &str, value: impl Into<String>, locale: &Locale) {
        if !self.model.is_translated(attribute) {
            tracing::debug!(
                model = self.model.name(),
                attribute,
                "Writing an attribute that is not registered as translated"
            );
        }
        self.overlay.set(locale, attribute, value);
    }

    /// 名前付きアクセサ（`title`, `title_it` など）で読む
    pub fn read(&self, name: &str, ctx: &LocaleContext) -> Result<Option<&str>, AccessorError> {
        let accessor = self.model.accessor(name)?;
        Ok(match &accessor.locale {
            Some(locale) => self.get_in(&accessor.attribute, locale.as_str()),
            None => self.get(&accessor.attribute, ctx),
        })
    }

    /// 名前付きアクセサ（`title`, `title_it` など）で書く
    pub fn write(
        &mut self,
        name: &str,
        value: impl Into<String>,
        ctx: &LocaleContext,
    ) -> Result<(), AccessorError> {
        let accessor = self.model.accessor(name)?.clone();
        let locale = accessor.locale.as_ref().unwrap_or(&ctx.locale);
        self.set_in(&accessor.attribute, value, locale);
        Ok(())
    }

    /// `locale` と完全一致する読み込み済みの翻訳行
    #[must_use]
    pub fn find_translation(&self, locale: &str) -> Option<&TranslationRecord> {
        self.translations.find(locale)
    }

    /// `locale` の翻訳行。なければこのレコードに紐づく未保存の行を作る
    #[must_use]
    pub fn find_or_initialize_translation(&self, locale: &Locale) -> TranslationRecord {
        self.translations.find_or_initialize(self.id, locale)
    }

    /// 既知のロケールすべてについて翻訳行を返す（ネストしたフォーム編集用）
    ///
    /// `ctx.available_locales` の順で、行がないロケールは未保存の行で埋めます。
    #[must_use]
    pub fn all_translations(&self, ctx: &LocaleContext) -> Vec<(Locale, TranslationRecord)> {
        ctx.available_locales
            .iter()
            .map(|locale| (locale.clone(), self.find_or_initialize_translation(locale)))
            .collect()
    }

    /// 現在の状態に対するリゾルバ
    fn resolver(&self) -> FallbackResolver<'_> {
        FallbackResolver::new(&self.overlay, &self.translations, !self.is_new())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::{
        persisted_translation,
        post_model,
    };

    #[fixture]
    fn ctx() -> LocaleContext {
        LocaleContext::new("en").with_available_locales(["en", "de", "it", "sv"])
    }

    /// `en` と `de` の翻訳行を持つ保存済みレコード
    #[fixture]
    fn saved_post() -> TranslatedRecord {
        TranslatedRecord {
            id: Some(RecordId(1)),
            translations: TranslationSet::new(vec![
                persisted_translation(2, "de", &[("title", "Deutscher Titel")]),
                persisted_translation(1, "en", &[("title", "English title")]),
            ]),
            ..TranslatedRecord::new(post_model())
        }
    }

    #[rstest]
    fn new_record_reads_its_own_writes(ctx: LocaleContext) {
        let mut post = TranslatedRecord::new(post_model());

        assert_that!(post.get("title", &ctx), none());
        post.set("title", "English title", &ctx);

        assert_that!(post.get("title", &ctx), some(eq("English title")));
        assert_that!(post.is_new(), eq(true));
    }

    #[rstest]
    fn unsaved_writes_are_isolated_per_locale(mut ctx: LocaleContext) {
        let mut post = TranslatedRecord::new(post_model());
        post.set("title", "English title", &ctx);

        ctx.set_locale("de");
        assert_that!(post.get("title", &ctx), none());
        post.set("title", "Deutscher Titel", &ctx);

        assert_that!(post.get("title", &ctx), some(eq("Deutscher Titel")));
        ctx.set_locale("en");
        assert_that!(post.get("title", &ctx), some(eq("English title")));
    }

    #[rstest]
    fn unsaved_write_in_other_locale_falls_back_to_default(
        saved_post: TranslatedRecord,
        ctx: LocaleContext,
    ) {
        let mut post = saved_post;
        post.set("title", "Svensk titel", &ctx.clone().with_locale("sv"));

        assert_that!(post.get("title", &ctx), some(eq("English title")));
        assert_that!(post.get("title", &ctx.clone().with_locale("it")), some(eq("English title")));
    }

    #[rstest]
    fn default_locale_precedence(saved_post: TranslatedRecord, ctx: LocaleContext) {
        let mut post = saved_post;
        assert_that!(post.default_locale(&ctx).as_str(), eq("en"));

        post.model.set_default_locale(Some(Locale::from("de")));
        assert_that!(post.default_locale(&ctx).as_str(), eq("de"));

        post.set_default_locale(Some(Locale::from("sv")));
        assert_that!(post.default_locale(&ctx).as_str(), eq("sv"));

        post.set_default_locale(None);
        post.model.set_default_locale(None);
        assert_that!(post.default_locale(&ctx).as_str(), eq("en"));
    }

    #[rstest]
    fn late_model_default_changes_fallback(saved_post: TranslatedRecord, ctx: LocaleContext) {
        let it = ctx.clone().with_locale("it");
        assert_that!(saved_post.get("title", &it), some(eq("English title")));

        saved_post.model.set_default_locale(Some(Locale::from("de")));

        assert_that!(saved_post.get("title", &it), some(eq("Deutscher Titel")));
    }

    #[rstest]
    fn named_accessors_pin_or_follow_locale(ctx: LocaleContext) {
        let mut post = TranslatedRecord::new(post_model());

        post.write("title_it", "Titolo italiano", &ctx).unwrap();
        post.write("title", "English title", &ctx).unwrap();

        assert_that!(post.read("title_it", &ctx).unwrap(), some(eq("Titolo italiano")));
        assert_that!(post.read("title_en", &ctx).unwrap(), some(eq("English title")));
        let it = ctx.with_locale("it");
        assert_that!(post.read("title", &it).unwrap(), some(eq("Titolo italiano")));
    }

    #[rstest]
    fn unknown_accessor_is_rejected(ctx: LocaleContext) {
        let mut post = TranslatedRecord::new(post_model());

        assert!(post.read("title_fr", &ctx).is_err());
        assert!(post.write("subtitle", "x", &ctx).is_err());
        assert_that!(post.overlay().is_empty(), eq(true));
    }

    #[rstest]
    fn pinned_read_does_not_fall_back(saved_post: TranslatedRecord) {
        assert_that!(saved_post.get_in("title", "de"), some(eq("Deutscher Titel")));
        assert_that!(saved_post.get_in("title", "it"), none());
    }

    #[rstest]
    fn before_type_cast_matches_get(saved_post: TranslatedRecord, ctx: LocaleContext) {
        let de = ctx.with_locale("de");
        let raw = saved_post.get_before_type_cast("title", &de);

        assert_that!(raw, eq(saved_post.get("title", &de)));
        assert_that!(raw, some(eq("Deutscher Titel")));
    }

    #[rstest]
    fn all_translations_covers_every_available_locale(
        saved_post: TranslatedRecord,
        ctx: LocaleContext,
    ) {
        let all = saved_post.all_translations(&ctx);

        let locales: Vec<&str> = all.iter().map(|(locale, _)| locale.as_str()).collect();
        assert_eq!(locales, vec!["en", "de", "it", "sv"]);
        assert_that!(all[0].1.is_new(), eq(false));
        assert_that!(all[2].1.is_new(), eq(true));
        assert_that!(all[2].1.owner_id, some(eq(RecordId(1))));
        assert_that!(all[2].1.locale.as_str(), eq("it"));
    }
}
