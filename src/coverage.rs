//! 翻訳カバレッジレポート
//!
//! デフォルトロケールのカタログを基準に、各ロケールで不足しているキーと
//! 基準に存在しない余分なキーを列挙します。

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::TranslationCatalog;
use crate::locale::Locale;

/// 1 ロケール分のカバレッジ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub locale: Locale,
    /// 基準カタログのキー数
    pub total: usize,
    /// 基準にあってこのロケールにないキー（ソート済み）
    pub missing: Vec<String>,
    /// このロケールにだけあるキー（ソート済み）
    pub extra: Vec<String>,
}

impl CoverageReport {
    /// `catalog` を `reference` と比較する
    ///
    /// # Arguments
    /// * `reference` - 基準となるカタログ（通常はデフォルトロケール）
    /// * `catalog` - チェック対象のカタログ
    /// * `separator` - キーの区切り文字
    #[must_use]
    pub fn compare(
        reference: &TranslationCatalog,
        catalog: &TranslationCatalog,
        separator: &str,
    ) -> Self {
        let expected: HashSet<String> = reference.flatten(separator).into_keys().collect();
        let actual: HashSet<String> = catalog.flatten(separator).into_keys().collect();

        let mut missing: Vec<String> = expected.difference(&actual).cloned().collect();
        let mut extra: Vec<String> = actual.difference(&expected).cloned().collect();
        missing.sort();
        extra.sort();

        tracing::debug!(
            locale = %catalog.locale(),
            total = expected.len(),
            missing = missing.len(),
            extra = extra.len(),
            "Computed translation coverage"
        );

        Self { locale: catalog.locale(), total: expected.len(), missing, extra }
    }

    /// カタログを読み込めなかったロケールのレポート（全キーが不足）
    #[must_use]
    pub fn unavailable(locale: Locale, reference: &TranslationCatalog, separator: &str) -> Self {
        Self::compare(reference, &TranslationCatalog::empty(locale), separator)
    }

    /// 翻訳済みのキー数
    #[must_use]
    pub const fn translated(&self) -> usize {
        self.total.saturating_sub(self.missing.len())
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
