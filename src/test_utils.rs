//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]

use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use serde_json::{
    Value,
    json,
};

use crate::catalog::{
    CatalogSource,
    MemorySource,
    SourceError,
    TranslationCatalog,
};
use crate::locale::Locale;

/// フェッチ回数を記録する `MemorySource` のラッパー
///
/// フェッチ中に一度 `yield` するため、同時ロードの重複排除を検証できます。
#[derive(Debug, Clone, Default)]
pub(crate) struct CountingSource {
    /// 実データ
    inner: MemorySource,
    /// ロケールごとのフェッチ回数
    counts: Arc<Mutex<HashMap<Locale, usize>>>,
}

impl CountingSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, locale: Locale, catalog: Value) -> Self {
        self.inner.insert(locale, catalog);
        self
    }

    /// `locale` のフェッチ回数
    pub(crate) fn fetch_count(&self, locale: Locale) -> usize {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts.get(&locale).copied().unwrap_or(0)
    }
}

impl CatalogSource for CountingSource {
    async fn fetch(&self, locale: Locale) -> Result<Value, SourceError> {
        {
            let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
            *counts.entry(locale).or_insert(0) += 1;
        }
        tokio::task::yield_now().await;
        self.inner.fetch(locale).await
    }
}

/// pt と en のカタログだけを持つソースを作成する（es / de のフェッチは失敗する）
pub(crate) fn scenario_source() -> CountingSource {
    CountingSource::new()
        .with(Locale::Pt, json!({ "nav": { "home": "Início", "contact": "Contato" } }))
        .with(Locale::En, json!({ "nav": { "home": "Home" } }))
}

/// テスト用の `TranslationCatalog` を作成する
///
/// # Panics
/// `json` がオブジェクトでない場合
#[allow(clippy::unwrap_used)]
pub(crate) fn catalog(locale: Locale, json: &Value) -> TranslationCatalog {
    TranslationCatalog::from_json(locale, json).unwrap()
}
