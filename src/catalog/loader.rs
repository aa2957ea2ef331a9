//! Lazily populated, single-flight catalog cache

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use futures::future::{
    BoxFuture,
    FutureExt,
    Shared,
    join_all,
};

use super::{
    CatalogSource,
    SourceError,
    TranslationCatalog,
};
use crate::error::LocaleError;
use crate::locale::Locale;

/// Outcome of one fetch, shared by every caller that waited on it.
pub type LoadResult = Result<Arc<TranslationCatalog>, Arc<SourceError>>;

/// A fetch in progress. Cloning it joins the same fetch.
type PendingLoad = Shared<BoxFuture<'static, LoadResult>>;

/// Cache entry for one locale.
enum Slot {
    /// Fetch in flight; concurrent loaders await this same future
    Loading(PendingLoad),
    /// Loaded catalog
    Ready(Arc<TranslationCatalog>),
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading(_) => f.write_str("Loading"),
            Self::Ready(catalog) => f.debug_tuple("Ready").field(&catalog.locale()).finish(),
        }
    }
}

/// Loads catalogs from a [`CatalogSource`] and caches them per locale.
///
/// # Single flight
///
/// Concurrent loads of the same uncached locale share one fetch, whether it
/// succeeds or fails. A failure is handed to every waiter and then forgotten,
/// so the next load retries.
///
/// # Fallback
///
/// When a locale cannot be loaded the default locale's catalog is returned
/// instead. [`LocaleError::CatalogUnavailable`] is only returned when the
/// default locale fails as well.
///
/// # Locking
///
/// The slot map lock is only held to look up or swap slots, never across an
/// `.await`.
#[derive(Debug)]
pub struct CatalogLoader<S> {
    /// Where locale data comes from; shared with in-flight fetches
    source: Arc<S>,
    /// Locale used when another locale fails to load
    default_locale: Locale,
    /// Locale → cache slot
    slots: RwLock<HashMap<Locale, Slot>>,
}

impl<S: CatalogSource + 'static> CatalogLoader<S> {
    #[must_use]
    pub fn new(source: S, default_locale: Locale) -> Self {
        Self { source: Arc::new(source), default_locale, slots: RwLock::new(HashMap::new()) }
    }

    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the catalog for `locale`, loading it on first use.
    ///
    /// Falls back to the default locale's catalog when `locale` fails to load.
    ///
    /// # Errors
    /// `CatalogUnavailable` when neither `locale` nor the default locale loads.
    pub async fn load(&self, locale: Locale) -> Result<Arc<TranslationCatalog>, LocaleError> {
        match self.load_exact(locale).await {
            Ok(catalog) => Ok(catalog),
            Err(error) if locale != self.default_locale => {
                tracing::warn!(
                    %locale,
                    default_locale = %self.default_locale,
                    %error,
                    "Failed to load catalog, falling back to default locale"
                );
                self.load_exact(self.default_locale)
                    .await
                    .map_err(|source| LocaleError::CatalogUnavailable { locale, source })
            }
            Err(source) => Err(LocaleError::CatalogUnavailable { locale, source }),
        }
    }

    /// Load exactly `locale`, without falling back.
    ///
    /// A failed load leaves no slot behind, so the next call retries.
    pub async fn load_exact(&self, locale: Locale) -> LoadResult {
        if let Some(catalog) = self.cached(locale) {
            tracing::trace!(%locale, "Catalog cache hit");
            return Ok(catalog);
        }

        let pending = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            match slots.get(&locale) {
                Some(Slot::Ready(catalog)) => return Ok(Arc::clone(catalog)),
                Some(Slot::Loading(pending)) => {
                    tracing::trace!(%locale, "Joining in-flight catalog fetch");
                    pending.clone()
                }
                None => {
                    let pending = self.start_fetch(locale);
                    slots.insert(locale, Slot::Loading(pending.clone()));
                    pending
                }
            }
        };

        let result = pending.clone().await;
        self.settle(locale, &pending, &result);
        result
    }

    /// Cached catalog for `locale`, without loading.
    #[must_use]
    pub fn cached(&self, locale: Locale) -> Option<Arc<TranslationCatalog>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        match slots.get(&locale) {
            Some(Slot::Ready(catalog)) => Some(Arc::clone(catalog)),
            Some(Slot::Loading(_)) | None => None,
        }
    }

    /// Load several locales concurrently, returning the ones that failed.
    ///
    /// No fallback is applied; a failed locale is simply retried on its next
    /// [`load`](Self::load).
    pub async fn preload(&self, locales: &[Locale]) -> Vec<(Locale, Arc<SourceError>)> {
        let results = join_all(locales.iter().map(|&locale| async move {
            self.load_exact(locale).await.err().map(|error| (locale, error))
        }))
        .await;

        let failures: Vec<_> = results.into_iter().flatten().collect();
        for (locale, error) in &failures {
            tracing::warn!(%locale, %error, "Failed to preload catalog");
        }
        failures
    }

    /// Drop every cached catalog.
    ///
    /// The slot map is swapped in one step: loads already in flight finish
    /// without touching the new map and the next `load` fetches again.
    pub fn clear(&self) {
        let previous = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *slots)
        };
        tracing::debug!(dropped = previous.len(), "Cleared catalog cache");
    }

    /// Shared future that fetches and builds the catalog for `locale`.
    fn start_fetch(&self, locale: Locale) -> PendingLoad {
        let source = Arc::clone(&self.source);
        async move {
            fetch_catalog(source.as_ref(), locale).await.map(Arc::new).map_err(Arc::new)
        }
        .boxed()
        .shared()
    }

    /// Record the outcome of `pending`, unless its slot was cleared or
    /// replaced meanwhile.
    fn settle(&self, locale: Locale, pending: &PendingLoad, result: &LoadResult) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let is_current = matches!(
            slots.get(&locale),
            Some(Slot::Loading(current)) if current.ptr_eq(pending)
        );
        if !is_current {
            return;
        }

        match result {
            Ok(catalog) => {
                slots.insert(locale, Slot::Ready(Arc::clone(catalog)));
            }
            Err(_) => {
                slots.remove(&locale);
            }
        }
    }
}

/// Fetch the raw dictionary for `locale` and build its catalog.
async fn fetch_catalog<S: CatalogSource>(
    source: &S,
    locale: Locale,
) -> Result<TranslationCatalog, SourceError> {
    tracing::debug!(%locale, "Fetching catalog");
    let json = source.fetch(locale).await?;
    let catalog = TranslationCatalog::from_json(locale, &json)?;
    tracing::debug!(%locale, entries = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::catalog::Lookup;
    use crate::test_utils::{
        CountingSource,
        scenario_source,
    };

    #[tokio::test]
    async fn load_caches_catalog() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let first = loader.load(Locale::En).await.unwrap();
        let second = loader.load(Locale::En).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.source().fetch_count(Locale::En), 1);
        assert_eq!(first.lookup("nav.home", "."), Lookup::Found("Home"));
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let (first, second) = tokio::join!(loader.load(Locale::En), loader.load(Locale::En));

        let (first, second) = (first.unwrap(), second.unwrap());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.source().fetch_count(Locale::En), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_loads_across_tasks_share_one_fetch() {
        let loader = Arc::new(CatalogLoader::new(scenario_source(), Locale::Pt));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loader = Arc::clone(&loader);
                tokio::spawn(async move { loader.load(Locale::En).await.unwrap() })
            })
            .collect();

        let catalogs: Vec<_> = join_all(handles).await.into_iter().map(Result::unwrap).collect();

        assert_eq!(loader.source().fetch_count(Locale::En), 1);
        for catalog in &catalogs {
            assert!(Arc::ptr_eq(catalog, &catalogs[0]));
        }
    }

    #[tokio::test]
    async fn concurrent_failing_loads_share_one_fetch() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let (first, second, third) =
            tokio::join!(loader.load(Locale::Es), loader.load(Locale::Es), loader.load(Locale::Es));

        let (first, second, third) = (first.unwrap(), second.unwrap(), third.unwrap());
        assert_eq!(loader.source().fetch_count(Locale::Es), 1);
        assert_eq!(loader.source().fetch_count(Locale::Pt), 1);
        assert_eq!(first.locale(), Locale::Pt);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &third));
    }

    #[tokio::test]
    async fn concurrent_waiters_receive_the_same_error() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let (first, second) =
            tokio::join!(loader.load_exact(Locale::De), loader.load_exact(Locale::De));

        let (first, second) = (first.unwrap_err(), second.unwrap_err());
        assert!(Arc::ptr_eq(&first, &second));
        assert!(matches!(*first, SourceError::NotFound(Locale::De)));
        assert_eq!(loader.source().fetch_count(Locale::De), 1);

        let _ = loader.load_exact(Locale::De).await;
        assert_eq!(loader.source().fetch_count(Locale::De), 2);
    }

    #[tokio::test]
    async fn clear_during_fetch_does_not_repopulate_cache() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let (catalog, ()) = tokio::join!(loader.load_exact(Locale::En), async {
            loader.clear();
        });

        assert_eq!(catalog.unwrap().locale(), Locale::En);
        assert!(loader.cached(Locale::En).is_none());
    }

    #[tokio::test]
    async fn failed_locale_falls_back_to_default() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let catalog = loader.load(Locale::Es).await.unwrap();

        assert_eq!(catalog.locale(), Locale::Pt);
        assert_eq!(catalog.lookup("nav.home", "."), Lookup::Found("Início"));
        assert!(loader.cached(Locale::Es).is_none());
        assert!(loader.cached(Locale::Pt).is_some());
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let _ = loader.load(Locale::Es).await.unwrap();
        let _ = loader.load(Locale::Es).await.unwrap();

        assert_eq!(loader.source().fetch_count(Locale::Es), 2);
        assert_eq!(loader.source().fetch_count(Locale::Pt), 1);
    }

    #[tokio::test]
    async fn unavailable_when_default_fails() {
        let source = CountingSource::new().with(Locale::En, json!({ "nav": { "home": "Home" } }));
        let loader = CatalogLoader::new(source, Locale::Pt);

        let result = loader.load(Locale::Es).await;

        assert!(matches!(
            result,
            Err(LocaleError::CatalogUnavailable { locale: Locale::Es, ref source })
                if matches!(**source, SourceError::NotFound(Locale::Pt))
        ));
    }

    #[tokio::test]
    async fn unavailable_when_default_itself_is_requested_and_fails() {
        let loader = CatalogLoader::new(CountingSource::new(), Locale::Pt);

        let result = loader.load(Locale::Pt).await;

        assert!(matches!(result, Err(LocaleError::CatalogUnavailable { locale: Locale::Pt, .. })));
    }

    #[tokio::test]
    async fn malformed_catalog_falls_back() {
        let source = scenario_source().with(Locale::De, json!(["not", "an", "object"]));
        let loader = CatalogLoader::new(source, Locale::Pt);

        let catalog = loader.load(Locale::De).await.unwrap();

        assert_eq!(catalog.locale(), Locale::Pt);
    }

    #[googletest::test]
    #[tokio::test]
    async fn clear_forces_reload() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let before = loader.load(Locale::En).await.unwrap();
        loader.clear();
        expect_that!(loader.cached(Locale::En).is_none(), eq(true));
        let after = loader.load(Locale::En).await.unwrap();

        expect_that!(Arc::ptr_eq(&before, &after), eq(false));
        assert_eq!(*before, *after);
        expect_that!(loader.source().fetch_count(Locale::En), eq(2));
    }

    #[tokio::test]
    async fn preload_reports_failures() {
        let loader = CatalogLoader::new(scenario_source(), Locale::Pt);

        let failures = loader.preload(&Locale::ALL).await;

        let failed: Vec<_> = failures.iter().map(|(locale, _)| *locale).collect();
        assert_eq!(failed, vec![Locale::Es, Locale::De]);
        assert!(loader.cached(Locale::Pt).is_some());
        assert!(loader.cached(Locale::En).is_some());
    }
}
