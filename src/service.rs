//! Locale context handed to page components
//!
//! [`LocaleService`] ties one [`LocaleSession`], one [`CatalogLoader`] and one
//! [`KeyResolver`] together. Components ask it for a [`Translator`], a
//! snapshot bound to one locale that resolves keys synchronously.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;

use crate::catalog::{
    CatalogLoader,
    CatalogSource,
    SourceError,
    TranslationCatalog,
};
use crate::config::I18nSettings;
use crate::coverage::CoverageReport;
use crate::error::LocaleError;
use crate::format::{
    self,
    Amenity,
    Noun,
};
use crate::locale::Locale;
use crate::resolver::{
    KeyResolver,
    Resolution,
};
use crate::session::LocaleSession;

/// Active locale, catalog cache and resolver for one site instance.
///
/// Independent services share nothing; tests build one each.
#[derive(Debug)]
pub struct LocaleService<S> {
    /// Catalog cache, falling back to the session's default locale
    loader: CatalogLoader<S>,
    /// Active locale
    session: LocaleSession,
    /// Shared with every translator handed out
    resolver: Arc<KeyResolver>,
}

impl<S: CatalogSource + 'static> LocaleService<S> {
    /// The loader falls back to the session's default locale.
    #[must_use]
    pub fn new(source: S, session: LocaleSession, resolver: KeyResolver) -> Self {
        let loader = CatalogLoader::new(source, session.default_locale());
        Self { loader, session, resolver: Arc::new(resolver) }
    }

    /// Build a service from validated settings.
    ///
    /// # Errors
    /// `UnsupportedLocale` if the default locale is not among the supported
    /// locales.
    pub fn from_settings(source: S, settings: &I18nSettings) -> Result<Self, LocaleError> {
        let session = LocaleSession::new(settings.default_locale(), settings.supported_locales())?;
        let resolver = KeyResolver::new(&settings.key_separator, settings.report_missing_keys);
        Ok(Self::new(source, session, resolver))
    }

    #[must_use]
    pub const fn session(&self) -> &LocaleSession {
        &self.session
    }

    #[must_use]
    pub const fn loader(&self) -> &CatalogLoader<S> {
        &self.loader
    }

    #[must_use]
    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    #[must_use]
    pub fn current(&self) -> Locale {
        self.session.current()
    }

    /// Switch the active locale without loading anything.
    ///
    /// # Errors
    /// `UnsupportedLocale`; the active locale is left unchanged.
    pub fn switch_to(&self, locale: Locale) -> Result<(), LocaleError> {
        self.session.switch_to(locale)
    }

    /// Switch the active locale, then load its catalog.
    ///
    /// The switch takes effect before the load starts. If another switch
    /// happens while this one is loading, the later switch stays active and
    /// the returned translator is still bound to `locale`.
    ///
    /// # Errors
    /// `UnsupportedLocale`, or `CatalogUnavailable` when neither `locale` nor
    /// the default locale can be loaded.
    pub async fn switch_locale(&self, locale: Locale) -> Result<Translator, LocaleError> {
        self.session.switch_to(locale)?;
        self.translator_for(locale).await
    }

    /// Translator for the active locale.
    ///
    /// # Errors
    /// `CatalogUnavailable` when neither the active nor the default locale
    /// can be loaded.
    pub async fn translator(&self) -> Result<Translator, LocaleError> {
        self.translator_for(self.session.current()).await
    }

    /// Translator for `locale`, which need not be the active one.
    ///
    /// # Errors
    /// `CatalogUnavailable` when neither `locale` nor the default locale can
    /// be loaded.
    pub async fn translator_for(&self, locale: Locale) -> Result<Translator, LocaleError> {
        let default_locale = self.session.default_locale();
        let catalog = self.loader.load(locale).await?;

        let fallback = if catalog.locale() == default_locale {
            None
        } else {
            match self.loader.load_exact(default_locale).await {
                Ok(fallback) => Some(fallback),
                Err(error) => {
                    tracing::warn!(%locale, %default_locale, %error, "Fallback catalog unavailable");
                    None
                }
            }
        };

        Ok(Translator { locale, catalog, fallback, resolver: Arc::clone(&self.resolver) })
    }

    /// Resolve `key` in the active locale.
    ///
    /// # Errors
    /// Same as [`translator`](Self::translator).
    pub async fn translate(&self, key: &str) -> Result<String, LocaleError> {
        Ok(self.translator().await?.t(key))
    }

    /// Drop every cached catalog and load the active and default locales
    /// again. Returns the locales that failed to load.
    pub async fn reload(&self) -> Vec<(Locale, Arc<SourceError>)> {
        self.loader.clear();

        let current = self.session.current();
        let default_locale = self.session.default_locale();
        let locales: Vec<Locale> = if current == default_locale {
            vec![default_locale]
        } else {
            vec![default_locale, current]
        };
        self.loader.preload(&locales).await
    }

    /// Coverage of every supported locale against the default locale's
    /// catalog. A locale that fails to load reports every key as missing.
    ///
    /// # Errors
    /// `CatalogUnavailable` when the default locale cannot be loaded.
    pub async fn coverage(&self) -> Result<Vec<CoverageReport>, LocaleError> {
        let default_locale = self.session.default_locale();
        let reference = self
            .loader
            .load_exact(default_locale)
            .await
            .map_err(|source| LocaleError::CatalogUnavailable { locale: default_locale, source })?;
        let separator = self.resolver.separator();

        let others: Vec<Locale> =
            self.session.supported().iter().copied().filter(|&l| l != default_locale).collect();
        let loaded = join_all(others.iter().map(|&locale| self.loader.load_exact(locale))).await;

        let reports = others
            .into_iter()
            .zip(loaded)
            .map(|(locale, result)| match result {
                Ok(catalog) => CoverageReport::compare(&reference, &catalog, separator),
                Err(error) => {
                    tracing::warn!(%locale, %error, "Catalog unavailable for coverage report");
                    CoverageReport::unavailable(locale, &reference, separator)
                }
            })
            .collect();

        Ok(reports)
    }
}

/// Resolves keys and formats values for one locale.
///
/// Cheap to clone; holds the catalogs by `Arc`, so a later cache `clear` or
/// locale switch does not affect it.
#[derive(Debug, Clone)]
pub struct Translator {
    /// Locale the translator was requested for
    locale: Locale,
    /// Catalog actually in use; the default locale's if `locale` failed to load
    catalog: Arc<TranslationCatalog>,
    /// Default locale's catalog, unless `catalog` already is that one
    fallback: Option<Arc<TranslationCatalog>>,
    /// Resolver of the service that created this translator
    resolver: Arc<KeyResolver>,
}

impl Translator {
    /// Resolve `key`; a key missing everywhere is returned unchanged.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.resolver.resolve(&self.catalog, key, self.fallback.as_deref())
    }

    /// Resolve `key` and report where the text came from.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Resolution<'_> {
        self.resolver.lookup(&self.catalog, key, self.fallback.as_deref())
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Locale of the catalog in use. Differs from [`locale`](Self::locale)
    /// when the requested locale could not be loaded.
    #[must_use]
    pub fn catalog_locale(&self) -> Locale {
        self.catalog.locale()
    }

    #[must_use]
    pub fn currency(&self, amount: f64, currency_code: &str) -> String {
        format::format_currency(amount, currency_code, self.locale)
    }

    #[must_use]
    pub fn price(&self, amount: f64, currency_code: &str) -> String {
        format::format_price(amount, currency_code, self.locale)
    }

    #[must_use]
    pub fn area(&self, square_meters: f64) -> String {
        format::format_area(square_meters, self.locale)
    }

    #[must_use]
    pub fn date(&self, date: NaiveDate) -> String {
        format::format_date(date, self.locale)
    }

    #[must_use]
    pub fn quantity(&self, count: u32, noun: Noun) -> String {
        format::format_quantity(count, noun, self.locale)
    }

    #[must_use]
    pub fn amenity(&self, amenity: Amenity, parking_count: u32) -> String {
        format::format_amenity(amenity, parking_count, self.locale)
    }
}
