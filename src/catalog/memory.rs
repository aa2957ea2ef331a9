//! In-memory locale data source

use std::collections::HashMap;

use serde_json::{
    Value,
    json,
};

use super::{
    CatalogSource,
    SourceError,
};
use crate::locale::Locale;

/// Serves locale dictionaries held in memory.
///
/// Locales without an entry fail with [`SourceError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Locale → dictionary
    catalogs: HashMap<Locale, Value>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the dictionary for `locale`.
    #[must_use]
    pub fn with(mut self, locale: Locale, catalog: Value) -> Self {
        self.insert(locale, catalog);
        self
    }

    pub fn insert(&mut self, locale: Locale, catalog: Value) {
        self.catalogs.insert(locale, catalog);
    }

    /// Strings bundled with the site: brand name, loading text, the
    /// current-language label and the main navigation, in every locale.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with(
                Locale::Pt,
                json!({
                    "brand": { "name": "Villa Sunshine" },
                    "common": { "loading": "Carregando...", "currentLanguage": "Idioma atual" },
                    "nav": { "home": "Início", "about": "Sobre", "contact": "Contato" }
                }),
            )
            .with(
                Locale::En,
                json!({
                    "brand": { "name": "Villa Sunshine" },
                    "common": { "loading": "Loading...", "currentLanguage": "Current Language" },
                    "nav": { "home": "Home", "about": "About", "contact": "Contact" }
                }),
            )
            .with(
                Locale::Es,
                json!({
                    "brand": { "name": "Villa Sunshine" },
                    "common": { "loading": "Cargando...", "currentLanguage": "Idioma actual" },
                    "nav": { "home": "Inicio", "about": "Acerca", "contact": "Contacto" }
                }),
            )
            .with(
                Locale::De,
                json!({
                    "brand": { "name": "Villa Sunshine" },
                    "common": { "loading": "Laden...", "currentLanguage": "Aktuelle Sprache" },
                    "nav": { "home": "Startseite", "about": "Über", "contact": "Kontakt" }
                }),
            )
    }
}

impl CatalogSource for MemorySource {
    async fn fetch(&self, locale: Locale) -> Result<Value, SourceError> {
        self.catalogs.get(&locale).cloned().ok_or(SourceError::NotFound(locale))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use tokio_test::block_on;

    use super::*;

    #[googletest::test]
    fn fetch_returns_stored_dictionary() {
        let source = MemorySource::new().with(Locale::En, json!({ "nav": { "home": "Home" } }));

        let value = block_on(source.fetch(Locale::En)).unwrap();

        assert_eq!(value["nav"]["home"], json!("Home"));
    }

    #[googletest::test]
    fn fetch_missing_locale_fails() {
        let source = MemorySource::new();

        let result = block_on(source.fetch(Locale::De));

        expect_that!(matches!(result, Err(SourceError::NotFound(Locale::De))), eq(true));
    }

    #[googletest::test]
    fn builtin_covers_every_locale() {
        let source = MemorySource::builtin();

        for locale in Locale::ALL {
            let value = block_on(source.fetch(locale)).unwrap();
            expect_that!(value["nav"]["home"].is_string(), eq(true));
            assert_eq!(value["brand"]["name"], json!("Villa Sunshine"));
        }
    }
}
