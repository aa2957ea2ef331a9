//! Key path resolution with locale fallback
//!
//! A key resolves to exactly one string leaf. When neither the catalog nor the
//! fallback catalog has it, the key itself is returned so the page always has
//! something to render and the gap stays visible.

use crate::catalog::{
    Lookup,
    TranslationCatalog,
};

/// Separator used between key segments unless configured otherwise.
pub const DEFAULT_KEY_SEPARATOR: &str = ".";

/// Where a resolved string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Found in the requested catalog
    Found(&'a str),
    /// Found in the fallback catalog only
    Fallback(&'a str),
    /// Absent from both catalogs (or ending on a subtree)
    Missing,
}

impl<'a> Resolution<'a> {
    /// The resolved text, or `key` when missing.
    #[must_use]
    pub const fn or_key(self, key: &'a str) -> &'a str {
        match self {
            Self::Found(value) | Self::Fallback(value) => value,
            Self::Missing => key,
        }
    }
}

/// Resolves dotted keys against catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolver {
    /// Segment separator (`.` by default)
    separator: String,
    /// Log a warning whenever a key is echoed back
    report_missing: bool,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self { separator: DEFAULT_KEY_SEPARATOR.to_string(), report_missing: true }
    }
}

impl KeyResolver {
    #[must_use]
    pub fn new(separator: impl Into<String>, report_missing: bool) -> Self {
        Self { separator: separator.into(), report_missing }
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Look `key` up in `catalog`, then in `fallback`.
    #[must_use]
    pub fn lookup<'a>(
        &self,
        catalog: &'a TranslationCatalog,
        key: &str,
        fallback: Option<&'a TranslationCatalog>,
    ) -> Resolution<'a> {
        if let Lookup::Found(value) = catalog.lookup(key, &self.separator) {
            return Resolution::Found(value);
        }

        fallback
            .filter(|fallback| !std::ptr::eq(*fallback, catalog))
            .and_then(|fallback| fallback.lookup(key, &self.separator).found())
            .map_or(Resolution::Missing, Resolution::Fallback)
    }

    /// Resolve `key` to display text.
    ///
    /// Never fails: a key missing from both catalogs is returned unchanged.
    #[must_use]
    pub fn resolve(
        &self,
        catalog: &TranslationCatalog,
        key: &str,
        fallback: Option<&TranslationCatalog>,
    ) -> String {
        let resolution = self.lookup(catalog, key, fallback);

        match resolution {
            Resolution::Found(_) => {}
            Resolution::Fallback(_) => {
                tracing::debug!(key, locale = %catalog.locale(), "Resolved key from fallback catalog");
            }
            Resolution::Missing if self.report_missing => {
                tracing::warn!(key, locale = %catalog.locale(), "Missing translation, rendering key");
            }
            Resolution::Missing => {}
        }

        resolution.or_key(key).to_string()
    }
}

/// Resolve `key` with the default `.` separator.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use property_i18n::catalog::TranslationCatalog;
/// use property_i18n::{Locale, resolve};
///
/// let pt = TranslationCatalog::from_json(Locale::Pt, &json!({ "nav": { "home": "Início" } })).unwrap();
/// let en = TranslationCatalog::from_json(Locale::En, &json!({ "nav": { "home": "Home" } })).unwrap();
///
/// assert_eq!(resolve(&en, "nav.home", Some(&pt)), "Home");
/// assert_eq!(resolve(&en, "nav.about", Some(&pt)), "nav.about");
/// ```
#[must_use]
pub fn resolve(
    catalog: &TranslationCatalog,
    key: &str,
    fallback: Option<&TranslationCatalog>,
) -> String {
    KeyResolver::default().resolve(catalog, key, fallback)
}
