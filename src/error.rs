//! Errors surfaced to callers of the locale service

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::SourceError;
use crate::locale::Locale;

/// Errors returned by locale switching and catalog loading.
///
/// Missing translation keys are not represented here: the resolver echoes the
/// key instead of failing.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// The value is not one of the supported locales
    #[error("Unsupported locale: '{0}'")]
    UnsupportedLocale(String),

    /// Neither the requested locale nor the default locale could be loaded
    #[error("No catalog available for '{locale}' (default locale failed too): {source}")]
    CatalogUnavailable {
        locale: Locale,
        #[source]
        source: Arc<SourceError>,
    },
}
