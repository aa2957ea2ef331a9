//! Locale data source contract

use std::future::Future;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use super::CatalogError;
use crate::locale::Locale;

/// Errors produced while fetching locale data.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Error when failing to read a catalog file
    #[error("Failed to read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when a catalog file is not valid JSON
    #[error("Failed to parse catalog file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The source holds no data for the locale
    #[error("No catalog data for locale '{0}'")]
    NotFound(Locale),

    /// The data was fetched but is not a usable catalog
    #[error("Malformed catalog: {0}")]
    Malformed(#[from] CatalogError),
}

/// Produces the raw nested dictionary for a locale.
///
/// Where the data lives (bundled, on disk, remote) is up to the implementation.
/// Fetching the same locale twice must yield the same data.
pub trait CatalogSource: Send + Sync {
    /// Fetch the locale's dictionary as a JSON value.
    fn fetch(&self, locale: Locale) -> impl Future<Output = Result<Value, SourceError>> + Send;
}
