//! On-disk locale data source
//!
//! Reads `<root>/<locale>/<namespace>.json` for each configured namespace and
//! merges the files into one dictionary. Files may contain comments and
//! trailing commas.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use jsonc_parser::{
    ParseOptions,
    parse_to_serde_value,
};
use serde_json::{
    Map,
    Value,
};

use super::tree::json_kind;
use super::{
    CatalogError,
    CatalogSource,
    SourceError,
};
use crate::locale::Locale;

/// Loads locale dictionaries from a `locales/` style directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    /// Directory holding one sub-directory per locale
    root: PathBuf,
    /// File stems merged into each locale's dictionary, in order
    namespaces: Vec<String>,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, namespaces: Vec<String>) -> Self {
        Self { root: root.into(), namespaces }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one namespace file for `locale`.
    #[must_use]
    pub fn file_path(&self, locale: Locale, namespace: &str) -> PathBuf {
        self.root.join(locale.code()).join(format!("{namespace}.json"))
    }

    /// Read and parse a single namespace file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    async fn read_namespace(
        &self,
        locale: Locale,
        namespace: &str,
    ) -> Result<Option<Map<String, Value>>, SourceError> {
        let path = self.file_path(locale, namespace);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Catalog file not found");
                return Ok(None);
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        let parsed = parse_to_serde_value(&content, &ParseOptions::default())
            .map_err(|e| SourceError::Parse { path: path.clone(), message: e.to_string() })?;

        match parsed {
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(SourceError::Malformed(CatalogError::RootNotObject {
                locale,
                found: json_kind(&other),
            })),
            None => Err(SourceError::Parse { path, message: "empty document".to_string() }),
        }
    }
}

impl CatalogSource for DirectorySource {
    async fn fetch(&self, locale: Locale) -> Result<Value, SourceError> {
        let mut merged = Map::new();
        let mut found_any = false;

        for namespace in &self.namespaces {
            let Some(map) = self.read_namespace(locale, namespace).await? else {
                continue;
            };
            found_any = true;
            merge_into(&mut merged, map, None);
        }

        if !found_any {
            return Err(SourceError::NotFound(locale));
        }

        tracing::debug!(%locale, root = %self.root.display(), "Read catalog files");
        Ok(Value::Object(merged))
    }
}

/// Deep-merge `overlay` into `target`. Objects merge recursively; any other
/// collision is won by `overlay`.
fn merge_into(target: &mut Map<String, Value>, overlay: Map<String, Value>, prefix: Option<&str>) {
    for (key, value) in overlay {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));

        match target.get_mut(&key) {
            Some(Value::Object(existing)) if value.is_object() => {
                if let Value::Object(incoming) = value {
                    merge_into(existing, incoming, Some(&full_key));
                }
            }
            Some(existing) => {
                tracing::warn!(key = %full_key, "Conflicting catalog entry, later namespace wins");
                *existing = value;
            }
            None => {
                target.insert(key, value);
            }
        }
    }
}
