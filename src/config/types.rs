use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;
use crate::resolver::DEFAULT_KEY_SEPARATOR;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLocales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.property-i18n.json`.
///
/// Locale codes are kept as written so that validation can point at the
/// offending entry; use [`I18nSettings::default_locale`] and
/// [`I18nSettings::supported_locales`] once validated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Locale shown first and used as the fallback catalog
    #[serde(rename = "defaultLocale")]
    pub default_locale_code: String,

    /// Locales the session may switch to
    #[serde(rename = "supportedLocales")]
    pub supported_locale_codes: Vec<String>,

    /// Directory holding `<locale>/<namespace>.json`, relative to the
    /// workspace root unless absolute.
    pub locales_dir: String,

    /// Catalog files loaded per locale, merged in order.
    pub namespaces: Vec<String>,

    pub key_separator: String,

    /// Log a warning whenever a key is rendered as-is.
    pub report_missing_keys: bool,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale_code: Locale::default().code().to_string(),
            supported_locale_codes: Locale::ALL.iter().map(|l| l.code().to_string()).collect(),
            locales_dir: "locales".to_string(),
            namespaces: vec!["common".to_string()],
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            report_missing_keys: true,
        }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Unknown or duplicated locale code
    /// - Default locale outside the supported set
    /// - Empty separator
    /// - Empty or path-like namespace
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let default_locale = self.default_locale_code.parse::<Locale>();
        if default_locale.is_err() {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "Unknown locale '{}'. Expected one of: {}",
                    self.default_locale_code,
                    known_codes()
                ),
            ));
        }

        if self.supported_locale_codes.is_empty() {
            errors.push(ValidationError::new(
                "supportedLocales",
                "At least one locale is required. Example: [\"pt\", \"en\"]",
            ));
        }

        let mut seen = Vec::new();
        for (index, code) in self.supported_locale_codes.iter().enumerate() {
            match code.parse::<Locale>() {
                Ok(locale) if seen.contains(&locale) => {
                    errors.push(ValidationError::new(
                        format!("supportedLocales[{index}]"),
                        format!("Duplicate locale '{code}'"),
                    ));
                }
                Ok(locale) => seen.push(locale),
                Err(_) => {
                    errors.push(ValidationError::new(
                        format!("supportedLocales[{index}]"),
                        format!("Unknown locale '{code}'. Expected one of: {}", known_codes()),
                    ));
                }
            }
        }

        if let Ok(locale) = default_locale
            && !seen.is_empty()
            && !seen.contains(&locale)
        {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "The default locale '{}' must also be listed in 'supportedLocales'",
                    self.default_locale_code
                ),
            ));
        }

        if self.locales_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "localesDir",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.namespaces.is_empty() {
            errors.push(ValidationError::new(
                "namespaces",
                "At least one namespace is required. Example: [\"common\"]",
            ));
        }

        for (index, namespace) in self.namespaces.iter().enumerate() {
            if namespace.is_empty() {
                errors.push(ValidationError::new(
                    format!("namespaces[{index}]"),
                    "The namespace cannot be empty",
                ));
            } else if namespace.contains(['/', '\\']) || namespace == "." || namespace == ".." {
                errors.push(ValidationError::new(
                    format!("namespaces[{index}]"),
                    format!("Invalid namespace '{namespace}': must be a plain file name"),
                ));
            }
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Parsed default locale; the crate default when the code is invalid.
    #[must_use]
    pub fn default_locale(&self) -> Locale {
        Locale::coerce(&self.default_locale_code)
    }

    /// Parsed supported locales, in configured order, without unknown codes
    /// or duplicates.
    #[must_use]
    pub fn supported_locales(&self) -> Vec<Locale> {
        let mut locales = Vec::with_capacity(self.supported_locale_codes.len());
        for locale in self.supported_locale_codes.iter().filter_map(|code| code.parse().ok()) {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        locales
    }
}

/// Supported codes joined for error messages.
fn known_codes() -> String {
    Locale::ALL.iter().map(|l| l.code()).collect::<Vec<_>>().join(", ")
}
