//! Supported display locales

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::LocaleError;

/// A display language supported by the site.
///
/// The set is closed: anything else is rejected by [`Locale::from_str`] or
/// mapped to the default by [`Locale::coerce`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    /// Portuguese
    #[default]
    Pt,
    /// English
    En,
    /// Spanish
    Es,
    /// German
    De,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Self; 4] = [Self::Pt, Self::En, Self::Es, Self::De];

    /// Short language code used in file paths and URLs (e.g. `pt`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
            Self::Es => "es",
            Self::De => "de",
        }
    }

    /// Name of the language in that language, for locale pickers.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pt => "Português",
            Self::En => "English",
            Self::Es => "Español",
            Self::De => "Deutsch",
        }
    }

    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Pt => "🇧🇷",
            Self::En => "🇺🇸",
            Self::Es => "🇪🇸",
            Self::De => "🇩🇪",
        }
    }

    /// BCP 47 tag whose conventions drive number and date formatting.
    #[must_use]
    pub const fn format_tag(self) -> &'static str {
        match self {
            Self::Pt => "pt-PT",
            Self::En => "en-US",
            Self::Es => "es-ES",
            Self::De => "de-DE",
        }
    }

    /// Parse `code`, falling back to the default locale when it is unsupported.
    #[must_use]
    pub fn coerce(code: &str) -> Self {
        code.parse().unwrap_or_else(|_| {
            tracing::debug!(code, "Unsupported locale code, using default");
            Self::default()
        })
    }
}

/// Normalize language code (lowercase and replace - with _)
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts bare codes (`en`) and region-tagged ones (`pt-BR`, `en_US`),
    /// matching on the primary subtag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_language_code(s.trim());
        let primary = normalized.split('_').next().unwrap_or_default();

        match primary {
            "pt" => Ok(Self::Pt),
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "de" => Ok(Self::De),
            _ => Err(LocaleError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pt", Locale::Pt)]
    #[case("en", Locale::En)]
    #[case("es", Locale::Es)]
    #[case("de", Locale::De)]
    #[case("PT", Locale::Pt)]
    #[case("pt-BR", Locale::Pt)]
    #[case("pt_PT", Locale::Pt)]
    #[case("en-US", Locale::En)]
    #[case(" de-DE ", Locale::De)]
    fn parse_supported_codes(#[case] code: &str, #[case] expected: Locale) {
        assert_eq!(code.parse::<Locale>().unwrap(), expected);
    }

    #[rstest]
    #[case("fr")]
    #[case("ja-JP")]
    #[case("")]
    #[case("portuguese")]
    fn parse_rejects_unsupported_codes(#[case] code: &str) {
        let result = code.parse::<Locale>();

        assert!(matches!(result, Err(LocaleError::UnsupportedLocale(ref value)) if value == code));
    }

    #[rstest]
    #[case("fr", Locale::Pt)]
    #[case("es-MX", Locale::Es)]
    fn coerce_maps_unsupported_to_default(#[case] code: &str, #[case] expected: Locale) {
        assert_eq!(Locale::coerce(code), expected);
    }

    #[googletest::test]
    fn serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&Locale::De).unwrap();
        expect_that!(json, eq("\"de\""));

        let parsed: Locale = serde_json::from_str("\"en-GB\"").unwrap();
        expect_that!(parsed, eq(Locale::En));

        let rejected = serde_json::from_str::<Locale>("\"fr\"");
        expect_that!(rejected.is_err(), eq(true));
    }

    #[googletest::test]
    fn metadata_is_defined_for_every_locale() {
        for locale in Locale::ALL {
            expect_that!(locale.code().parse::<Locale>().ok(), some(eq(locale)));
            expect_that!(locale.display_name(), not(eq("")));
            expect_that!(locale.format_tag(), starts_with(locale.code()));
        }
        expect_that!(Locale::default(), eq(Locale::Pt));
        expect_that!(Locale::Es.to_string(), eq("es"));
    }
}
