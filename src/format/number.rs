//! Locale-aware number, currency and area formatting.
//!
//! Digit grouping and the decimal mark come from `num-format`'s CLDR data for
//! the locale; currency symbols and precision come from the currency code.

use num_format::{
    Locale as NumLocale,
    ToFormattedString,
};

use crate::locale::Locale;

/// CLDR number conventions for the locale's format tag.
const fn number_locale(locale: Locale) -> NumLocale {
    match locale {
        Locale::Pt => NumLocale::pt_PT,
        Locale::En => NumLocale::en,
        Locale::Es => NumLocale::es,
        Locale::De => NumLocale::de,
    }
}

/// Digits needed in the leading group before a separator is written
/// (CLDR `minimumGroupingDigits`): `1234` stays ungrouped in pt-PT and es-ES.
const fn minimum_grouping_digits(locale: Locale) -> usize {
    match locale {
        Locale::Pt | Locale::Es => 2,
        Locale::En | Locale::De => 1,
    }
}

/// Format `value` with exactly `fraction_digits` decimals, or at most that
/// many when `trim_zeros` is set.
///
/// Non-finite values are rendered as Rust prints them.
pub(crate) fn format_decimal(
    value: f64,
    fraction_digits: usize,
    trim_zeros: bool,
    locale: Locale,
) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let num_locale = number_locale(locale);
    let fixed = format!("{:.*}", fraction_digits, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = if trim_zeros { frac_part.trim_end_matches('0') } else { frac_part };

    let grouped = if int_part.len() < minimum_grouping_digits(locale) + 3 {
        int_part.to_string()
    } else {
        int_part
            .parse::<u128>()
            .map_or_else(|_| int_part.to_string(), |n| n.to_formatted_string(&num_locale))
    };

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value.is_sign_negative() && !is_zero { num_locale.minus_sign() } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac_part}", num_locale.decimal())
    }
}

/// Display symbol and number of minor units (ISO 4217) for a currency code.
fn currency_info(code: &str) -> (String, usize) {
    let code = code.trim().to_ascii_uppercase();
    let (symbol, minor_units) = match code.as_str() {
        "EUR" => ("€", 2),
        "USD" => ("$", 2),
        "GBP" => ("£", 2),
        "BRL" => ("R$", 2),
        "JPY" => ("¥", 0),
        "KRW" => ("₩", 0),
        "CLP" | "ISK" | "VND" => (code.as_str(), 0),
        "BHD" | "KWD" | "OMR" | "TND" => (code.as_str(), 3),
        _ => (code.as_str(), 2),
    };
    (symbol.to_string(), minor_units)
}

/// Put the currency symbol before (en) or after the number.
fn place_symbol(number: &str, symbol: &str, locale: Locale) -> String {
    match locale {
        Locale::En => {
            let (sign, digits) = number.strip_prefix('-').map_or(("", number), |rest| ("-", rest));
            let is_letters = symbol.chars().all(|c| c.is_ascii_alphabetic());
            if is_letters {
                format!("{sign}{symbol}\u{a0}{digits}")
            } else {
                format!("{sign}{symbol}{digits}")
            }
        }
        Locale::Pt | Locale::Es | Locale::De => format!("{number}\u{a0}{symbol}"),
    }
}

/// Format an amount of money.
///
/// Precision and symbol follow `currency_code`; grouping, decimal mark and
/// symbol placement follow `locale`. Unknown codes are printed as the code.
///
/// # Examples
/// ```
/// use property_i18n::Locale;
/// use property_i18n::format::format_currency;
///
/// assert_eq!(format_currency(1_250.5, "USD", Locale::En), "$1,250.50");
/// assert_eq!(format_currency(850_000.0, "EUR", Locale::De), "850.000,00\u{a0}€");
/// assert_eq!(format_currency(1_500.0, "JPY", Locale::En), "¥1,500");
/// ```
#[must_use]
pub fn format_currency(amount: f64, currency_code: &str, locale: Locale) -> String {
    let (symbol, minor_units) = currency_info(currency_code);
    let number = format_decimal(amount, minor_units, false, locale);
    place_symbol(&number, &symbol, locale)
}

/// Format a listing price: whole currency units only.
#[must_use]
pub fn format_price(amount: f64, currency_code: &str, locale: Locale) -> String {
    let (symbol, _) = currency_info(currency_code);
    let number = format_decimal(amount, 0, false, locale);
    place_symbol(&number, &symbol, locale)
}

/// Format a surface in square meters, e.g. `320 m²`.
#[must_use]
pub fn format_area(square_meters: f64, locale: Locale) -> String {
    format!("{} m²", format_decimal(square_meters, 2, true, locale))
}

/// Format a percentage. `value` is already in percent (`12.5` → `12.5%`).
#[must_use]
pub fn format_percentage(value: f64, locale: Locale) -> String {
    let number = format_decimal(value, 2, true, locale);
    match locale {
        Locale::En | Locale::Pt => format!("{number}%"),
        Locale::Es | Locale::De => format!("{number}\u{a0}%"),
    }
}

/// Abbreviations for thousands, millions and billions.
const fn compact_suffixes(locale: Locale) -> [Option<&'static str>; 3] {
    match locale {
        Locale::En => [Some("K"), Some("M"), Some("B")],
        Locale::Pt => [Some("\u{a0}mil"), Some("\u{a0}M"), Some("\u{a0}mM")],
        Locale::Es => [Some("\u{a0}mil"), Some("\u{a0}M"), Some("\u{a0}mil\u{a0}M")],
        // German does not abbreviate thousands
        Locale::De => [None, Some("\u{a0}Mio."), Some("\u{a0}Mrd.")],
    }
}

/// Format a number in short compact notation (`1.2K`, `3,4 Mio.`), with at
/// most one fraction digit.
#[must_use]
#[allow(clippy::float_arithmetic)]
pub fn format_compact_number(value: f64, locale: Locale) -> String {
    /// Thousand, million, billion
    const SCALES: [f64; 3] = [1e3, 1e6, 1e9];

    if !value.is_finite() {
        return value.to_string();
    }

    let units: Vec<(f64, Option<&str>)> =
        SCALES.into_iter().zip(compact_suffixes(locale)).collect();
    let mut position = units.iter().rposition(|(scale, _)| value.abs() >= *scale);

    // Bump to the next unit when rounding reaches 1000 of the current one
    if let Some(index) = position
        && let Some((scale, _)) = units.get(index)
        && index + 1 < units.len()
        && round_one_decimal(value / scale).abs() >= 1000.0
    {
        position = Some(index + 1);
    }

    match position.and_then(|index| units.get(index)) {
        Some(&(scale, Some(suffix))) => {
            format!("{}{suffix}", format_decimal(round_one_decimal(value / scale), 1, true, locale))
        }
        _ => format_decimal(value, 0, false, locale),
    }
}

/// Round half away from zero to one decimal place.
#[allow(clippy::float_arithmetic)]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Price per square meter, rounded to whole units.
///
/// `None` when `area` is not a positive number.
#[must_use]
#[allow(clippy::float_arithmetic)]
pub fn price_per_sqm(price: f64, area: f64) -> Option<f64> {
    if !price.is_finite() || !area.is_finite() || area <= 0.0 {
        return None;
    }
    Some((price / area).round())
}
