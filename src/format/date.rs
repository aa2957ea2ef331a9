//! Long-form date formatting

use chrono::{
    Datelike,
    NaiveDate,
};

use crate::locale::Locale;

/// Month names, January first.
const fn month_names(locale: Locale) -> [&'static str; 12] {
    match locale {
        Locale::Pt => [
            "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
            "setembro", "outubro", "novembro", "dezembro",
        ],
        Locale::En => [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ],
        Locale::Es => [
            "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
            "septiembre", "octubre", "noviembre", "diciembre",
        ],
        Locale::De => [
            "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
            "Oktober", "November", "Dezember",
        ],
    }
}

/// Format `date` with the month spelled out, e.g. `19 de outubro de 2026`
/// or `October 19, 2026`.
#[must_use]
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    let names = month_names(locale);
    let month = names.get(date.month0() as usize).copied().unwrap_or_default();
    let (day, year) = (date.day(), date.year());

    match locale {
        Locale::Pt | Locale::Es => format!("{day} de {month} de {year}"),
        Locale::En => format!("{month} {day}, {year}"),
        Locale::De => format!("{day}. {month} {year}"),
    }
}

/// Parse an ISO date (`2026-10-19`, optionally followed by a `T` time part)
/// and format it with [`format_date`].
///
/// Returns `None` for anything that is not a valid calendar date.
#[must_use]
pub fn parse_and_format_date(input: &str, locale: Locale) -> Option<String> {
    let input = input.trim();
    let date_part = input.split_once('T').map_or(input, |(date, _)| date);

    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(format_date(date, locale)),
        Err(e) => {
            tracing::debug!(input, error = %e, "Invalid date");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Locale::Pt, "19 de outubro de 2026")]
    #[case(Locale::En, "October 19, 2026")]
    #[case(Locale::Es, "19 de octubre de 2026")]
    #[case(Locale::De, "19. Oktober 2026")]
    fn long_dates(#[case] locale: Locale, #[case] expected: &str) {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert_eq!(format_date(date, locale), expected);
    }

    #[rstest]
    #[case("2024-03-01", Locale::De, Some("1. März 2024"))]
    #[case("2024-01-15T10:30:00Z", Locale::En, Some("January 15, 2024"))]
    #[case(" 2024-12-31 ", Locale::Pt, Some("31 de dezembro de 2024"))]
    #[case("2024-02-30", Locale::En, None)]
    #[case("15/01/2024", Locale::Es, None)]
    #[case("", Locale::Es, None)]
    fn parse_then_format(
        #[case] input: &str,
        #[case] locale: Locale,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(parse_and_format_date(input, locale).as_deref(), expected);
    }
}
