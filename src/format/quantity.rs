//! Counted nouns and amenity labels for listing cards

use serde::{
    Deserialize,
    Serialize,
};

use crate::locale::Locale;

/// Things a listing counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Noun {
    Bedroom,
    Bathroom,
    ParkingSpace,
}

impl Noun {
    /// `(singular, plural)` label.
    #[must_use]
    pub const fn labels(self, locale: Locale) -> (&'static str, &'static str) {
        match (self, locale) {
            (Self::Bedroom, Locale::Pt) => ("quarto", "quartos"),
            (Self::Bedroom, Locale::En) => ("bedroom", "bedrooms"),
            (Self::Bedroom, Locale::Es) => ("dormitorio", "dormitorios"),
            (Self::Bedroom, Locale::De) => ("Schlafzimmer", "Schlafzimmer"),
            (Self::Bathroom, Locale::Pt) => ("casa de banho", "casas de banho"),
            (Self::Bathroom, Locale::En) => ("bathroom", "bathrooms"),
            (Self::Bathroom, Locale::Es) => ("baño", "baños"),
            (Self::Bathroom, Locale::De) => ("Badezimmer", "Badezimmer"),
            (Self::ParkingSpace, Locale::Pt) => ("vaga", "vagas"),
            (Self::ParkingSpace, Locale::En) => ("parking space", "parking spaces"),
            (Self::ParkingSpace, Locale::Es) => ("plaza", "plazas"),
            (Self::ParkingSpace, Locale::De) => ("Parkplatz", "Parkplätze"),
        }
    }
}

/// Format `count` followed by the singular or plural label for `noun`,
/// e.g. `1 quarto`, `3 bathrooms`.
///
/// Only a count of exactly one takes the singular.
#[must_use]
pub fn format_quantity(count: u32, noun: Noun, locale: Locale) -> String {
    let (singular, plural) = noun.labels(locale);
    let label = if count == 1 { singular } else { plural };
    format!("{count} {label}")
}

/// Listing features shown as badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Amenity {
    Pool,
    Garden,
    Balcony,
    Terrace,
    Elevator,
    Parking,
}

impl Amenity {
    pub const ALL: [Self; 6] =
        [Self::Pool, Self::Garden, Self::Balcony, Self::Terrace, Self::Elevator, Self::Parking];

    /// Badge text without a count.
    #[must_use]
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pool, Locale::Pt) => "Piscina",
            (Self::Pool, Locale::En) => "Swimming Pool",
            (Self::Pool, Locale::Es) => "Piscina",
            (Self::Pool, Locale::De) => "Schwimmbad",
            (Self::Garden, Locale::Pt) => "Jardim",
            (Self::Garden, Locale::En) => "Garden",
            (Self::Garden, Locale::Es) => "Jardín",
            (Self::Garden, Locale::De) => "Garten",
            (Self::Balcony, Locale::Pt) => "Varanda",
            (Self::Balcony, Locale::En) => "Balcony",
            (Self::Balcony, Locale::Es) => "Balcón",
            (Self::Balcony, Locale::De) => "Balkon",
            (Self::Terrace, Locale::Pt) => "Terraço",
            (Self::Terrace, Locale::En) => "Terrace",
            (Self::Terrace, Locale::Es) => "Terraza",
            (Self::Terrace, Locale::De) => "Terrasse",
            (Self::Elevator, Locale::Pt) => "Elevador",
            (Self::Elevator, Locale::En) => "Elevator",
            (Self::Elevator, Locale::Es) => "Ascensor",
            (Self::Elevator, Locale::De) => "Aufzug",
            (Self::Parking, Locale::Pt) => "Garagem",
            (Self::Parking, Locale::En) => "Parking",
            (Self::Parking, Locale::Es) => "Garaje",
            (Self::Parking, Locale::De) => "Parkplatz",
        }
    }
}

/// Badge text for `amenity`. Parking carries the number of spaces,
/// e.g. `Garagem (2)`; `parking_count` is ignored for other amenities.
#[must_use]
pub fn format_amenity(amenity: Amenity, parking_count: u32, locale: Locale) -> String {
    let label = amenity.label(locale);
    match amenity {
        Amenity::Parking => format!("{label} ({parking_count})"),
        _ => label.to_string(),
    }
}
