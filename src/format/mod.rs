//! Locale-aware display formatting for listing data

mod date;
mod number;
mod quantity;

pub use date::{
    format_date,
    parse_and_format_date,
};
pub use number::{
    format_area,
    format_compact_number,
    format_currency,
    format_percentage,
    format_price,
    price_per_sqm,
};
pub use quantity::{
    Amenity,
    Noun,
    format_amenity,
    format_quantity,
};
