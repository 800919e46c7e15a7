//! One row of the CLUE business establishments dataset.

use std::str::FromStr;

use crate::point::Point;

/// A business establishment located at a point.
///
/// Fields appear here in dataset column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub census_year: i32,
    pub block_id: i32,
    pub property_id: i32,
    pub base_property_id: i32,
    pub clue_small_area: String,
    pub trading_name: String,
    pub industry_code: i32,
    pub industry_description: String,
    pub point: Point,
    pub location: String,
}

impl Record {
    pub const NUM_FIELDS: usize = 11;

    /// Builds a record from its fields in column order.
    ///
    /// Missing trailing fields are empty, and numbers that fail to parse
    /// are zero. Fields past the eleventh are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Record
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or("");
        Record {
            census_year: parse_or_zero(next()),
            block_id: parse_or_zero(next()),
            property_id: parse_or_zero(next()),
            base_property_id: parse_or_zero(next()),
            clue_small_area: next().to_string(),
            trading_name: next().to_string(),
            industry_code: parse_or_zero(next()),
            industry_description: next().to_string(),
            point: {
                let x = parse_or_zero(next());
                let y = parse_or_zero(next());
                Point::new(x, y)
            },
            location: next().to_string(),
        }
    }
}

/// Parses `text` (surrounding whitespace ignored), or returns zero.
pub fn parse_or_zero<N: FromStr + Default>(text: &str) -> N {
    text.trim().parse().unwrap_or_default()
}
