//! Well-Known Text polygon reader.
mod lexer;
mod parser;

use crate::geom::Polygon;

/// Base id used by [`parse_to_polygons`].
const DEFAULT_BASE_ID: &str = "polygon";

/// Parse a `POLYGON` or `MULTIPOLYGON` WKT payload into polygons in
/// (lat, lng) order.
///
/// Malformed rings and polygons are dropped; this never fails and returns an
/// empty vector if nothing could be read.
pub fn parse_to_polygons(text: &str) -> Vec<Polygon> {
    parse_to_polygons_with_id(text, DEFAULT_BASE_ID)
}

/// Like [`parse_to_polygons`], deriving polygon ids from `base_id`.
///
/// A `POLYGON` gets `base_id` itself. Each `MULTIPOLYGON` member gets
/// `{base_id}-{n}`, where `n` is its position in the payload.
pub fn parse_to_polygons_with_id(text: &str, base_id: &str) -> Vec<Polygon> {
    parser::parse(text, base_id)
}
