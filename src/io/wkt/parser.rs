//! Recursive-descent reader over the group tree produced by the lexer.
//!
//! Grammar (after tokenizing):
//!
//! ```text
//! document     := [SRID=n;] keyword [Z|M|ZM] ( EMPTY | group )
//! polygon      := '(' ring { ',' ring } ')'
//! multipolygon := '(' polygon { ',' polygon } ')'
//! ring         := '(' tuple { ',' tuple } ')'
//! tuple        := number number [number [number]]
//! ```
//!
//! Every failure below the document level is local: a bad ring or polygon is
//! skipped and its siblings are still read.

use std::fmt;

use crate::geom::{Coordinate, Polygon, Ring};

use super::lexer::{tokenize, Group, Node};

/// Closing vertices within this distance of the first vertex are dropped.
const CLOSE_EPSILON: f64 = 1e-12;

/// Minimum number of distinct vertices in an accepted ring.
const MIN_RING_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Polygon,
    MultiPolygon,
}

/// Why a ring was rejected. Only ever logged.
#[derive(Debug, PartialEq)]
pub(super) enum RingError {
    Unbalanced,
    NestedGroup,
    BadTuple(usize),
    BadNumber(String),
    TooFewVertices(usize),
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::Unbalanced => write!(f, "unbalanced parentheses"),
            RingError::NestedGroup => write!(f, "unexpected nested group"),
            RingError::BadTuple(n) => write!(f, "coordinate tuple with {} ordinates", n),
            RingError::BadNumber(s) => write!(f, "non-numeric ordinate {:?}", s),
            RingError::TooFewVertices(n) => write!(f, "only {} distinct vertices", n),
        }
    }
}

/// Parse a `POLYGON` or `MULTIPOLYGON` payload. Never fails: anything that
/// cannot be read is skipped and the rest is returned.
pub(crate) fn parse(text: &str, base_id: &str) -> Vec<Polygon> {
    let root = tokenize(strip_srid(text));
    let mut nodes = root.children.iter();

    let kind = match nodes.next() {
        Some(Node::Word(word)) if word.eq_ignore_ascii_case("POLYGON") => Kind::Polygon,
        Some(Node::Word(word)) if word.eq_ignore_ascii_case("MULTIPOLYGON") => Kind::MultiPolygon,
        other => {
            log::debug!("[io::wkt::parse] Unsupported geometry keyword: {:?}", other);
            return Vec::new();
        }
    };

    // Skip dimension tags up to the body; `EMPTY` ends the geometry.
    let body = loop {
        match nodes.next() {
            Some(Node::Group(group)) => break group,
            Some(Node::Word(word)) if word.eq_ignore_ascii_case("EMPTY") => return Vec::new(),
            Some(Node::Word(word)) if is_dimension_tag(word) => continue,
            other => {
                log::debug!("[io::wkt::parse] Expected geometry body, found {:?}", other);
                return Vec::new();
            }
        }
    };

    match kind {
        Kind::Polygon => read_polygon(body, base_id.to_string()).into_iter().collect(),
        Kind::MultiPolygon => body.groups()
            .enumerate()
            .filter_map(|(i, group)| read_polygon(group, format!("{}-{}", base_id, i)))
            .collect(),
    }
}

/// Drop an EWKT `SRID=<n>;` prefix if present.
fn strip_srid(text: &str) -> &str {
    let trimmed = text.trim_start();
    let has_srid = trimmed.get(..5).is_some_and(|head| head.eq_ignore_ascii_case("SRID="));
    match trimmed.split_once(';') {
        Some((_, rest)) if has_srid => rest,
        _ => trimmed,
    }
}

#[inline]
fn is_dimension_tag(word: &str) -> bool {
    ["Z", "M", "ZM"].iter().any(|tag| word.eq_ignore_ascii_case(tag))
}

/// Read one polygon group. The first ring that parses becomes the outer ring.
/// Returns `None` if no ring survives.
fn read_polygon(group: &Group<'_>, id: String) -> Option<Polygon> {
    let mut rings = group.groups().enumerate().filter_map(|(i, ring)| {
        read_ring(ring)
            .inspect_err(|e| log::debug!("[io::wkt::read_polygon] Dropping ring {} of {}: {}", i, id, e))
            .ok()
    });

    let Some(outer) = rings.next() else {
        log::debug!("[io::wkt::read_polygon] Dropping polygon {}: no valid rings", id);
        return None;
    };
    let holes = rings.collect();
    Some(Polygon::new(id, outer, holes))
}

/// Read a ring of `lng lat` tuples into an open ring of (lat, lng) coordinates.
pub(super) fn read_ring(group: &Group<'_>) -> Result<Ring, RingError> {
    if !group.closed { return Err(RingError::Unbalanced) }

    let mut coords = Vec::with_capacity(group.children.len() / 3 + 1);
    let mut tuple: Vec<&str> = Vec::with_capacity(4);

    for node in group.children.iter().chain(std::iter::once(&Node::Comma)) {
        match node {
            Node::Word(word) => tuple.push(word),
            Node::Comma => {
                coords.push(read_tuple(&tuple)?);
                tuple.clear();
            }
            Node::Group(_) => return Err(RingError::NestedGroup),
        }
    }

    if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
        if coords.len() > 1 && first.approx_eq(last, CLOSE_EPSILON) {
            coords.pop();
        }
    }

    if coords.len() < MIN_RING_LEN { return Err(RingError::TooFewVertices(coords.len())) }
    Ok(Ring::new(coords))
}

/// Read `lng lat [z [m]]`, keeping only the horizontal ordinates. Z and M
/// must still be numbers.
fn read_tuple(words: &[&str]) -> Result<Coordinate, RingError> {
    if !(2..=4).contains(&words.len()) { return Err(RingError::BadTuple(words.len())) }
    let lng = read_number(words[0])?;
    let lat = read_number(words[1])?;
    for word in &words[2..] { read_number(word)?; }
    Ok(Coordinate::new(lat, lng))
}

fn read_number(word: &str) -> Result<f64, RingError> {
    word.parse::<f64>().ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RingError::BadNumber(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(text: &str) -> Result<Ring, RingError> {
        let root = tokenize(text);
        match &root.children[0] {
            Node::Group(group) => read_ring(group),
            _ => panic!("expected group"),
        }
    }

    #[test]
    fn ring_drops_closing_vertex() {
        let ring = ring_of("(0 0, 4 0, 4 4, 0 4, 0 0)").unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn ring_keeps_open_input() {
        let ring = ring_of("(0 0, 4 0, 4 4)").unwrap();
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn ring_closing_tolerance() {
        assert_eq!(ring_of("(0 0, 4 0, 4 4, 0 4, 0.0000000000001 0)").unwrap().len(), 4);
        assert_eq!(ring_of("(0 0, 4 0, 4 4, 0 4, 0.000001 0)").unwrap().len(), 5);
    }

    #[test]
    fn ring_errors() {
        assert_eq!(ring_of("(0 0, 1 1, 0 0)"), Err(RingError::TooFewVertices(2)));
        assert_eq!(ring_of("(0 0, 1 x, 2 2, 0 0)"), Err(RingError::BadNumber("x".into())));
        assert_eq!(ring_of("(0 0, 1, 2 2, 0 0)"), Err(RingError::BadTuple(1)));
        assert_eq!(ring_of("(0 0, 1 1, (2 2), 0 0)"), Err(RingError::NestedGroup));
        assert_eq!(ring_of("(0 0, 1 1, 2 2"), Err(RingError::Unbalanced));
        assert_eq!(ring_of("(0 0, NaN 1, 2 2, 0 0)"), Err(RingError::BadNumber("NaN".into())));
    }

    #[test]
    fn ring_rejects_non_numeric_z_and_m() {
        assert_eq!(ring_of("(0 0 x, 1 0 x, 1 1 x, 0 0 x)"), Err(RingError::BadNumber("x".into())));
        assert_eq!(ring_of("(0 0 1 m, 1 0 1 0, 1 1 1 0)"), Err(RingError::BadNumber("m".into())));
    }

    #[test]
    fn ring_accepts_z_and_m() {
        let ring = ring_of("(0 0 10, 4 0 10 1, 4 4 10, 0 0 10)").unwrap();
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn srid_prefix_is_stripped() {
        assert_eq!(strip_srid("SRID=4326;POLYGON EMPTY"), "POLYGON EMPTY");
        assert_eq!(strip_srid("  srid=3857 ; POLYGON"), " POLYGON");
        assert_eq!(strip_srid("POLYGON((0 0; 1 1))"), "POLYGON((0 0; 1 1))");
    }

    #[test]
    fn ring_error_display() {
        assert_eq!(RingError::TooFewVertices(2).to_string(), "only 2 distinct vertices");
    }
}
