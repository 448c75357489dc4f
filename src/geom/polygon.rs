use std::fmt;

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

use crate::geom::bbox::{compute_bounding_box, BoundingBox};

/// A geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline] pub const fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// True if both ordinates are finite numbers.
    #[inline] pub fn is_finite(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }

    /// True if both ordinates differ by at most `eps`.
    #[inline]
    pub(crate) fn approx_eq(&self, other: &Coordinate, eps: f64) -> bool {
        (self.lat - other.lat).abs() <= eps && (self.lng - other.lng).abs() <= eps
    }
}

impl From<Coordinate> for Coord<f64> {
    /// `geo` works in (x, y) = (lng, lat).
    fn from(c: Coordinate) -> Self { Coord { x: c.lng, y: c.lat } }
}

impl From<Coord<f64>> for Coordinate {
    fn from(c: Coord<f64>) -> Self { Coordinate { lat: c.y, lng: c.x } }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// One boundary loop of a polygon, stored open (the closing vertex is not
/// repeated).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Coordinate>);

impl Ring {
    #[inline] pub fn new(coords: Vec<Coordinate>) -> Self { Self(coords) }

    #[inline] pub fn len(&self) -> usize { self.0.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

    #[inline] pub fn coords(&self) -> &[Coordinate] { &self.0 }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &Coordinate> { self.0.iter() }

    /// Convert to a closed `geo::LineString` in (lng, lat) order.
    pub fn to_line_string(&self) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = self.0.iter().map(|&c| c.into()).collect();
        if let Some(&first) = coords.first() {
            coords.push(first);
        }
        LineString(coords)
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(coords: Vec<Coordinate>) -> Self { Self(coords) }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// A polygon with an outer boundary and zero or more holes.
///
/// The bounding box of the outer ring is computed once on construction and
/// cached; fields are private so it can never drift from the geometry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    id: String,
    outer: Ring,
    holes: Vec<Ring>,
    bbox: Option<BoundingBox>,
}

impl Polygon {
    /// Build a polygon, caching the bounding box of `outer`.
    /// Holes are assumed to lie inside the outer ring and are not verified.
    pub fn new(id: impl Into<String>, outer: Ring, holes: Vec<Ring>) -> Self {
        let bbox = compute_bounding_box(&outer);
        Self { id: id.into(), outer, holes, bbox }
    }

    #[inline] pub fn id(&self) -> &str { &self.id }

    #[inline] pub fn outer(&self) -> &Ring { &self.outer }

    #[inline] pub fn holes(&self) -> &[Ring] { &self.holes }

    /// Cached bounding box of the outer ring; `None` if it has no finite vertex.
    #[inline] pub fn bbox(&self) -> Option<&BoundingBox> { self.bbox.as_ref() }

    /// Convert to a `geo::Polygon` in (lng, lat) order.
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(
            self.outer.to_line_string(),
            self.holes.iter().map(Ring::to_line_string).collect(),
        )
    }
}
