use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

use crate::geom::{Coordinate, Ring};

/// An axis-aligned box in decimal degrees, with `north >= south`.
///
/// Boxes computed from rings never wrap; `east < west` only ever appears on
/// viewport-derived boxes and is not understood by [`intersects`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    #[inline]
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// Inclusive containment test, without antimeridian handling.
    #[inline]
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.lat >= self.south && point.lat <= self.north
            && point.lng >= self.west && point.lng <= self.east
    }

    /// Convert to a `geo::Rect` in (lng, lat) order. `None` for a box that wraps
    /// the antimeridian, which a `Rect` cannot represent.
    pub fn to_rect(&self) -> Option<Rect<f64>> {
        if self.east < self.west { return None }
        Some(Rect::new(
            Coord { x: self.west, y: self.south },
            Coord { x: self.east, y: self.north },
        ))
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        }
    }
}

/// Compute the bounding box of a ring, skipping non-finite coordinates.
/// Returns `None` if the ring has no finite coordinate at all.
pub fn compute_bounding_box(ring: &Ring) -> Option<BoundingBox> {
    ring.iter()
        .filter(|c| c.is_finite())
        .fold(None, |acc: Option<BoundingBox>, c| Some(match acc {
            None => BoundingBox::new(c.lat, c.lat, c.lng, c.lng),
            Some(b) => BoundingBox {
                north: b.north.max(c.lat),
                south: b.south.min(c.lat),
                east: b.east.max(c.lng),
                west: b.west.min(c.lng),
            },
        }))
}

/// Standard rectangle overlap. Edges that touch count as overlapping.
#[inline]
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.west > b.east || a.east < b.west || a.south > b.north || a.north < b.south)
}

/// Like [`intersects`], but `false` when either box is absent.
#[inline]
pub fn intersects_opt(a: Option<&BoundingBox>, b: Option<&BoundingBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => intersects(a, b),
        _ => false,
    }
}
