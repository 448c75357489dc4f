//! Viewport culling: reduce the loaded point and polygon sets to what the
//! map can currently show, under hard count ceilings.
//!
//! Filtering is a pure function of its inputs. Callers invoke it once the map
//! has settled after a pan or zoom, not on every animation frame.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::geom::{intersects, point_in_polygon_with_holes, BoundingBox, Coordinate, Polygon};
use crate::point::MetricPoint;

/// The visible map area as reported by the map widget.
///
/// `east < west` means the view crosses the antimeridian.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    #[serde(default)]
    pub zoom: u32,
}

impl Viewport {
    pub const fn new(north: f64, south: f64, east: f64, west: f64, zoom: u32) -> Self {
        Self { north, south, east, west, zoom }
    }

    #[inline] pub fn wraps_antimeridian(&self) -> bool { self.east < self.west }

    /// True if all four bounds are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        [self.north, self.south, self.east, self.west].iter().all(|v| v.is_finite())
    }

    /// Inclusive containment. Longitude wraps when the view crosses the
    /// antimeridian.
    pub fn contains(&self, c: &Coordinate) -> bool {
        if c.lat < self.south || c.lat > self.north { return false }
        if self.wraps_antimeridian() {
            c.lng >= self.west || c.lng <= self.east
        } else {
            c.lng >= self.west && c.lng <= self.east
        }
    }

    /// The view as non-wrapping boxes: one normally, two across the
    /// antimeridian (split at ±180°).
    pub(crate) fn boxes(&self) -> SmallVec<[BoundingBox; 2]> {
        if self.wraps_antimeridian() {
            smallvec![
                BoundingBox::new(self.north, self.south, 180.0, self.west),
                BoundingBox::new(self.north, self.south, self.east, -180.0),
            ]
        } else {
            smallvec![BoundingBox::new(self.north, self.south, self.east, self.west)]
        }
    }
}

/// Ceilings and options for [`filter_to_viewport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportLimits {
    /// Maximum number of points returned.
    pub point_cap: usize,
    /// Maximum number of polygons returned.
    pub polygon_cap: usize,
    /// Only keep points that fall inside one of the visible polygons.
    pub restrict_to_inside_polygons: bool,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self { point_cap: 5_000, polygon_cap: 500, restrict_to_inside_polygons: false }
    }
}

/// The subset of points and polygons handed to the renderer, in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VisibleSet<'a> {
    pub points: Vec<&'a MetricPoint>,
    pub polygons: Vec<&'a Polygon>,
}

/// Cull `points` and `polygons` to `viewport` and cap the result sizes.
///
/// With no viewport (the map has not reported one yet) everything is
/// returned unfiltered and uncapped. A viewport with a non-finite bound
/// shows nothing.
pub fn filter_to_viewport<'a>(
    points: &'a [MetricPoint],
    polygons: &'a [Polygon],
    viewport: Option<&Viewport>,
    limits: &ViewportLimits,
) -> VisibleSet<'a> {
    let Some(viewport) = viewport else {
        return VisibleSet { points: points.iter().collect(), polygons: polygons.iter().collect() };
    };

    if !viewport.is_finite() {
        log::debug!("[viewport::filter_to_viewport] Non-finite viewport {:?} shows nothing", viewport);
        return VisibleSet::default();
    }

    let view_boxes = viewport.boxes();
    let visible_polygons: Vec<&Polygon> = polygons.iter()
        .filter(|polygon| polygon.bbox()
            .is_some_and(|bbox| view_boxes.iter().any(|view| intersects(bbox, view))))
        .take(limits.polygon_cap)
        .collect();

    let visible_points: Vec<&MetricPoint> = points.iter()
        .filter(|point| {
            let c = point.coordinate();
            viewport.contains(&c)
                && (!limits.restrict_to_inside_polygons || inside_any(&c, &visible_polygons))
        })
        .take(limits.point_cap)
        .collect();

    log::trace!(
        "[viewport::filter_to_viewport] zoom {}: {}/{} points, {}/{} polygons",
        viewport.zoom, visible_points.len(), points.len(), visible_polygons.len(), polygons.len(),
    );

    VisibleSet { points: visible_points, polygons: visible_polygons }
}

/// Bounding-box pre-check, then the exact test with holes.
fn inside_any(c: &Coordinate, polygons: &[&Polygon]) -> bool {
    polygons.iter().any(|polygon| {
        polygon.bbox().is_some_and(|bbox| bbox.contains(c)) && point_in_polygon_with_holes(c, polygon)
    })
}
