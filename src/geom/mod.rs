mod bbox;
mod contains;
mod polygon;

pub use bbox::{compute_bounding_box, intersects, intersects_opt, BoundingBox};
pub use contains::{point_in_polygon_with_holes, point_in_ring};
pub use polygon::{Coordinate, Polygon, Ring};
