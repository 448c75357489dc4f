#![doc = "signalmap public API"]
mod color;
mod config;
mod geom;
mod io;
mod network;
mod point;
mod viewport;

#[doc(inline)]
pub use geom::{
    compute_bounding_box, intersects, intersects_opt, point_in_polygon_with_holes, point_in_ring,
    BoundingBox, Coordinate, Polygon, Ring,
};

#[doc(inline)]
pub use io::{parse_to_polygons, parse_to_polygons_with_id, visible_to_geojson};

#[doc(inline)]
pub use viewport::{filter_to_viewport, Viewport, ViewportLimits, VisibleSet};

#[doc(inline)]
pub use color::{compile_color_scale, ColorBand, ColorScale, DEFAULT_COLOR};

#[doc(inline)]
pub use network::{
    compute_best_network, AnnotatedPoint, BestNetwork, CategoryPalette, CategoryStats, GridKey,
    MetricDomain, NetworkConfig, PaletteEntry, ScoreWeights, TieBreak, PALETTE,
};

#[doc(inline)]
pub use point::MetricPoint;

#[doc(inline)]
pub use config::Config;
