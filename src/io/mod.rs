mod geojson;
mod wkt;

pub use geojson::visible_to_geojson;
pub use wkt::{parse_to_polygons, parse_to_polygons_with_id};
