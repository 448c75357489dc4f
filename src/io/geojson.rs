use serde_json::{json, Map, Value};

use crate::color::ColorScale;
use crate::geom::{Polygon, Ring};
use crate::point::MetricPoint;
use crate::viewport::VisibleSet;

/// Export a visible set as a GeoJSON FeatureCollection, polygons first.
///
/// Point features carry `id`, `value`, `category` and the `color` picked by
/// `scale`; polygon features carry their `id`. Coordinates are `[lng, lat]`
/// and rings are closed. Features with non-finite coordinates are left out.
pub fn visible_to_geojson(visible: &VisibleSet<'_>, scale: &ColorScale) -> Value {
    let mut features = Vec::with_capacity(visible.polygons.len() + visible.points.len());

    for polygon in &visible.polygons {
        let Some(geometry) = polygon_to_geojson(polygon) else {
            log::debug!("[visible_to_geojson] Skipping polygon {}: non-finite vertex", polygon.id());
            continue;
        };
        features.push(json!({
            "type": "Feature",
            "id": polygon.id(),
            "geometry": geometry,
            "properties": { "id": polygon.id() },
        }));
    }

    for point in &visible.points {
        if !point.coordinate().is_finite() {
            log::debug!("[visible_to_geojson] Skipping point {}: non-finite coordinate", point.id);
            continue;
        }
        features.push(point_to_geojson(point, scale));
    }

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn point_to_geojson(point: &MetricPoint, scale: &ColorScale) -> Value {
    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(point.id));
    properties.insert("value".to_string(), json!(point.value.filter(|v| v.is_finite())));
    properties.insert("category".to_string(), json!(point.category));
    properties.insert("color".to_string(), json!(scale.color_opt(point.value)));

    json!({
        "type": "Feature",
        "id": point.id,
        "geometry": { "type": "Point", "coordinates": [point.lng, point.lat] },
        "properties": properties,
    })
}

/// `None` if any ring has a non-finite vertex.
fn polygon_to_geojson(polygon: &Polygon) -> Option<Value> {
    let rings = std::iter::once(polygon.outer())
        .chain(polygon.holes())
        .map(ring_to_geojson)
        .collect::<Option<Vec<_>>>()?;
    Some(json!({ "type": "Polygon", "coordinates": rings }))
}

/// `[[lng, lat], ...]` with the first vertex repeated at the end.
fn ring_to_geojson(ring: &Ring) -> Option<Vec<[f64; 2]>> {
    if !ring.iter().all(|c| c.is_finite()) { return None }
    let mut coords: Vec<[f64; 2]> = ring.iter().map(|c| [c.lng, c.lat]).collect();
    if let Some(&first) = coords.first() {
        if coords.last() != Some(&first) { coords.push(first) }
    }
    Some(coords)
}
