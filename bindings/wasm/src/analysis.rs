use anyhow::Result;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use signalmap_core::{
    CategoryPalette, MetricPoint, NetworkConfig, ScoreWeights, Viewport, ViewportLimits, VisibleSet,
};

use crate::{WasmColorScale, WasmPolygonSet, common::*};

/// Decoded arguments shared by the viewport entry points.
struct ViewportArgs {
    points: Vec<MetricPoint>,
    viewport: Option<Viewport>,
    limits: ViewportLimits,
}

impl ViewportArgs {
    fn from_js(points: JsValue, viewport: JsValue, limits: JsValue) -> Result<Self> {
        Ok(Self {
            points: from_js_or_default(points, "points")?,
            viewport: if is_nullish(&viewport) { None } else { Some(from_js(viewport, "viewport")?) },
            limits: from_js_or_default(limits, "viewport limits")?,
        })
    }

    fn filter<'a>(&'a self, polygons: &'a WasmPolygonSet) -> VisibleSet<'a> {
        signalmap_core::filter_to_viewport(&self.points, polygons.polygons(), self.viewport.as_ref(), &self.limits)
    }
}

/// Cull points and polygons to the viewport.
/// points: [{ id, lat, lng, value?, category?, raw? }, ...]
/// viewport: { north, south, east, west, zoom? } or null for "show everything"
/// limits: { point_cap?, polygon_cap?, restrict_to_inside_polygons? } or null
/// Returns { points, polygons }.
#[wasm_bindgen(js_name = "filter_to_viewport")]
pub fn filter_to_viewport(
    points: JsValue,
    polygons: &WasmPolygonSet,
    viewport: JsValue,
    limits: JsValue,
) -> Result<JsValue, JsValue> {
    let args = ViewportArgs::from_js(points, viewport, limits).map_err(js_err)?;
    to_js(&args.filter(polygons))
}

/// Same culling as `filter_to_viewport`, returned as a GeoJSON
/// FeatureCollection with point colors taken from `scale`.
#[wasm_bindgen(js_name = "visible_geojson")]
pub fn visible_geojson(
    points: JsValue,
    polygons: &WasmPolygonSet,
    viewport: JsValue,
    limits: JsValue,
    scale: &WasmColorScale,
) -> Result<JsValue, JsValue> {
    let args = ViewportArgs::from_js(points, viewport, limits).map_err(js_err)?;
    let geojson = signalmap_core::visible_to_geojson(&args.filter(polygons), scale.scale());

    // Hand over as a JSON string; JSON.parse is faster than walking the value.
    let json_string = serde_json::to_string(&geojson)
        .map_err(|e| js_err(format!("Failed to serialize GeoJSON to string: {}", e)))?;
    js_sys::JSON::parse(&json_string)
        .map_err(|e| js_err(format!("Failed to parse GeoJSON string: {:?}", e)))
}

/// Best category per grid cell.
/// weights: { rsrp: 50, rsrq: 25, sinr: 25 } or null for the defaults
/// config: { cell_size?, metrics?, tie_break? } or null
/// palette: [{ category, color }, ...] from a previous call, or null
/// Returns { points, stats, palette, scored_cells }.
#[wasm_bindgen(js_name = "compute_best_network")]
pub fn compute_best_network(
    points: JsValue,
    weights: JsValue,
    config: JsValue,
    palette: JsValue,
) -> Result<JsValue, JsValue> {
    let points: Vec<MetricPoint> = from_js_or_default(points, "points").map_err(js_err)?;
    let weights: ScoreWeights = if is_nullish(&weights) {
        ScoreWeights::defaults()
    } else {
        from_js(weights, "weights").map_err(js_err)?
    };
    let config: NetworkConfig = from_js_or_default(config, "network config").map_err(js_err)?;
    let palette: CategoryPalette = from_js_or_default(palette, "palette").map_err(js_err)?;
    config.validate().map_err(js_err)?;

    let result = signalmap_core::compute_best_network(&points, &weights, &config, palette);
    to_js(&result)
}
