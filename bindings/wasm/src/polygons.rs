use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use signalmap_core::Polygon;

use crate::common::*;

/// Parse WKT text into a JS array of polygons (`{ id, outer, holes, bbox }`).
/// Malformed input yields an empty array.
#[wasm_bindgen(js_name = "parse_wkt")]
pub fn parse_wkt(text: String, base_id: Option<String>) -> Result<JsValue, JsValue> {
    let polygons = match base_id {
        Some(base_id) => signalmap_core::parse_to_polygons_with_id(&text, &base_id),
        None => signalmap_core::parse_to_polygons(&text),
    };
    to_js(&polygons)
}

/// Parsed polygons kept on the Rust side so repeated viewport filtering does
/// not copy geometry across the boundary.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmPolygonSet {
    inner: Vec<Polygon>,
}

impl WasmPolygonSet {
    pub(crate) fn polygons(&self) -> &[Polygon] { &self.inner }
}

#[wasm_bindgen]
impl WasmPolygonSet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmPolygonSet {
        WasmPolygonSet::default()
    }

    /// Parse and append the polygons in `text`. Returns how many were added.
    pub fn add_wkt(&mut self, text: String, base_id: Option<String>) -> usize {
        let parsed = match base_id {
            Some(base_id) => signalmap_core::parse_to_polygons_with_id(&text, &base_id),
            None => signalmap_core::parse_to_polygons(&text),
        };
        let added = parsed.len();
        self.inner.extend(parsed);
        added
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Result<JsValue, JsValue> {
        let ids: Vec<&str> = self.inner.iter().map(|p| p.id()).collect();
        to_js(&ids)
    }

    /// All polygons as a JS array.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner)
    }
}
