use wasm_bindgen::prelude::*;

mod analysis;
mod common;
mod logger;
mod polygons;
mod scale;

pub use analysis::{compute_best_network, filter_to_viewport, visible_geojson};
pub use polygons::{parse_wkt, WasmPolygonSet};
pub use scale::WasmColorScale;

/// Called automatically when the WASM module is instantiated.
/// Routes panics and `log` records to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level: "error", "warn", "info", "debug", "trace" or "off".
#[wasm_bindgen(js_name = "set_log_level")]
pub fn set_log_level(level: String) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level.parse()
        .map_err(|_| common::js_err(format!("Unknown log level {:?}", level)))?;
    log::set_max_level(filter);
    Ok(())
}
