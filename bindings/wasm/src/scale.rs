use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use signalmap_core::{ColorBand, ColorScale, DEFAULT_COLOR};

use crate::common::*;

#[wasm_bindgen]
pub struct WasmColorScale {
    inner: ColorScale,
}

impl WasmColorScale {
    pub(crate) fn scale(&self) -> &ColorScale { &self.inner }
}

#[wasm_bindgen]
impl WasmColorScale {
    /// bands: [{ min, max, color }, ...]
    #[wasm_bindgen(constructor)]
    pub fn new(bands: JsValue) -> Result<WasmColorScale, JsValue> {
        let bands: Vec<ColorBand> = from_js_or_default(bands, "color bands").map_err(js_err)?;
        Ok(WasmColorScale { inner: ColorScale::compile(&bands) })
    }

    /// Built-in bands for "rsrp", "rsrq" or "sinr".
    pub fn preset(metric: String) -> Result<WasmColorScale, JsValue> {
        let bands = ColorBand::preset(&metric)
            .ok_or_else(|| js_err(format!("No preset color bands for metric {:?}", metric)))?;
        Ok(WasmColorScale { inner: ColorScale::compile(&bands) })
    }

    /// Color for `value`; `undefined`, `null` and NaN give the default color.
    pub fn color(&self, value: Option<f64>) -> String {
        self.inner.color_opt(value).to_string()
    }

    /// Sorted bands as a JS array.
    pub fn bands(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.bands())
    }

    #[wasm_bindgen(js_name = "default_color")]
    pub fn default_color() -> String {
        DEFAULT_COLOR.to_string()
    }
}
