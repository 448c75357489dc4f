use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize to a plain JS value. Maps become objects rather than `Map`s so
/// `raw` records and GeoJSON round-trip the way JS callers expect.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| e.into())
}

#[inline]
pub(crate) fn is_nullish(value: &JsValue) -> bool {
    value.is_null() || value.is_undefined()
}

/// Deserialize a JS value; `null` and `undefined` give `T::default()`.
pub(crate) fn from_js_or_default<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> Result<T> {
    if is_nullish(&value) { return Ok(T::default()) }
    from_js(value, what)
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| anyhow!("Invalid {}: {}", what, e))
}
