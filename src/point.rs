use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::geom::Coordinate;

/// One geo-tagged measurement as supplied by the data layer.
///
/// `raw` keeps the full source record so the renderer can label it and the
/// best-network aggregator can read individual metrics from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Value of the currently displayed metric, if the record has one.
    #[serde(default)]
    pub value: Option<f64>,
    /// Grouping key for comparisons, e.g. operator or provider name.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub raw: Value,
}

impl MetricPoint {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, category: impl Into<String>) -> Self {
        Self { id: id.into(), lat, lng, value: None, category: category.into(), raw: Value::Null }
    }

    /// Set the displayed value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach the source record.
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = raw;
        self
    }

    #[inline] pub fn coordinate(&self) -> Coordinate { Coordinate::new(self.lat, self.lng) }

    /// Read a numeric field from `raw`, falling back to a case-insensitive key
    /// match. Numeric strings are accepted; missing, null, non-numeric and
    /// non-finite values all read as `None`.
    pub fn metric(&self, key: &str) -> Option<f64> {
        let field = self.raw.get(key).or_else(|| {
            self.raw.as_object()?.iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| value)
        })?;
        let value = match field {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Accept ids given either as JSON strings or numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number id, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metric_lookup() {
        let point = MetricPoint::new("p", 0.0, 0.0, "a")
            .with_raw(json!({ "rsrp": -95.5, "rsrq": "-11", "sinr": null, "cqi": "n/a" }));
        assert_eq!(point.metric("rsrp"), Some(-95.5));
        assert_eq!(point.metric("rsrq"), Some(-11.0));
        assert_eq!(point.metric("sinr"), None);
        assert_eq!(point.metric("cqi"), None);
        assert_eq!(point.metric("missing"), None);
    }

    #[test]
    fn metric_key_falls_back_to_case_insensitive() {
        let point = MetricPoint::new("p", 0.0, 0.0, "a").with_raw(json!({ "RSRP": -100, "rsrq": -9 }));
        assert_eq!(point.metric("rsrp"), Some(-100.0));
        assert_eq!(point.metric("rsrq"), Some(-9.0));
    }

    #[test]
    fn metric_on_non_object_raw() {
        assert_eq!(MetricPoint::new("p", 0.0, 0.0, "a").metric("rsrp"), None);
    }

    #[test]
    fn metric_rejects_non_finite_strings() {
        let point = MetricPoint::new("p", 0.0, 0.0, "a").with_raw(json!({ "rsrp": "NaN" }));
        assert_eq!(point.metric("rsrp"), None);
    }

    #[test]
    fn deserialize_with_numeric_id() {
        let point: MetricPoint = serde_json::from_value(json!({
            "id": 17, "lat": 1.0, "lng": 2.0, "category": "Op", "raw": { "rsrp": -80 }
        })).unwrap();
        assert_eq!(point.id, "17");
        assert_eq!(point.value, None);
        assert_eq!(point.metric("rsrp"), Some(-80.0));
    }

    #[test]
    fn deserialize_rejects_object_id() {
        let result = serde_json::from_value::<MetricPoint>(json!({ "id": {}, "lat": 0.0, "lng": 0.0 }));
        assert!(result.is_err());
    }
}
