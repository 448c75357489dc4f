//! Runtime configuration, loadable from JSON.
//!
//! Every section has defaults, so an empty object `{}` is a valid config.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{ColorBand, ColorScale};
use crate::network::{NetworkConfig, ScoreWeights};
use crate::viewport::ViewportLimits;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: ViewportLimits,
    pub network: NetworkConfig,
    /// Default composite score weights, keyed by metric.
    pub weights: ScoreWeights,
    /// Color bands per metric name. Metrics without an entry fall back to
    /// the built-in presets.
    pub bands: BTreeMap<String, Vec<ColorBand>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: ViewportLimits::default(),
            network: NetworkConfig::default(),
            weights: ScoreWeights::defaults(),
            bands: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .context("[config::from_json_str] Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config::from_path] Failed to read {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("[config::from_path] Invalid config in {}", path.display()))
    }

    /// Reject settings that would make scoring or coloring meaningless.
    pub fn validate(&self) -> Result<()> {
        self.network.validate().context("[config::validate] Invalid network section")?;
        let keys: BTreeSet<&str> = self.network.metrics.iter().map(|m| m.key.as_str()).collect();

        for (key, weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                bail!("[config::validate] Weight for {:?} must be a non-negative number, got {}", key, weight);
            }
            if !keys.contains(key) {
                log::warn!("[config::validate] Weight for {:?} has no matching metric and is ignored", key);
            }
        }

        for (metric, bands) in &self.bands {
            for band in bands {
                if !band.min.is_finite() || !band.max.is_finite() || band.min > band.max {
                    bail!("[config::validate] Band {:?} for {:?} has an invalid range [{}, {}]",
                        band.color, metric, band.min, band.max);
                }
            }
        }

        if self.viewport.point_cap == 0 || self.viewport.polygon_cap == 0 {
            log::warn!("[config::validate] A zero viewport cap hides all geometry of that kind");
        }

        Ok(())
    }

    /// Bands for `metric`: configured ones first, then the built-in preset.
    pub fn bands_for(&self, metric: &str) -> Option<Vec<ColorBand>> {
        self.bands.get(metric).cloned().or_else(|| ColorBand::preset(metric))
    }

    /// Compiled color scale for `metric`. Unknown metrics get an empty scale,
    /// which colors everything with the default color.
    pub fn color_scale(&self, metric: &str) -> ColorScale {
        ColorScale::compile(&self.bands_for(metric).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_COLOR;
    use crate::network::TieBreak;
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.weights.weight("rsrp"), 50.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json_str(r#"{
            "viewport": { "point_cap": 10 },
            "network": { "cell_size": 0.001, "tie_break": "first_seen" },
            "weights": { "rsrp": 100 }
        }"#).unwrap();
        assert_eq!(config.viewport.point_cap, 10);
        assert_eq!(config.viewport.polygon_cap, ViewportLimits::default().polygon_cap);
        assert_eq!(config.network.cell_size, 0.001);
        assert_eq!(config.network.tie_break, TieBreak::FirstSeen);
        assert_eq!(config.network.metrics.len(), 3);
        assert_eq!(config.weights.weight("rsrq"), 0.0);
    }

    #[test]
    fn rejects_bad_cell_size() {
        let err = Config::from_json_str(r#"{ "network": { "cell_size": 0 } }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("cell_size"));
    }

    #[test]
    fn rejects_degenerate_metric_and_duplicates() {
        assert!(Config::from_json_str(r#"{ "network": { "metrics": [
            { "key": "rsrp", "min": -44, "max": -140 }
        ] } }"#).is_err());
        assert!(Config::from_json_str(r#"{ "network": { "metrics": [
            { "key": "rsrp", "min": -140, "max": -44 },
            { "key": "rsrp", "min": -140, "max": -44 }
        ] } }"#).is_err());
    }

    #[test]
    fn rejects_negative_weight_and_inverted_band() {
        assert!(Config::from_json_str(r#"{ "weights": { "rsrp": -5 } }"#).is_err());
        assert!(Config::from_json_str(r##"{ "bands": { "rsrp": [
            { "min": -60, "max": -90, "color": "#fff" }
        ] } }"##).is_err());
    }

    #[test]
    fn configured_bands_override_presets() {
        let config = Config::from_json_str(r##"{ "bands": { "rsrp": [
            { "min": -200, "max": 0, "color": "#123456" }
        ] } }"##).unwrap();
        assert_eq!(config.color_scale("rsrp").color(-100.0), "#123456");
        assert_eq!(config.color_scale("sinr").color(25.0), "#1a9641");
        assert_eq!(config.color_scale("unknown").color(1.0), DEFAULT_COLOR);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "viewport": {{ "restrict_to_inside_polygons": true }} }}"#).unwrap();
        let config = Config::from_path(file.path()).unwrap();
        assert!(config.viewport.restrict_to_inside_polygons);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::from_path("/nonexistent/signalmap.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/signalmap.json"));
    }
}
