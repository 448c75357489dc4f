//! Threshold color scales for measurement values.

use serde::{Deserialize, Serialize};

/// Color returned when no band matches or the value is not a number.
pub const DEFAULT_COLOR: &str = "#969696";

/// One threshold band. Both bounds are inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub min: f64,
    pub max: f64,
    pub color: String,
}

impl ColorBand {
    pub fn new(min: f64, max: f64, color: impl Into<String>) -> Self {
        Self { min, max, color: color.into() }
    }

    #[inline] pub fn contains(&self, value: f64) -> bool { value >= self.min && value <= self.max }

    /// Built-in bands for common radio metrics (`rsrp`, `rsrq`, `sinr`),
    /// matched case-insensitively. `None` for anything else.
    pub fn preset(metric: &str) -> Option<Vec<ColorBand>> {
        // (min, max, color) from worst to best. Neighbouring bands share a
        // bound; the lower band wins there because it sorts first.
        const RSRP: &[(f64, f64, &str)] = &[
            (-140.0, -110.0, "#d7191c"),
            (-110.0, -100.0, "#fdae61"),
            (-100.0, -90.0,  "#ffffbf"),
            (-90.0,  -80.0,  "#a6d96a"),
            (-80.0,  -44.0,  "#1a9641"),
        ];
        const RSRQ: &[(f64, f64, &str)] = &[
            (-20.0, -15.0, "#d7191c"),
            (-15.0, -10.0, "#fdae61"),
            (-10.0, -5.0,  "#a6d96a"),
            (-5.0,  -3.0,  "#1a9641"),
        ];
        const SINR: &[(f64, f64, &str)] = &[
            (-20.0, 0.0,  "#d7191c"),
            (0.0,   13.0, "#fdae61"),
            (13.0,  20.0, "#a6d96a"),
            (20.0,  40.0, "#1a9641"),
        ];

        let table = match metric.to_ascii_lowercase().as_str() {
            "rsrp" => RSRP,
            "rsrq" => RSRQ,
            "sinr" => SINR,
            _ => return None,
        };
        Some(table.iter().map(|&(min, max, color)| ColorBand::new(min, max, color)).collect())
    }
}

/// A compiled, immutable band lookup. Build a new one whenever the band
/// configuration changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorScale {
    bands: Vec<ColorBand>,
}

impl ColorScale {
    /// Sort `bands` by lower bound once. The sort is stable, so bands with
    /// equal `min` keep their configured order. A NaN bound sorts last and
    /// never matches.
    pub fn compile(bands: &[ColorBand]) -> Self {
        let mut bands = bands.to_vec();
        bands.sort_by(|a, b| a.min.total_cmp(&b.min));
        Self { bands }
    }

    /// Color of the first band containing `value`, or [`DEFAULT_COLOR`].
    pub fn color(&self, value: f64) -> &str {
        if !value.is_finite() { return DEFAULT_COLOR }
        self.bands.iter()
            .find(|band| band.contains(value))
            .map_or(DEFAULT_COLOR, |band| band.color.as_str())
    }

    /// Like [`ColorScale::color`], with a missing value mapping to the default.
    #[inline]
    pub fn color_opt(&self, value: Option<f64>) -> &str {
        value.map_or(DEFAULT_COLOR, |v| self.color(v))
    }

    #[inline] pub fn bands(&self) -> &[ColorBand] { &self.bands }
}

/// Compile `bands` into a value → color function.
pub fn compile_color_scale(bands: &[ColorBand]) -> impl Fn(f64) -> String + Clone + use<> {
    let scale = ColorScale::compile(bands);
    move |value| scale.color(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_green() -> Vec<ColorBand> {
        vec![ColorBand::new(-120.0, -90.0, "red"), ColorBand::new(-89.0, -60.0, "green")]
    }

    #[test]
    fn max_is_inclusive_and_gaps_use_default() {
        let color = compile_color_scale(&red_green());
        assert_eq!(color(-90.0), "red");
        assert_eq!(color(-120.0), "red");
        assert_eq!(color(-89.0), "green");
        assert_eq!(color(-89.5), DEFAULT_COLOR);
        assert_eq!(color(-91.0), "red");
        assert_eq!(color(-121.0), DEFAULT_COLOR);
    }

    #[test]
    fn non_finite_values_use_default() {
        let scale = ColorScale::compile(&red_green());
        assert_eq!(scale.color(f64::NAN), DEFAULT_COLOR);
        assert_eq!(scale.color(f64::NEG_INFINITY), DEFAULT_COLOR);
        assert_eq!(scale.color_opt(None), DEFAULT_COLOR);
    }

    #[test]
    fn bands_are_sorted_and_first_match_wins() {
        let scale = ColorScale::compile(&[
            ColorBand::new(0.0, 10.0, "late"),
            ColorBand::new(-5.0, 5.0, "early"),
        ]);
        assert_eq!(scale.bands()[0].color, "early");
        assert_eq!(scale.color(3.0), "early");
        assert_eq!(scale.color(7.0), "late");
    }

    #[test]
    fn nan_bounds_do_not_panic_and_never_match() {
        let scale = ColorScale::compile(&[
            ColorBand::new(f64::NAN, 1.0, "broken"),
            ColorBand::new(0.0, 1.0, "ok"),
        ]);
        assert_eq!(scale.color(0.5), "ok");
    }

    #[test]
    fn empty_scale() {
        assert_eq!(ColorScale::compile(&[]).color(1.0), DEFAULT_COLOR);
    }

    #[test]
    fn presets() {
        let rsrp = ColorScale::compile(&ColorBand::preset("RSRP").unwrap());
        assert_eq!(rsrp.color(-70.0), "#1a9641");
        assert_eq!(rsrp.color(-130.0), "#d7191c");
        assert_eq!(rsrp.color(-110.0), "#d7191c");
        assert_eq!(rsrp.color(-109.5), "#fdae61");
        assert!(ColorBand::preset("cqi").is_none());
    }
}
