use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::point::MetricPoint;

/// Fixed normalization domain for one signal metric.
///
/// Raw readings are rescaled linearly from `[min, max]` onto `[0, 100]` and
/// clamped, so 100 is always "best" regardless of the metric's direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricDomain {
    /// Field name in the point's raw record, also the weight key.
    pub key: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
}

fn default_higher_is_better() -> bool { true }

impl MetricDomain {
    pub fn new(key: impl Into<String>, min: f64, max: f64, higher_is_better: bool) -> Self {
        Self { key: key.into(), min, max, higher_is_better }
    }

    /// Reference signal received power, dBm.
    pub fn rsrp() -> Self { Self::new("rsrp", -140.0, -44.0, true) }

    /// Reference signal received quality, dB.
    pub fn rsrq() -> Self { Self::new("rsrq", -20.0, -3.0, true) }

    /// Signal to interference plus noise ratio, dB.
    pub fn sinr() -> Self { Self::new("sinr", -20.0, 30.0, true) }

    /// The metrics scored when nothing else is configured.
    pub fn defaults() -> Vec<Self> { vec![Self::rsrp(), Self::rsrq(), Self::sinr()] }

    /// True if the domain can rescale anything at all.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Rescale `raw` onto `[0, 100]`. `None` for a non-finite reading or a
    /// degenerate domain.
    pub fn normalize(&self, raw: f64) -> Option<f64> {
        if !raw.is_finite() || !self.is_valid() { return None }
        let t = (raw - self.min) / (self.max - self.min);
        let t = if self.higher_is_better { t } else { 1.0 - t };
        Some((t * 100.0).clamp(0.0, 100.0))
    }
}

/// Relative importance of each metric, keyed by [`MetricDomain::key`].
/// Values are percentages but need not sum to 100.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreWeights(BTreeMap<String, f64>);

impl ScoreWeights {
    pub fn new() -> Self { Self::default() }

    /// Half on RSRP, a quarter each on RSRQ and SINR.
    pub fn defaults() -> Self {
        Self::new().with("rsrp", 50.0).with("rsrq", 25.0).with("sinr", 25.0)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, weight: f64) -> Self {
        self.0.insert(key.into(), weight);
        self
    }

    /// Usable weight for `key`: missing, negative and non-finite weights read
    /// as zero, which removes the metric from scoring.
    #[inline]
    pub fn weight(&self, key: &str) -> f64 {
        self.0.get(key).copied()
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, &w)| (k.as_str(), w))
    }
}

/// Weighted average of the normalized metrics present on `point`.
///
/// Metrics that are missing or unreadable are left out of both the sum and
/// the weight total, so they never drag the score down. `None` when no
/// weighted metric is present.
pub(crate) fn composite_score(point: &MetricPoint, domains: &[MetricDomain], weights: &ScoreWeights) -> Option<f64> {
    let (mut weighted_sum, mut total_weight) = (0.0, 0.0);

    for domain in domains {
        let weight = weights.weight(&domain.key);
        if weight == 0.0 { continue }
        if let Some(score) = point.metric(&domain.key).and_then(|raw| domain.normalize(raw)) {
            weighted_sum += weight * score;
            total_weight += weight;
        }
    }

    (total_weight > 0.0).then(|| weighted_sum / total_weight)
}
