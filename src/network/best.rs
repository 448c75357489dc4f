use std::collections::BTreeSet;

use ahash::AHashMap;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::network::grid::{GridKey, DEFAULT_CELL_SIZE};
use crate::network::metric::{composite_score, MetricDomain, ScoreWeights};
use crate::network::palette::CategoryPalette;
use crate::point::MetricPoint;

/// How to pick a cell winner when two categories have the same average.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Smallest category name wins. Independent of input order.
    #[default]
    Lexicographic,
    /// The category seen first in the input wins.
    FirstSeen,
}

/// Settings for [`compute_best_network`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Grid spacing in degrees.
    pub cell_size: f64,
    /// Metrics that make up the composite score.
    pub metrics: Vec<MetricDomain>,
    pub tie_break: TieBreak,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            metrics: MetricDomain::defaults(),
            tie_break: TieBreak::default(),
        }
    }
}

impl NetworkConfig {
    /// Reject a cell size that is not a positive finite number, and metric
    /// domains that are degenerate or defined twice.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            bail!("[network::validate] cell_size must be a positive finite number, got {}", self.cell_size);
        }
        let mut keys = BTreeSet::new();
        for metric in &self.metrics {
            if !metric.is_valid() {
                bail!("[network::validate] Metric {:?} has an empty or non-finite domain [{}, {}]",
                    metric.key, metric.min, metric.max);
            }
            if !keys.insert(metric.key.as_str()) {
                bail!("[network::validate] Metric {:?} is defined more than once", metric.key);
            }
        }
        Ok(())
    }
}

/// A point with its cell, score and display annotations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedPoint<'a> {
    #[serde(flatten)]
    pub point: &'a MetricPoint,
    /// Composite score in `[0, 100]`; `None` if no weighted metric was usable.
    pub score: Option<f64>,
    /// `None` for points with non-finite coordinates.
    pub cell: Option<GridKey>,
    /// The point's category is the winner of its cell.
    pub is_best: bool,
    pub color: String,
}

/// Summary for one category over the whole input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub color: String,
    /// Input points in this category.
    pub points: usize,
    /// Points that produced a composite score.
    pub scored_points: usize,
    /// Mean composite score over scored points.
    pub mean_score: Option<f64>,
    /// Cells where this category has at least one scored point.
    pub cells: usize,
    /// Cells this category won.
    pub cells_won: usize,
}

impl CategoryStats {
    /// Share of contested cells won, in percent.
    pub fn win_rate(&self) -> Option<f64> {
        (self.cells > 0).then(|| self.cells_won as f64 * 100.0 / self.cells as f64)
    }
}

/// Result of [`compute_best_network`].
#[derive(Clone, Debug, Serialize)]
pub struct BestNetwork<'a> {
    /// One entry per input point, in input order.
    pub points: Vec<AnnotatedPoint<'a>>,
    /// One entry per category, in first-seen order.
    pub stats: Vec<CategoryStats>,
    /// The palette after assigning colors to any new categories. Pass it back
    /// in on the next call to keep colors stable.
    pub palette: CategoryPalette,
    /// Number of cells with at least one scored point.
    pub scored_cells: usize,
}

/// Running score total for one category within one cell.
#[derive(Clone, Debug)]
struct Tally<'a> {
    category: &'a str,
    sum: f64,
    count: usize,
}

impl Tally<'_> {
    #[inline] fn mean(&self) -> f64 { self.sum / self.count as f64 }
}

/// Categories in a cell, in encounter order. Cells rarely hold more than a
/// handful of categories, so a linear scan beats hashing.
type CellTallies<'a> = SmallVec<[Tally<'a>; 4]>;

/// Determine, for every grid cell, which category has the best average
/// composite score, and annotate every point accordingly.
///
/// `palette` seeds category colors; categories it does not know receive the
/// next palette color in first-seen order.
pub fn compute_best_network<'a>(
    points: &'a [MetricPoint],
    weights: &ScoreWeights,
    config: &NetworkConfig,
    mut palette: CategoryPalette,
) -> BestNetwork<'a> {
    for point in points { palette.assign(&point.category); }

    let scores: Vec<Option<f64>> = points.iter()
        .map(|point| composite_score(point, &config.metrics, weights))
        .collect();
    let keys: Vec<Option<GridKey>> = points.iter()
        .map(|point| GridKey::snap(&point.coordinate(), config.cell_size))
        .collect();

    // Bucket scored samples by cell, then by category.
    let mut cells: AHashMap<GridKey, CellTallies<'a>> = AHashMap::new();
    for ((point, score), key) in points.iter().zip(&scores).zip(&keys) {
        let (Some(score), Some(key)) = (*score, *key) else { continue };
        let tallies = cells.entry(key).or_default();
        match tallies.iter_mut().find(|t| t.category == point.category) {
            Some(tally) => {
                tally.sum += score;
                tally.count += 1;
            }
            None => tallies.push(Tally { category: &point.category, sum: score, count: 1 }),
        }
    }

    let winners: AHashMap<GridKey, &str> = cells.iter()
        .filter_map(|(&key, tallies)| cell_winner(tallies, config.tie_break).map(|w| (key, w)))
        .collect();

    let annotated: Vec<AnnotatedPoint<'a>> = points.iter().zip(&scores).zip(&keys)
        .map(|((point, &score), &cell)| AnnotatedPoint {
            point,
            score,
            cell,
            is_best: cell.and_then(|k| winners.get(&k)).is_some_and(|&w| w == point.category),
            color: palette.get(&point.category).unwrap_or(crate::color::DEFAULT_COLOR).to_string(),
        })
        .collect();

    let stats = category_stats(&annotated, &cells, &winners);

    log::debug!(
        "[network::compute_best_network] {} points, {} scored, {} cells, {} categories",
        points.len(), scores.iter().filter(|s| s.is_some()).count(), cells.len(), stats.len(),
    );

    BestNetwork { points: annotated, stats, palette, scored_cells: cells.len() }
}

/// Category with the strictly highest mean. Equal means are settled by
/// `tie_break`; tallies are in encounter order, so keeping the incumbent
/// implements `FirstSeen`.
fn cell_winner<'a>(tallies: &[Tally<'a>], tie_break: TieBreak) -> Option<&'a str> {
    let mut best: Option<&Tally<'a>> = None;
    for tally in tallies {
        let replace = match best {
            None => true,
            Some(current) if tally.mean() > current.mean() => true,
            Some(current) if tally.mean() == current.mean() => match tie_break {
                TieBreak::Lexicographic => tally.category < current.category,
                TieBreak::FirstSeen => false,
            },
            Some(_) => false,
        };
        if replace { best = Some(tally) }
    }
    best.map(|t| t.category)
}

fn category_stats(
    annotated: &[AnnotatedPoint<'_>],
    cells: &AHashMap<GridKey, CellTallies<'_>>,
    winners: &AHashMap<GridKey, &str>,
) -> Vec<CategoryStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut stats: AHashMap<&str, (CategoryStats, f64)> = AHashMap::new();

    for item in annotated {
        let category = item.point.category.as_str();
        let (entry, score_sum) = stats.entry(category).or_insert_with(|| {
            order.push(category);
            let entry = CategoryStats {
                category: category.to_string(),
                color: item.color.clone(),
                points: 0,
                scored_points: 0,
                mean_score: None,
                cells: 0,
                cells_won: 0,
            };
            (entry, 0.0)
        });
        entry.points += 1;
        if let Some(score) = item.score {
            entry.scored_points += 1;
            *score_sum += score;
        }
    }

    for tally in cells.values().flatten() {
        if let Some((entry, _)) = stats.get_mut(tally.category) { entry.cells += 1 }
    }
    for &winner in winners.values() {
        if let Some((entry, _)) = stats.get_mut(winner) { entry.cells_won += 1 }
    }

    order.into_iter()
        .filter_map(|category| stats.remove(category))
        .map(|(mut entry, score_sum)| {
            entry.mean_score = (entry.scored_points > 0).then(|| score_sum / entry.scored_points as f64);
            entry
        })
        .collect()
}
