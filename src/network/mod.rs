//! Locational best-network comparison.
//!
//! Points are bucketed into a fixed lattice, scored from their normalized
//! signal metrics, and each cell is awarded to the category (operator,
//! provider, ...) with the best average score.
mod best;
mod grid;
mod metric;
mod palette;

pub use best::{compute_best_network, AnnotatedPoint, BestNetwork, CategoryStats, NetworkConfig, TieBreak};
pub use grid::GridKey;
pub use metric::{MetricDomain, ScoreWeights};
pub use palette::{CategoryPalette, PaletteEntry, PALETTE};
