use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Coordinate;

/// Default lattice spacing in degrees, roughly 11 m of latitude.
pub(crate) const DEFAULT_CELL_SIZE: f64 = 0.0001;

/// Integer lattice coordinates of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridKey {
    pub lat: i64,
    pub lng: i64,
}

impl GridKey {
    /// Snap `c` to the nearest lattice point. `None` for non-finite
    /// coordinates or a non-positive cell size.
    pub fn snap(c: &Coordinate, cell_size: f64) -> Option<Self> {
        if !c.is_finite() || !(cell_size > 0.0) || !cell_size.is_finite() { return None }
        Some(Self {
            lat: (c.lat / cell_size).round() as i64,
            lng: (c.lng / cell_size).round() as i64,
        })
    }

    /// Center of the cell in degrees.
    pub fn center(&self, cell_size: f64) -> Coordinate {
        Coordinate::new(self.lat as f64 * cell_size, self.lng as f64 * cell_size)
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.lat, self.lng)
    }
}
