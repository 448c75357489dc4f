use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Fixed category palette, handed out in first-seen order and reused
/// cyclically once exhausted.
pub const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
    "#e377c2", "#7f7f7f", "#bcbd22", "#17becf", "#393b79", "#637939",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub category: String,
    pub color: String,
}

/// An explicit `category → color` assignment.
///
/// Built fresh for each aggregation, optionally seeded from a previous run so
/// colors stay stable across calls. The caller owns persistence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct CategoryPalette {
    entries: Vec<PaletteEntry>,
    index: AHashMap<String, usize>,
}

impl CategoryPalette {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Color already assigned to `category`, if any.
    pub fn get(&self, category: &str) -> Option<&str> {
        self.index.get(category).map(|&i| self.entries[i].color.as_str())
    }

    /// Assign `color` to `category`, replacing any earlier assignment.
    pub fn set(&mut self, category: impl Into<String>, color: impl Into<String>) {
        let (category, color) = (category.into(), color.into());
        match self.index.get(&category) {
            Some(&i) => self.entries[i].color = color,
            None => {
                self.index.insert(category.clone(), self.entries.len());
                self.entries.push(PaletteEntry { category, color });
            }
        }
    }

    /// Color for `category`, assigning the next palette color on first sight.
    pub fn assign(&mut self, category: &str) -> &str {
        let i = match self.index.get(category) {
            Some(&i) => i,
            None => {
                let color = PALETTE[self.entries.len() % PALETTE.len()];
                self.set(category, color);
                self.entries.len() - 1
            }
        };
        &self.entries[i].color
    }

    /// Entries in assignment order.
    #[inline] pub fn entries(&self) -> &[PaletteEntry] { &self.entries }
}

impl From<Vec<PaletteEntry>> for CategoryPalette {
    fn from(entries: Vec<PaletteEntry>) -> Self {
        let mut palette = Self::new();
        for entry in entries { palette.set(entry.category, entry.color) }
        palette
    }
}

impl From<CategoryPalette> for Vec<PaletteEntry> {
    fn from(palette: CategoryPalette) -> Self { palette.entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_in_first_seen_order() {
        let mut palette = CategoryPalette::new();
        assert_eq!(palette.assign("b"), PALETTE[0]);
        assert_eq!(palette.assign("a"), PALETTE[1]);
        assert_eq!(palette.assign("b"), PALETTE[0]);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn seeded_colors_are_kept() {
        let mut palette = CategoryPalette::new();
        palette.set("Op A", "#000000");
        assert_eq!(palette.assign("Op A"), "#000000");
        assert_eq!(palette.assign("Op B"), PALETTE[1]);
    }

    #[test]
    fn wraps_around_when_exhausted() {
        let mut palette = CategoryPalette::new();
        for i in 0..PALETTE.len() { palette.assign(&format!("c{i}")); }
        assert_eq!(palette.assign("overflow"), PALETTE[0]);
    }

    #[test]
    fn serde_as_entry_list() {
        let mut palette = CategoryPalette::new();
        palette.assign("x");
        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json, serde_json::json!([{ "category": "x", "color": PALETTE[0] }]));
        let back: CategoryPalette = serde_json::from_value(json).unwrap();
        assert_eq!(back.get("x"), Some(PALETTE[0]));
    }
}
