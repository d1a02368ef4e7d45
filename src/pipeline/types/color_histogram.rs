use super::Color;
use indexmap::IndexMap;

/// Occurrence counts per color, in the order colors were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorHistogram {
    counts: IndexMap<Color, usize>,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_occurrences(occurrences: &[Color]) -> Self {
        let mut histogram = Self::new();
        for color in occurrences {
            histogram.record(*color);
        }
        histogram
    }

    pub fn record(&mut self, color: Color) {
        *self.counts.entry(color).or_insert(0) += 1;
    }

    pub fn count(&self, color: &Color) -> usize {
        self.counts.get(color).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals the length of the sequence the histogram was built from.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn distinct_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.counts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, usize)> + '_ {
        self.counts.iter().map(|(color, count)| (*color, *count))
    }
}
