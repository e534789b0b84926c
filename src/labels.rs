//! Tag vocabulary and pill sizing
//!
//! Without a DOM to measure, tag sizes come from a fixed per-character width
//! plus the pill's padding.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::sim::RandomSource;

/// Labels the services section floats by default
pub const DEFAULT_VOCABULARY: [&str; 6] = ["Web", "Code", "Design", "Software", "UI/UX", "Cloud"];

pub fn default_vocabulary() -> Vec<String> {
    DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect()
}

/// Draw `count` labels uniformly from `vocabulary`, with replacement
pub fn pick_labels<R: RandomSource + ?Sized>(
    vocabulary: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    if vocabulary.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let index = ((rng.next_unit() * vocabulary.len() as f32) as usize)
                .min(vocabulary.len() - 1);
            vocabulary[index].clone()
        })
        .collect()
}

/// Approximate box metrics of a tag pill, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillMetrics {
    /// Average advance of one character
    pub char_width: f32,
    pub line_height: f32,
    /// Horizontal padding on each side
    pub padding_x: f32,
    /// Vertical padding on each side
    pub padding_y: f32,
}

impl Default for PillMetrics {
    /// Small (14px) medium-weight text in a rounded pill
    fn default() -> Self {
        Self {
            char_width: 7.5,
            line_height: 20.0,
            padding_x: 16.0,
            padding_y: 4.0,
        }
    }
}

impl PillMetrics {
    pub fn estimate_size(&self, label: &str) -> Size {
        let chars = label.chars().count() as f32;
        Size::new(
            chars * self.char_width + 2.0 * self.padding_x,
            self.line_height + 2.0 * self.padding_y,
        )
    }
}
