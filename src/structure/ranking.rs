//! Document-wide font size ranking for heading detection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Line;

use super::options::StructureOptions;

/// Maximum number of heading levels produced from font sizes.
pub const MAX_HEADING_LEVELS: usize = 3;

/// Maps font sizes to heading levels.
///
/// The body size is the size carrying the most characters, unless a smaller
/// size is used on at least as many lines. The (up to) three
/// largest distinct sizes noticeably above the body size become heading
/// levels 1-3, largest first; everything else is body text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSizeRanking {
    /// Most common font size
    pub body_size: f32,
    /// Heading sizes, largest first
    pub heading_sizes: Vec<f32>,
}

impl FontSizeRanking {
    /// Build the ranking from every non-blank line of the document.
    pub fn from_lines(lines: &[Line], options: &StructureOptions) -> Self {
        // size key -> (lines, characters)
        let mut histogram: HashMap<i32, (usize, usize)> = HashMap::new();
        for line in lines.iter().filter(|l| !l.is_blank()) {
            let entry = histogram.entry(size_key(line.font_size)).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += line.text.chars().count();
        }

        // Most characters wins, ties to the smaller size.
        let Some((&char_key, &(char_lines, _))) = histogram
            .iter()
            .max_by(|(ka, (_, ca)), (kb, (_, cb))| ca.cmp(cb).then(kb.cmp(ka)))
        else {
            return Self::default();
        };
        // A smaller size on at least as many lines takes precedence.
        let body_key = histogram
            .iter()
            .filter(|(k, (n, _))| **k <= char_key && *n >= char_lines)
            .max_by(|(ka, (na, _)), (kb, (nb, _))| na.cmp(nb).then(kb.cmp(ka)))
            .map_or(char_key, |(k, _)| *k);
        let body_size = body_key as f32 / 10.0;

        let mut heading_sizes: Vec<f32> = histogram
            .keys()
            .map(|k| *k as f32 / 10.0)
            .filter(|size| *size > body_size + options.font_size_tolerance)
            .collect();
        heading_sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        heading_sizes.truncate(MAX_HEADING_LEVELS);

        log::debug!(
            "Font ranking: body {:.1}pt, headings {:?}",
            body_size,
            heading_sizes
        );
        Self {
            body_size,
            heading_sizes,
        }
    }

    /// Heading level (1-3) for a font size, or None for body text.
    pub fn heading_level(&self, font_size: f32) -> Option<u8> {
        let key = size_key(font_size);
        self.heading_sizes
            .iter()
            .position(|s| size_key(*s) == key)
            .map(|i| i as u8 + 1)
    }

    /// Number of heading levels backed by distinct font sizes.
    pub fn levels_in_use(&self) -> usize {
        self.heading_sizes.len()
    }
}

/// Round to 0.1pt precision.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}
