//! Tunable thresholds for structure inference.

use serde::{Deserialize, Serialize};

/// Policy constants used by the boilerplate detector, line reconstructor and
/// classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureOptions {
    /// Documents with fewer pages skip boilerplate detection
    pub boilerplate_min_pages: usize,

    /// Fraction of pages a line must recur on to count as boilerplate
    pub boilerplate_page_fraction: f32,

    /// Physical lines at the top and bottom of each page considered as
    /// header/footer candidates
    pub boilerplate_edge_lines: usize,

    /// Lines longer than this are never boilerplate
    pub boilerplate_max_chars: usize,

    /// Fragments whose vertical positions differ by at most this fraction of
    /// their font size share a physical line
    pub same_line_tolerance: f32,

    /// A vertical gap larger than this multiple of the page's average line
    /// spacing breaks the paragraph
    pub paragraph_gap_ratio: f32,

    /// Font sizes closer than this (points) are treated as equal
    pub font_size_tolerance: f32,

    /// Maximum words in a bold line promoted to a heading
    pub heading_max_words: usize,

    /// Fraction of dot-leader entries that marks a page as a contents page
    pub toc_page_density: f32,

    /// Minimum dot-leader entries on a contents page
    pub toc_min_entries: usize,

    /// Non-entry lines tolerated inside a contents region
    pub toc_max_gap: usize,
}

impl StructureOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum page count for boilerplate detection.
    pub fn with_boilerplate_min_pages(mut self, pages: usize) -> Self {
        self.boilerplate_min_pages = pages;
        self
    }

    /// Set the recurrence fraction for boilerplate detection.
    pub fn with_boilerplate_page_fraction(mut self, fraction: f32) -> Self {
        self.boilerplate_page_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Set how many lines at each page edge are boilerplate candidates.
    pub fn with_boilerplate_edge_lines(mut self, lines: usize) -> Self {
        self.boilerplate_edge_lines = lines;
        self
    }

    /// Set the same-line vertical tolerance (fraction of font size).
    pub fn with_same_line_tolerance(mut self, tolerance: f32) -> Self {
        self.same_line_tolerance = tolerance;
        self
    }

    /// Set the paragraph gap ratio.
    pub fn with_paragraph_gap_ratio(mut self, ratio: f32) -> Self {
        self.paragraph_gap_ratio = ratio;
        self
    }

    /// Set the font size tolerance in points.
    pub fn with_font_size_tolerance(mut self, tolerance: f32) -> Self {
        self.font_size_tolerance = tolerance;
        self
    }

    /// Set the word limit for bold headings.
    pub fn with_heading_max_words(mut self, words: usize) -> Self {
        self.heading_max_words = words;
        self
    }

    /// Number of pages a line must appear on to be boilerplate in a document
    /// of `page_count` pages. Never less than two.
    pub fn boilerplate_threshold(&self, page_count: usize) -> usize {
        let needed = (self.boilerplate_page_fraction * page_count as f32).ceil() as usize;
        needed.max(2)
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            boilerplate_min_pages: 3,
            boilerplate_page_fraction: 0.5,
            boilerplate_edge_lines: 2,
            boilerplate_max_chars: 80,
            same_line_tolerance: 0.3,
            paragraph_gap_ratio: 1.5,
            font_size_tolerance: 0.5,
            heading_max_words: 10,
            toc_page_density: 0.3,
            toc_min_entries: 3,
            toc_max_gap: 2,
        }
    }
}
