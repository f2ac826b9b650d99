//! Reconstructed logical lines.

use serde::{Deserialize, Serialize};

/// A logical line: one visual line, or several wrapped lines of one
/// paragraph joined together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Joined text
    pub text: String,
    /// Largest font size among the merged fragments
    pub font_size: f32,
    /// Whether the line is predominantly bold
    pub is_bold: bool,
    /// Page the line starts on
    pub page: u32,
}

impl Line {
    /// Create a new line.
    pub fn new(text: impl Into<String>, font_size: f32, is_bold: bool, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            is_bold,
            page,
        }
    }

    /// A paragraph-break marker on `page`.
    pub fn blank(page: u32) -> Self {
        Self::new(String::new(), 0.0, false, page)
    }

    /// Check if the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        let line = Line::blank(3);
        assert!(line.is_blank());
        assert_eq!(line.page, 3);
    }

    #[test]
    fn test_word_count() {
        let line = Line::new("  The quick  brown fox ", 11.0, false, 1);
        assert_eq!(line.word_count(), 4);
    }
}
