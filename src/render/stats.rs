//! Conversion statistics.

use serde::{Deserialize, Serialize};

use crate::model::{ClassifiedLine, Role};

/// Counts collected while converting one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages read from the source
    pub page_count: u32,

    /// Text fragments extracted
    pub fragment_count: u32,

    /// Distinct boilerplate texts detected
    pub boilerplate_entries: u32,

    /// Physical lines dropped as boilerplate
    pub boilerplate_removed: u32,

    /// Logical lines after reconstruction (blanks included)
    pub line_count: u32,

    /// Headings of any level
    pub heading_count: u32,

    /// Bullet and numbered items
    pub list_item_count: u32,

    /// Table-of-contents entries
    pub toc_entry_count: u32,

    /// Paragraph lines
    pub paragraph_count: u32,

    /// Lines in the rendered output
    pub output_lines: u32,

    /// Characters in the rendered output
    pub output_chars: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally roles of the classified lines.
    pub fn count_roles(&mut self, lines: &[ClassifiedLine]) {
        for line in lines {
            match line.role() {
                Role::Heading1 | Role::Heading2 | Role::Heading3 => self.heading_count += 1,
                Role::Bullet | Role::NumberedItem => self.list_item_count += 1,
                Role::TocEntry => self.toc_entry_count += 1,
                Role::Paragraph => self.paragraph_count += 1,
                Role::Blank => {}
            }
        }
    }

    /// Record the size of the rendered output.
    pub fn count_output(&mut self, content: &str) {
        self.output_lines = content.lines().count() as u32;
        self.output_chars = content.chars().count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    #[test]
    fn test_count_roles() {
        let lines: Vec<ClassifiedLine> = [
            Role::Heading1,
            Role::Heading3,
            Role::Bullet,
            Role::NumberedItem,
            Role::TocEntry,
            Role::Paragraph,
            Role::Blank,
        ]
        .into_iter()
        .map(|role| ClassifiedLine::new(Line::new("x", 11.0, false, 1), role))
        .collect();

        let mut stats = ConversionStats::new();
        stats.count_roles(&lines);
        assert_eq!(stats.heading_count, 2);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.toc_entry_count, 1);
        assert_eq!(stats.paragraph_count, 1);
    }

    #[test]
    fn test_count_output() {
        let mut stats = ConversionStats::new();
        stats.count_output("# Title\n\nBody.\n");
        assert_eq!(stats.output_lines, 3);
        assert_eq!(stats.output_chars, 15);
    }
}
