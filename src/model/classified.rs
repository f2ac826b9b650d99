//! Lines tagged with their semantic role.

use serde::{Deserialize, Serialize};

use super::Line;

/// Semantic role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Top-level heading (`#`)
    Heading1,
    /// Second-level heading (`##`)
    Heading2,
    /// Third-level heading (`###`)
    Heading3,
    /// Unordered list item
    Bullet,
    /// Ordered list item
    NumberedItem,
    /// Table-of-contents entry
    TocEntry,
    /// Body text
    Paragraph,
    /// Paragraph break
    Blank,
}

impl Role {
    /// Heading role for a level; levels past 3 clamp to 3.
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => Role::Heading1,
            2 => Role::Heading2,
            _ => Role::Heading3,
        }
    }

    /// Heading level (1-3) or None.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Role::Heading1 => Some(1),
            Role::Heading2 => Some(2),
            Role::Heading3 => Some(3),
            _ => None,
        }
    }

    /// Check if this is a heading role.
    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}

/// A line plus the role assigned to it by the classifier.
///
/// The role is fixed at construction; later stages may only rewrite the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    #[serde(flatten)]
    line: Line,
    role: Role,
    /// Page token of a TOC entry (e.g. "5" or "iv")
    page_token: Option<String>,
    /// Numeral of a numbered list item
    ordinal: Option<String>,
}

impl ClassifiedLine {
    /// Tag a line with a role.
    pub fn new(line: Line, role: Role) -> Self {
        Self {
            line,
            role,
            page_token: None,
            ordinal: None,
        }
    }

    /// Attach the page token of a TOC entry.
    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Attach the numeral of a numbered item.
    pub fn with_ordinal(mut self, ordinal: impl Into<String>) -> Self {
        self.ordinal = Some(ordinal.into());
        self
    }

    /// Replace the text, keeping role and tokens.
    pub fn map_text(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.line.text = f(&self.line.text);
        self
    }

    /// The assigned role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The line text.
    pub fn text(&self) -> &str {
        &self.line.text
    }

    /// The underlying line.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Page token of a TOC entry.
    pub fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    /// Numeral of a numbered item.
    pub fn ordinal(&self) -> Option<&str> {
        self.ordinal.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_roles() {
        assert_eq!(Role::heading(1), Role::Heading1);
        assert_eq!(Role::heading(3), Role::Heading3);
        assert_eq!(Role::heading(5), Role::Heading3);
        assert_eq!(Role::Heading2.heading_level(), Some(2));
        assert!(!Role::Bullet.is_heading());
    }

    #[test]
    fn test_map_text_keeps_role() {
        let line = ClassifiedLine::new(Line::new("\u{2018}quoted\u{2019}", 11.0, false, 1), Role::TocEntry)
            .with_page_token("5");
        let mapped = line.map_text(|t| t.replace(['\u{2018}', '\u{2019}'], "'"));
        assert_eq!(mapped.text(), "'quoted'");
        assert_eq!(mapped.role(), Role::TocEntry);
        assert_eq!(mapped.page_token(), Some("5"));
    }
}
