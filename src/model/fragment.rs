//! Positioned text fragments, the raw input of structure inference.

use serde::{Deserialize, Serialize};

/// A run of text with the font metrics it was drawn with.
///
/// `y_position` is measured downward from the top of the page, so reading
/// order is increasing `y_position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Whether the font appears to be italic
    pub is_italic: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Distance from the top of the page in points
    pub y_position: f32,
}

impl Fragment {
    /// Create a regular (non-bold, non-italic) fragment.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32, y_position: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            is_bold: false,
            is_italic: false,
            page,
            y_position,
        }
    }

    /// Mark the fragment as bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Mark the fragment as italic.
    pub fn italic(mut self) -> Self {
        self.is_italic = true;
        self
    }

    /// Check if the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
