//! Conversion entry points.
//!
//! A [`Converter`] runs the whole pipeline: fragments are read from a
//! [`FragmentSource`](crate::parser::FragmentSource), document-wide tables
//! are built, lines are reconstructed and classified, and the result is
//! rendered as Markdown or dumped as JSON.
//!
//! # Example
//!
//! ```no_run
//! use pdfmark::convert::{ConvertOptions, Converter};
//!
//! fn main() -> pdfmark::Result<()> {
//!     let converter = Converter::new(ConvertOptions::default());
//!     let result = converter.convert_file("document.pdf")?;
//!     result.write_to("document.md")?;
//!     Ok(())
//! }
//! ```

mod pipeline;

pub use pipeline::{Analysis, Converter};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::ParseOptions;
use crate::render::ConversionStats;
use crate::structure::StructureOptions;

/// Options for document conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Extraction options
    pub parse: ParseOptions,

    /// Structure inference thresholds
    pub structure: StructureOptions,

    /// Map output text to printable ASCII
    pub normalize: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set structure inference options.
    pub fn with_structure_options(mut self, options: StructureOptions) -> Self {
        self.structure = options;
        self
    }

    /// Enable or disable ASCII normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            structure: StructureOptions::default(),
            normalize: true,
            output_format: OutputFormat::Markdown,
        }
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Markdown document
    #[default]
    Markdown,

    /// JSON dump of the inferred structure
    Json,
}

impl OutputFormat {
    /// MIME type of the rendered output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Write the content to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.content).map_err(|e| Error::output(path, e))?;
        log::info!("Wrote {} bytes to {}", self.content.len(), path.display());
        Ok(())
    }
}
