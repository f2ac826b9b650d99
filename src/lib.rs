//! # pdfmark
//!
//! Structural PDF to Markdown conversion.
//!
//! PDF text carries positions and fonts but no structure. This library
//! recovers headings, lists, paragraphs, table-of-contents entries and
//! running headers/footers from positioned text fragments, and renders the
//! result as ASCII-clean Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pdfmark::Result<()> {
//!     let result = pdfmark::convert_file("document.pdf")?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`parser`] extracts positioned [`Fragment`]s per page.
//! 2. [`structure::BoilerplateSet`] finds running headers and footers.
//! 3. [`structure::LineReconstructor`] joins wrapped and hyphenated lines.
//! 4. [`structure::FontSizeRanking`] and [`structure::Classifier`] assign roles.
//! 5. [`render::TextNormalizer`] maps text to printable ASCII.
//! 6. [`render::MarkdownRenderer`] writes the Markdown.
//!
//! The conversion is lossy by intent: images, tables, columns and exact
//! styling are not preserved.

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use convert::{Analysis, ConvertOptions, ConvertResult, Converter, OutputFormat};
pub use detect::{is_pdf_bytes, pdf_version_from_bytes, pdf_version_from_path};
pub use error::{Error, Result};
pub use model::{ClassifiedLine, Fragment, Line, Page, Role};
pub use parser::{ErrorMode, FragmentSource, ParseOptions, PdfParser};
pub use render::{to_markdown, ConversionStats, JsonFormat, TextNormalizer};
pub use structure::StructureOptions;

use std::path::Path;

/// Convert a PDF file to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// let result = pdfmark::convert_file("document.pdf").unwrap();
/// std::fs::write("document.md", &result.content).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    Converter::default().convert_file(path)
}

/// Convert a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfmark::{convert_file_with_options, ConvertOptions, ParseOptions};
///
/// let options = ConvertOptions::new().with_parse_options(ParseOptions::new().lenient());
/// let result = convert_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
) -> Result<ConvertResult> {
    Converter::new(options).convert_file(path)
}

/// Convert a PDF held in memory with default options.
pub fn convert_bytes(data: &[u8]) -> Result<ConvertResult> {
    Converter::default().convert_bytes(data)
}

/// Convert pages of already-extracted fragments with default options.
///
/// # Example
///
/// ```
/// use pdfmark::{convert_pages, Fragment, Page};
///
/// let page = Page::new(1)
///     .with(Fragment::new("Title", 20.0, 1, 40.0))
///     .with(Fragment::new("Body text of the page.", 11.0, 1, 70.0));
/// let result = convert_pages(&[page]).unwrap();
/// assert_eq!(result.content, "# Title\n\nBody text of the page.\n");
/// ```
pub fn convert_pages(pages: &[Page]) -> Result<ConvertResult> {
    Converter::default().convert_pages(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_pages_empty() {
        assert!(matches!(convert_pages(&[]), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_convert_bytes_rejects_garbage() {
        assert!(matches!(
            convert_bytes(b"hello"),
            Err(Error::InputUnreadable(_))
        ));
    }

    #[test]
    fn test_convert_file_missing() {
        assert!(matches!(
            convert_file("/nonexistent/file.pdf"),
            Err(Error::InputUnreadable(_))
        ));
    }
}
