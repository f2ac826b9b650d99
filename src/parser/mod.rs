//! Fragment extraction: the PDF-reading side of the pipeline.

mod content;
mod options;
mod pdf_parser;
mod source;

pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
pub use source::FragmentSource;
