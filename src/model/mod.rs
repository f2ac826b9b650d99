//! Data model shared by the pipeline stages.
//!
//! Fragments come from the extractor, lines from the reconstructor, and
//! classified lines from the classifier. Everything lives for a single
//! conversion run.

mod classified;
mod fragment;
mod line;
mod page;

pub use classified::{ClassifiedLine, Role};
pub use fragment::Fragment;
pub use line::Line;
pub use page::Page;
