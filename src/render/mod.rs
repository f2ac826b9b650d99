//! Output stage: ASCII normalization, Markdown rendering, JSON dump and
//! conversion statistics.

mod json;
mod markdown;
mod normalize;
mod stats;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use normalize::TextNormalizer;
pub use stats::ConversionStats;
