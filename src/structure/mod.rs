//! Structure inference.
//!
//! Two passes over the document: whole-document tables first
//! ([`BoilerplateSet`], [`FontSizeRanking`]), then line reconstruction and
//! per-line classification that only read those tables.

mod boilerplate;
mod classify;
mod lines;
mod options;
mod patterns;
mod ranking;
mod toc;

pub use boilerplate::{normalize_key, BoilerplateSet};
pub use classify::{Classifier, Rule, RuleContext, RULES};
pub use lines::{physical_lines, LineReconstructor, PhysicalLine, ReconstructedLines};
pub use options::StructureOptions;
pub use ranking::{FontSizeRanking, MAX_HEADING_LEVELS};
pub use toc::TocRegions;
