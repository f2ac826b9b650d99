//! The conversion pipeline.

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ClassifiedLine, Page};
use crate::parser::{FragmentSource, PdfParser};
use crate::render::{to_json, to_markdown, ConversionStats, JsonFormat, TextNormalizer};
use crate::structure::{
    physical_lines, BoilerplateSet, Classifier, FontSizeRanking, LineReconstructor, PhysicalLine,
};

use super::{ConvertOptions, ConvertResult, OutputFormat};

/// Everything inferred about a document before rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Running headers and footers that were dropped
    pub boilerplate: BoilerplateSet,
    /// Font size to heading level table
    pub ranking: FontSizeRanking,
    /// Classified lines in reading order
    pub lines: Vec<ClassifiedLine>,
    /// Counts collected so far
    pub stats: ConversionStats,
}

/// Runs the structure pipeline with fixed options.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Infer the structure of a document.
    ///
    /// Fails only with [`Error::EmptyDocument`] when no page carries visible
    /// text; every other input yields an analysis.
    pub fn analyze(&self, pages: &[Page]) -> Result<Analysis> {
        let opts = &self.options.structure;

        let fragment_count: usize = pages
            .iter()
            .map(|p| p.fragments.iter().filter(|f| !f.is_blank()).count())
            .sum();
        if fragment_count == 0 {
            return Err(Error::EmptyDocument);
        }

        let rows: Vec<Vec<PhysicalLine>> = pages.iter().map(|p| physical_lines(p, opts)).collect();
        log::debug!(
            "Built {} physical lines from {} fragments",
            rows.iter().map(Vec::len).sum::<usize>(),
            fragment_count
        );

        let boilerplate = BoilerplateSet::detect(&rows, opts);
        let reconstructed = LineReconstructor::new(&boilerplate, opts).reconstruct(&rows);
        let ranking = FontSizeRanking::from_lines(&reconstructed.lines, opts);
        let mut lines = Classifier::new(&ranking, opts).classify(&reconstructed.lines);
        if self.options.normalize {
            lines = TextNormalizer::new().normalize_lines(lines);
        }

        let mut stats = ConversionStats {
            page_count: pages.len() as u32,
            fragment_count: fragment_count as u32,
            boilerplate_entries: boilerplate.len() as u32,
            boilerplate_removed: reconstructed.boilerplate_removed as u32,
            line_count: lines.len() as u32,
            ..ConversionStats::default()
        };
        stats.count_roles(&lines);

        log::info!(
            "Classified {} lines: {} headings, {} list items, {} contents entries, {} paragraphs",
            stats.line_count,
            stats.heading_count,
            stats.list_item_count,
            stats.toc_entry_count,
            stats.paragraph_count
        );

        Ok(Analysis {
            boilerplate,
            ranking,
            lines,
            stats,
        })
    }

    /// Convert in-memory pages.
    pub fn convert_pages(&self, pages: &[Page]) -> Result<ConvertResult> {
        let analysis = self.analyze(pages)?;
        let format = self.options.output_format;

        let content = match format {
            OutputFormat::Markdown => to_markdown(&analysis.lines),
            OutputFormat::Json => to_json(&analysis, JsonFormat::Pretty)?,
        };

        let mut stats = analysis.stats;
        stats.count_output(&content);
        Ok(ConvertResult {
            content,
            stats,
            mime_type: format.mime_type(),
        })
    }

    /// Convert every page delivered by a fragment source.
    pub fn convert_source<S: FragmentSource + ?Sized>(&self, source: &S) -> Result<ConvertResult> {
        let pages = source.pages()?;
        self.convert_pages(&pages)
    }

    /// Convert a PDF file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        let parser = PdfParser::open_with_options(path, self.options.parse.clone())?;
        self.convert_source(&parser)
    }

    /// Convert a PDF held in memory.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<ConvertResult> {
        let parser = PdfParser::from_bytes_with_options(data, self.options.parse.clone())?;
        self.convert_source(&parser)
    }

    /// Convert a PDF read from `reader`.
    pub fn convert_reader<R: Read>(&self, reader: R) -> Result<ConvertResult> {
        let parser = PdfParser::from_reader_with_options(reader, self.options.parse.clone())?;
        self.convert_source(&parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fragment, Role};

    fn page(number: u32, rows: &[(&str, f32)]) -> Page {
        let mut page = Page::new(number);
        for (i, (text, size)) in rows.iter().enumerate() {
            page.push(Fragment::new(*text, *size, number, 50.0 + i as f32 * 14.0));
        }
        page
    }

    #[test]
    fn test_empty_document() {
        let converter = Converter::default();
        assert!(matches!(
            converter.convert_pages(&[]),
            Err(Error::EmptyDocument)
        ));
        let blank = vec![page(1, &[("   ", 11.0)]), Page::new(2)];
        assert!(matches!(
            converter.convert_pages(&blank),
            Err(Error::EmptyDocument)
        ));
    }

    #[test]
    fn test_analysis_stats() {
        let converter = Converter::new(ConvertOptions::default());
        let pages = vec![page(
            1,
            &[
                ("Report", 20.0),
                ("The first line of body text carries on", 11.0),
                ("and wraps onto a second line.", 11.0),
            ],
        )];
        let analysis = converter.analyze(&pages).unwrap();

        assert_eq!(analysis.stats.page_count, 1);
        assert_eq!(analysis.stats.fragment_count, 3);
        assert_eq!(analysis.lines.len(), 2);
        assert_eq!(analysis.lines[0].role(), Role::Heading1);
        assert_eq!(
            analysis.lines[1].text(),
            "The first line of body text carries on and wraps onto a second line."
        );
    }

    #[test]
    fn test_convert_pages_markdown() {
        let pages = vec![page(
            1,
            &[("Report", 20.0), ("Plain body text for the report.", 11.0)],
        )];
        let result = Converter::default().convert_pages(&pages).unwrap();
        assert_eq!(result.content, "# Report\n\nPlain body text for the report.\n");
        assert_eq!(result.mime_type, "text/markdown");
        assert_eq!(result.stats.output_lines, 3);
    }

    #[test]
    fn test_convert_pages_json() {
        let pages = vec![page(1, &[("Only body text here.", 11.0)])];
        let converter = Converter::new(ConvertOptions::new().with_format(OutputFormat::Json));
        let result = converter.convert_pages(&pages).unwrap();

        assert_eq!(result.mime_type, "application/json");
        let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["lines"][0]["role"], "paragraph");
        assert_eq!(value["ranking"]["body_size"], 11.0);
    }

    #[test]
    fn test_normalize_toggle() {
        let pages = vec![page(1, &[("\u{201C}Quoted\u{201D} caf\u{00E9}", 11.0)])];

        let on = Converter::default().convert_pages(&pages).unwrap();
        assert_eq!(on.content, "\"Quoted\" cafe\n");

        let off = Converter::new(ConvertOptions::new().with_normalize(false))
            .convert_pages(&pages)
            .unwrap();
        assert_eq!(off.content, "\u{201C}Quoted\u{201D} caf\u{00E9}\n");
    }
}
