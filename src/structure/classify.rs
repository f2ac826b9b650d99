//! Per-line role assignment.
//!
//! Classification is a single pass over the reconstructed lines. Each line is
//! offered to an ordered list of rules; the first rule that claims it decides
//! its role, and lines no rule claims become paragraphs.

use crate::model::{ClassifiedLine, Line, Role};

use super::options::StructureOptions;
use super::patterns;
use super::ranking::{FontSizeRanking, MAX_HEADING_LEVELS};
use super::toc::TocRegions;

/// Read-only inputs shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Document-wide font size ranking
    pub ranking: &'a FontSizeRanking,
    /// Structure thresholds
    pub options: &'a StructureOptions,
    /// Whether the line sits inside a table of contents
    pub in_toc_region: bool,
}

/// A classification rule: claims a line by returning its classified form.
pub type Rule = fn(&Line, &RuleContext<'_>) -> Option<ClassifiedLine>;

/// Rules in precedence order. The first match wins.
pub const RULES: &[(&str, Rule)] = &[
    ("blank", blank_rule),
    ("toc", toc_rule),
    ("bullet", bullet_rule),
    ("numbered", numbered_rule),
    ("heading", heading_rule),
];

/// Assigns a role to every line of a document.
pub struct Classifier<'a> {
    ranking: &'a FontSizeRanking,
    options: &'a StructureOptions,
}

impl<'a> Classifier<'a> {
    /// Create a classifier over a precomputed ranking.
    pub fn new(ranking: &'a FontSizeRanking, options: &'a StructureOptions) -> Self {
        Self { ranking, options }
    }

    /// Classify every line. The output has exactly one entry per input line.
    pub fn classify(&self, lines: &[Line]) -> Vec<ClassifiedLine> {
        let regions = TocRegions::detect(lines, self.options);
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let ctx = RuleContext {
                    ranking: self.ranking,
                    options: self.options,
                    in_toc_region: regions.contains(idx),
                };
                self.classify_line(line, &ctx)
            })
            .collect()
    }

    /// Classify a single line against the rule list.
    pub fn classify_line(&self, line: &Line, ctx: &RuleContext<'_>) -> ClassifiedLine {
        for (name, rule) in RULES {
            if let Some(classified) = rule(line, ctx) {
                log::trace!("{} rule claimed {:?}", name, line.text);
                return classified;
            }
        }
        ClassifiedLine::new(line.clone(), Role::Paragraph)
    }
}

fn with_text(line: &Line, text: impl Into<String>) -> Line {
    Line {
        text: text.into(),
        ..line.clone()
    }
}

fn blank_rule(line: &Line, _ctx: &RuleContext<'_>) -> Option<ClassifiedLine> {
    line.is_blank()
        .then(|| ClassifiedLine::new(Line::blank(line.page), Role::Blank))
}

/// `Introduction ..... 5` inside a contents region becomes `5 — Introduction`.
fn toc_rule(line: &Line, ctx: &RuleContext<'_>) -> Option<ClassifiedLine> {
    if !ctx.in_toc_region {
        return None;
    }
    let entry = patterns::toc_entry(&line.text)?;
    let text = format!("{} — {}", entry.page, entry.title);
    Some(ClassifiedLine::new(with_text(line, text), Role::TocEntry).with_page_token(entry.page))
}

fn bullet_rule(line: &Line, _ctx: &RuleContext<'_>) -> Option<ClassifiedLine> {
    let body = patterns::bullet_body(&line.text)?;
    Some(ClassifiedLine::new(with_text(line, body), Role::Bullet))
}

fn numbered_rule(line: &Line, _ctx: &RuleContext<'_>) -> Option<ClassifiedLine> {
    let (ordinal, body) = patterns::numbered_parts(&line.text)?;
    Some(ClassifiedLine::new(with_text(line, body), Role::NumberedItem).with_ordinal(ordinal))
}

/// Size rank first; bold short lines only when the size has no rank.
fn heading_rule(line: &Line, ctx: &RuleContext<'_>) -> Option<ClassifiedLine> {
    let text = line.text.trim();
    if let Some(level) = ctx.ranking.heading_level(line.font_size) {
        return Some(ClassifiedLine::new(with_text(line, text), Role::heading(level)));
    }

    let opts = ctx.options;
    let looks_like_heading = line.is_bold
        && line.word_count() <= opts.heading_max_words
        && !patterns::has_terminal_punctuation(text)
        && line.font_size >= ctx.ranking.body_size - opts.font_size_tolerance;
    if !looks_like_heading {
        return None;
    }

    let level = (ctx.ranking.levels_in_use() + 1).min(MAX_HEADING_LEVELS) as u8;
    Some(ClassifiedLine::new(with_text(line, text), Role::heading(level)))
}
