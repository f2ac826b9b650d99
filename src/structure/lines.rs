//! Line reconstruction.
//!
//! Fragments are first grouped into physical lines (one visual row of text),
//! then physical lines are merged into logical [`Line`]s: wrapped prose is
//! joined with a single space, words hyphenated across a line break are
//! rejoined, and boilerplate rows are dropped in place.

use crate::model::{Line, Page};

use super::boilerplate::{edge_flags, BoilerplateSet};
use super::options::StructureOptions;
use super::patterns;

/// One visual row of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalLine {
    /// Fragment texts joined with single spaces
    pub text: String,
    /// Largest font size in the row
    pub font_size: f32,
    /// Whether most of the row's characters are bold
    pub is_bold: bool,
    /// Page number
    pub page: u32,
    /// Distance from the top of the page
    pub y: f32,
    bold_chars: usize,
    total_chars: usize,
}

impl PhysicalLine {
    /// Check if the row carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    fn starts_lowercase(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_lowercase)
    }
}

/// Group a page's fragments into physical lines.
///
/// Consecutive fragments stay on one row while their vertical positions are
/// within `same_line_tolerance` times the font size of the row's first
/// fragment. Fragment order is preserved.
pub fn physical_lines(page: &Page, options: &StructureOptions) -> Vec<PhysicalLine> {
    let mut rows: Vec<PhysicalLine> = Vec::new();
    let mut texts: Vec<&str> = Vec::new();
    let mut current: Option<PhysicalLine> = None;

    for fragment in &page.fragments {
        if let Some(row) = current.as_mut() {
            let tolerance = row.font_size.max(fragment.font_size) * options.same_line_tolerance;
            if (fragment.y_position - row.y).abs() <= tolerance {
                let chars = fragment.text.trim().chars().count();
                if chars > 0 {
                    row.font_size = row.font_size.max(fragment.font_size);
                    row.total_chars += chars;
                    if fragment.is_bold {
                        row.bold_chars += chars;
                    }
                }
                texts.push(&fragment.text);
                continue;
            }
            if let Some(done) = current.take() {
                rows.push(finish_row(done, &texts));
            }
            texts.clear();
        }

        let chars = fragment.text.trim().chars().count();
        current = Some(PhysicalLine {
            text: String::new(),
            font_size: fragment.font_size,
            is_bold: false,
            page: page.number,
            y: fragment.y_position,
            bold_chars: if fragment.is_bold { chars } else { 0 },
            total_chars: chars,
        });
        texts.push(&fragment.text);
    }

    if let Some(done) = current {
        rows.push(finish_row(done, &texts));
    }
    rows
}

fn finish_row(mut row: PhysicalLine, texts: &[&str]) -> PhysicalLine {
    row.text = texts
        .iter()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");
    row.is_bold = row.total_chars > 0 && row.bold_chars * 2 > row.total_chars;
    row
}

/// Output of [`LineReconstructor::reconstruct`].
#[derive(Debug, Clone, Default)]
pub struct ReconstructedLines {
    /// Logical lines in reading order, blanks marking paragraph breaks
    pub lines: Vec<Line>,
    /// Physical lines dropped as boilerplate
    pub boilerplate_removed: usize,
}

/// Merges physical lines into logical lines.
pub struct LineReconstructor<'a> {
    boilerplate: &'a BoilerplateSet,
    options: &'a StructureOptions,
}

/// A logical line being accumulated.
struct Pending {
    text: String,
    font_size: f32,
    page: u32,
    bold_chars: usize,
    total_chars: usize,
    in_contents: bool,
}

impl Pending {
    fn start(row: &PhysicalLine, in_contents: bool) -> Self {
        Self {
            text: row.text.clone(),
            font_size: row.font_size,
            page: row.page,
            bold_chars: row.bold_chars,
            total_chars: row.total_chars,
            in_contents,
        }
    }

    fn is_bold(&self) -> bool {
        self.total_chars > 0 && self.bold_chars * 2 > self.total_chars
    }

    /// Ends in a hyphen that follows a letter (`program-`).
    fn ends_with_word_break(&self) -> bool {
        let mut chars = self.text.chars().rev();
        chars.next() == Some('-') && chars.next().is_some_and(char::is_alphabetic)
    }

    fn absorb(&mut self, row: &PhysicalLine, separator: &str) {
        self.text.push_str(separator);
        self.text.push_str(&row.text);
        self.font_size = self.font_size.max(row.font_size);
        self.bold_chars += row.bold_chars;
        self.total_chars += row.total_chars;
    }

    fn into_line(self) -> Line {
        let is_bold = self.is_bold();
        Line::new(self.text, self.font_size, is_bold, self.page)
    }
}

impl<'a> LineReconstructor<'a> {
    /// Create a reconstructor that drops rows found in `boilerplate`.
    pub fn new(boilerplate: &'a BoilerplateSet, options: &'a StructureOptions) -> Self {
        Self {
            boilerplate,
            options,
        }
    }

    /// Merge every page's physical lines into logical lines.
    pub fn reconstruct(&self, pages: &[Vec<PhysicalLine>]) -> ReconstructedLines {
        let mut out = ReconstructedLines::default();
        let mut pending: Option<Pending> = None;
        let mut in_contents = false;

        for rows in pages {
            let spacing = average_line_spacing(rows);
            let edges = edge_flags(rows, self.options.boilerplate_edge_lines);
            let mut prev_y: Option<f32> = None;

            for (row, at_edge) in rows.iter().zip(edges) {
                if row.is_blank() {
                    flush(&mut pending, &mut out.lines);
                    push_blank(&mut out.lines, row.page);
                    prev_y = None;
                    continue;
                }
                if at_edge && self.boilerplate.contains(&row.text) {
                    log::debug!("Dropping boilerplate on page {}: {}", row.page, row.text);
                    out.boilerplate_removed += 1;
                    continue;
                }

                let gap_break = prev_y
                    .is_some_and(|y| row.y - y > spacing * self.options.paragraph_gap_ratio);
                prev_y = Some(row.y);
                if gap_break {
                    flush(&mut pending, &mut out.lines);
                    push_blank(&mut out.lines, row.page);
                }

                let row_in_contents = patterns::is_contents_title(&row.text)
                    || patterns::is_leader_entry(&row.text)
                    || (in_contents && patterns::toc_entry(&row.text).is_some());

                let joined = match pending.as_mut() {
                    Some(acc) if acc.ends_with_word_break() && row.starts_lowercase() => {
                        acc.text.pop();
                        acc.absorb(row, "");
                        true
                    }
                    Some(acc) if !self.breaks_between(acc, row, row_in_contents) => {
                        acc.absorb(row, " ");
                        true
                    }
                    _ => false,
                };
                if !joined {
                    flush(&mut pending, &mut out.lines);
                    pending = Some(Pending::start(row, row_in_contents));
                }
                in_contents = row_in_contents;
            }
        }

        flush(&mut pending, &mut out.lines);
        while out.lines.last().is_some_and(Line::is_blank) {
            out.lines.pop();
        }
        out
    }

    /// Whether `row` must start a new logical line instead of continuing `acc`.
    fn breaks_between(&self, acc: &Pending, row: &PhysicalLine, row_in_contents: bool) -> bool {
        if acc.in_contents || row_in_contents {
            return true;
        }
        if patterns::is_list_marker(&row.text)
            || patterns::is_leader_entry(&row.text)
            || patterns::is_contents_title(&row.text)
            || patterns::is_contents_title(&acc.text)
        {
            return true;
        }
        if (acc.font_size - row.font_size).abs() > self.options.font_size_tolerance {
            return true;
        }
        if acc.is_bold() != row.is_bold {
            return true;
        }
        // A hyphen before a capital is a compound or a dash, not a word break.
        acc.ends_with_word_break()
    }
}

fn flush(pending: &mut Option<Pending>, lines: &mut Vec<Line>) {
    if let Some(acc) = pending.take() {
        lines.push(acc.into_line());
    }
}

fn push_blank(lines: &mut Vec<Line>, page: u32) {
    if lines.last().is_some_and(|l| !l.is_blank()) {
        lines.push(Line::blank(page));
    }
}

/// Average vertical distance between consecutive text rows on a page.
fn average_line_spacing(rows: &[PhysicalLine]) -> f32 {
    let ys: Vec<f32> = rows.iter().filter(|r| !r.is_blank()).map(|r| r.y).collect();
    let spacings: Vec<f32> = ys
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return f32::INFINITY;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fragment;

    fn page_of(number: u32, rows: &[(&str, f32)]) -> Page {
        let mut page = Page::new(number);
        for (i, (text, size)) in rows.iter().enumerate() {
            page.push(Fragment::new(*text, *size, number, 72.0 + i as f32 * 14.0));
        }
        page
    }

    fn reconstruct(pages: &[Page]) -> Vec<String> {
        let options = StructureOptions::default();
        let physical: Vec<_> = pages.iter().map(|p| physical_lines(p, &options)).collect();
        let boilerplate = BoilerplateSet::default();
        LineReconstructor::new(&boilerplate, &options)
            .reconstruct(&physical)
            .lines
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn test_fragments_on_one_row() {
        let mut page = Page::new(1);
        page.push(Fragment::new("Hello", 11.0, 1, 100.0));
        page.push(Fragment::new("world", 11.0, 1, 100.5));
        page.push(Fragment::new("Next", 11.0, 1, 114.0));

        let rows = physical_lines(&page, &StructureOptions::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "Hello world");
        assert_eq!(rows[1].text, "Next");
    }

    #[test]
    fn test_row_takes_max_font_size_and_majority_bold() {
        let mut page = Page::new(1);
        page.push(Fragment::new("Bold heading", 14.0, 1, 100.0).bold());
        page.push(Fragment::new("x", 11.0, 1, 100.0));

        let rows = physical_lines(&page, &StructureOptions::default());
        assert_eq!(rows[0].font_size, 14.0);
        assert!(rows[0].is_bold);
    }

    #[test]
    fn test_hyphen_join_lowercase() {
        let lines = reconstruct(&[page_of(1, &[("program-", 11.0), ("ming is fun", 11.0)])]);
        assert_eq!(lines, vec!["programming is fun"]);
    }

    #[test]
    fn test_hyphen_before_uppercase_does_not_join() {
        let lines = reconstruct(&[page_of(1, &[("well-", 11.0), ("Known", 11.0)])]);
        assert_eq!(lines, vec!["well-", "Known"]);
    }

    #[test]
    fn test_wrapped_prose_is_merged() {
        let lines = reconstruct(&[page_of(
            1,
            &[("The quick brown", 11.0), ("fox jumps over", 11.0), ("the lazy dog.", 11.0)],
        )]);
        assert_eq!(lines, vec!["The quick brown fox jumps over the lazy dog."]);
    }

    #[test]
    fn test_blank_row_breaks_paragraph() {
        let lines = reconstruct(&[page_of(
            1,
            &[("First paragraph.", 11.0), ("   ", 11.0), ("Second paragraph.", 11.0)],
        )]);
        assert_eq!(lines, vec!["First paragraph.", "", "Second paragraph."]);
    }

    #[test]
    fn test_font_size_change_breaks() {
        let lines = reconstruct(&[page_of(1, &[("Introduction", 14.0), ("Body text here", 11.0)])]);
        assert_eq!(lines, vec!["Introduction", "Body text here"]);
    }

    #[test]
    fn test_list_markers_break() {
        let lines = reconstruct(&[page_of(
            1,
            &[("Items:", 11.0), ("- apples", 11.0), ("- pears and", 11.0), ("plums", 11.0)],
        )]);
        assert_eq!(lines, vec!["Items:", "- apples", "- pears and plums"]);
    }

    #[test]
    fn test_vertical_gap_breaks_paragraph() {
        let mut page = Page::new(1);
        for (i, text) in ["One line", "two line", "three line"].iter().enumerate() {
            page.push(Fragment::new(*text, 11.0, 1, 100.0 + i as f32 * 14.0));
        }
        page.push(Fragment::new("After gap", 11.0, 1, 200.0));

        let lines = reconstruct(&[page]);
        assert_eq!(lines, vec!["One line two line three line", "", "After gap"]);
    }

    #[test]
    fn test_contents_entries_stay_separate() {
        let lines = reconstruct(&[page_of(
            1,
            &[("Contents", 11.0), ("Introduction 5", 11.0), ("Background 9", 11.0)],
        )]);
        assert_eq!(lines, vec!["Contents", "Introduction 5", "Background 9"]);
    }

    #[test]
    fn test_prose_after_contents_is_merged() {
        let lines = reconstruct(&[page_of(
            1,
            &[
                ("Contents", 11.0),
                ("Introduction ..... 5", 11.0),
                ("Methods ..... 9", 11.0),
                (" ", 11.0),
                ("This book begins with a long sentence that", 11.0),
                ("continues on the next line of the page.", 11.0),
            ],
        )]);
        assert_eq!(
            lines,
            vec![
                "Contents",
                "Introduction ..... 5",
                "Methods ..... 9",
                "",
                "This book begins with a long sentence that continues on the next line of the page.",
            ]
        );
    }

    #[test]
    fn test_boilerplate_only_dropped_at_page_edges() {
        let options = StructureOptions::default();
        let pages: Vec<Page> = ["Alpha", "Beta", "Gamma"]
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let n = i as u32 + 1;
                page_of(
                    n,
                    &[
                        ("Handbook", 11.0),
                        (&format!("{} opens the page", word), 11.0),
                        ("Handbook", 11.0),
                        (&format!("{} closes the page", word), 11.0),
                        ("Handbook", 11.0),
                    ],
                )
            })
            .collect();
        let physical: Vec<_> = pages.iter().map(|p| physical_lines(p, &options)).collect();
        let boilerplate = BoilerplateSet::detect(&physical, &options);
        assert!(boilerplate.contains("Handbook"));

        let out = LineReconstructor::new(&boilerplate, &options).reconstruct(&physical);
        assert_eq!(out.boilerplate_removed, 6);
        assert!(out.lines[0].text.contains("Alpha opens the page Handbook Alpha closes"));
    }

    #[test]
    fn test_paragraph_continues_across_pages() {
        let lines = reconstruct(&[
            page_of(1, &[("This sentence runs", 11.0)]),
            page_of(2, &[("onto the next page.", 11.0)]),
        ]);
        assert_eq!(lines, vec!["This sentence runs onto the next page."]);
    }

    #[test]
    fn test_no_leading_or_trailing_blank() {
        let lines = reconstruct(&[page_of(1, &[(" ", 11.0), ("Text", 11.0), (" ", 11.0)])]);
        assert_eq!(lines, vec!["Text"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(reconstruct(&[]).is_empty());
        assert!(reconstruct(&[Page::new(1)]).is_empty());
    }
}
