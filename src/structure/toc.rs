//! Table-of-contents region detection.

use std::collections::BTreeMap;

use crate::model::Line;

use super::options::StructureOptions;
use super::patterns;

/// Which lines of a document sit inside a table of contents.
///
/// A region opens after a "Contents" / "Table of Contents" title and stays
/// open across entries and blank lines until more than `toc_max_gap`
/// consecutive non-entry lines appear. Pages dense with dot-leader entries
/// are contents regions even without a title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocRegions {
    mask: Vec<bool>,
}

impl TocRegions {
    /// Detect contents regions over the full line sequence.
    pub fn detect(lines: &[Line], options: &StructureOptions) -> Self {
        let mut mask = vec![false; lines.len()];

        let mut i = 0;
        while i < lines.len() {
            if !patterns::is_contents_title(&lines[i].text) {
                i += 1;
                continue;
            }
            let mut gap = 0;
            let mut j = i + 1;
            while j < lines.len() {
                let line = &lines[j];
                if line.is_blank() {
                    j += 1;
                    continue;
                }
                if patterns::toc_entry(&line.text).is_some() {
                    mask[j] = true;
                    gap = 0;
                } else {
                    gap += 1;
                    if gap > options.toc_max_gap {
                        break;
                    }
                }
                j += 1;
            }
            i = j.max(i + 1);
        }

        for page in dense_pages(lines, options) {
            for (idx, line) in lines.iter().enumerate() {
                if line.page == page && patterns::toc_entry(&line.text).is_some() {
                    mask[idx] = true;
                }
            }
        }

        let count = mask.iter().filter(|m| **m).count();
        if count > 0 {
            log::debug!("Detected {} table-of-contents lines", count);
        }
        Self { mask }
    }

    /// Check if the line at `index` is inside a contents region.
    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }
}

/// Pages on which dot-leader entries make up a large share of the lines.
fn dense_pages(lines: &[Line], options: &StructureOptions) -> Vec<u32> {
    let mut per_page: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for line in lines.iter().filter(|l| !l.is_blank()) {
        let entry = per_page.entry(line.page).or_insert((0, 0));
        entry.1 += 1;
        if patterns::is_leader_entry(&line.text) {
            entry.0 += 1;
        }
    }

    per_page
        .into_iter()
        .filter(|(_, (leaders, total))| {
            *leaders >= options.toc_min_entries
                && *leaders as f32 / *total as f32 >= options.toc_page_density
        })
        .map(|(page, _)| page)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[(&str, u32)]) -> Vec<Line> {
        texts
            .iter()
            .map(|(t, page)| Line::new(*t, 11.0, false, *page))
            .collect()
    }

    #[test]
    fn test_region_after_contents_title() {
        let doc = lines(&[
            ("Contents", 1),
            ("Introduction ..... 5", 1),
            ("", 1),
            ("Methods 9", 1),
            ("Chapter 1", 2),
            ("Some prose here.", 2),
            ("More prose.", 2),
            ("Still more prose.", 2),
            ("Later mention 12", 2),
        ]);
        let regions = TocRegions::detect(&doc, &StructureOptions::default());

        assert!(!regions.contains(0));
        assert!(regions.contains(1));
        assert!(regions.contains(3));
        // "Chapter 1" parses as an entry, so the region spans it too.
        assert!(regions.contains(4));
        assert!(!regions.contains(5));
        assert!(!regions.contains(8));
    }

    #[test]
    fn test_leader_lines_without_title_need_density() {
        let doc = lines(&[
            ("Preface ..... iii", 1),
            ("Overview ..... 1", 1),
            ("Details ..... 7", 1),
            ("Body text", 2),
            ("Stray ..... 4", 2),
            ("More body", 2),
            ("Even more body", 2),
        ]);
        let regions = TocRegions::detect(&doc, &StructureOptions::default());
        assert!(regions.contains(0));
        assert!(regions.contains(2));
        assert!(!regions.contains(4));
    }

    #[test]
    fn test_no_contents() {
        let doc = lines(&[("Plain text 5", 1), ("More text", 1)]);
        let regions = TocRegions::detect(&doc, &StructureOptions::default());
        assert!(!regions.contains(0));
        assert!(!regions.contains(10));
    }
}
