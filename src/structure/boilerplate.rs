//! Repeated header/footer detection.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::lines::PhysicalLine;
use super::options::StructureOptions;

/// Normalized texts of rows judged to be running headers or footers.
///
/// Rows that are nothing but a page number normalize to an empty key. They
/// are tracked by a separate flag so that numeric rows in the body never
/// match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoilerplateSet {
    entries: BTreeSet<String>,
    /// Bare page numbers recur at the page edges
    #[serde(default)]
    page_numbers: bool,
}

impl BoilerplateSet {
    /// Scan the first and last rows of every page and collect the normalized
    /// texts that recur on enough pages.
    ///
    /// Documents shorter than `boilerplate_min_pages` yield an empty set.
    pub fn detect(pages: &[Vec<PhysicalLine>], options: &StructureOptions) -> Self {
        let mut set = Self::default();
        if pages.len() < options.boilerplate_min_pages.max(2) {
            log::debug!(
                "Skipping boilerplate detection: {} pages (minimum {})",
                pages.len(),
                options.boilerplate_min_pages
            );
            return set;
        }

        let mut page_counts: HashMap<String, usize> = HashMap::new();
        for rows in pages {
            let edges = edge_flags(rows, options.boilerplate_edge_lines);

            // Count each key once per page.
            let keys: HashSet<String> = rows
                .iter()
                .zip(&edges)
                .filter(|(r, at_edge)| {
                    **at_edge && r.text.chars().count() <= options.boilerplate_max_chars
                })
                .map(|(r, _)| normalize_key(&r.text))
                .collect();
            for key in keys {
                *page_counts.entry(key).or_insert(0) += 1;
            }
        }

        let threshold = options.boilerplate_threshold(pages.len());
        for (key, count) in page_counts {
            if count < threshold {
                continue;
            }
            if key.is_empty() {
                log::debug!("Boilerplate ({}x): bare page numbers", count);
                set.page_numbers = true;
            } else {
                log::debug!("Boilerplate ({}x): {:?}", count, key);
                set.entries.insert(key);
            }
        }
        set
    }

    /// Check if a row's text matches a boilerplate entry.
    ///
    /// Only meaningful for rows at a page edge; see [`edge_flags`].
    pub fn contains(&self, text: &str) -> bool {
        let key = normalize_key(text);
        if key.is_empty() {
            self.page_numbers && text.chars().any(|c| c.is_ascii_digit())
        } else {
            self.entries.contains(&key)
        }
    }

    /// Number of entries, counting bare page numbers as one.
    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.page_numbers)
    }

    /// Check if no boilerplate was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over normalized text entries.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Mark the first and last `edge_lines` non-blank rows of a page.
///
/// Only these rows are header/footer candidates, and only these rows are
/// dropped.
pub fn edge_flags(rows: &[PhysicalLine], edge_lines: usize) -> Vec<bool> {
    let text_count = rows.iter().filter(|r| !r.is_blank()).count();
    let mut seen = 0;
    rows.iter()
        .map(|row| {
            if row.is_blank() {
                return false;
            }
            let index = seen;
            seen += 1;
            index < edge_lines || index + edge_lines >= text_count
        })
        .collect()
}

/// Strip digits and collapse whitespace so "Page 3" and "Page 14" compare equal.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_ascii_digit()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
