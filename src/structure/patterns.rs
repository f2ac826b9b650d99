//! Lexical patterns shared by the line reconstructor and the classifier.

use std::sync::LazyLock;

use regex::Regex;

/// `- item`, `* item`, `• item`, `●item` ...
static BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*–]\s+|[•●◦▪‣⁃]\s*)(?P<body>\S.*)$").expect("valid bullet regex")
});

/// `1. item`, `12) item`
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<num>\d{1,3})[.)]\s+(?P<body>\S.*)$").expect("valid numbered regex")
});

/// `Title ..... 12`, `Title . . . iv`, `Title 12`
static TOC_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?P<title>.*?\S)\s*(?P<leader>(?:\.\s*){2,}|…+\s*|·{2,}\s*|\s)\s*(?P<page>\d{1,4}|[ivxlcdm]{1,6})\s*$",
    )
    .expect("valid toc regex")
});

/// "Contents", "Table of Contents", "CONTENTS"
static CONTENTS_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:table\s+of\s+)?contents\s*:?\s*$").expect("valid contents regex")
});

/// A bullet item split into its body text.
pub fn bullet_body(text: &str) -> Option<&str> {
    BULLET
        .captures(text)
        .and_then(|c| c.name("body"))
        .map(|m| m.as_str().trim_end())
}

/// A numbered item split into numeral and body text.
pub fn numbered_parts(text: &str) -> Option<(&str, &str)> {
    let caps = NUMBERED.captures(text)?;
    Some((caps.name("num")?.as_str(), caps.name("body")?.as_str().trim_end()))
}

/// Check if the line starts with a list marker.
pub fn is_list_marker(text: &str) -> bool {
    BULLET.is_match(text) || NUMBERED.is_match(text)
}

/// A table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry<'a> {
    /// Entry title without the leader
    pub title: &'a str,
    /// Page token (arabic or roman)
    pub page: &'a str,
    /// Whether a dot leader separated title and page
    pub has_leader: bool,
}

/// Parse a line of the form `title <leader|space> page`.
pub fn toc_entry(text: &str) -> Option<TocEntry<'_>> {
    let caps = TOC_ENTRY.captures(text)?;
    let title = caps.name("title")?.as_str().trim_end_matches(['.', ' ', '…', '·']);
    if title.is_empty() || title.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let has_leader = caps
        .name("leader")
        .map(|m| !m.as_str().trim().is_empty())
        .unwrap_or(false);
    let page = caps.name("page")?.as_str();
    // Roman tokens after plain whitespace are too often ordinary words.
    if !has_leader && !page.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(TocEntry {
        title,
        page,
        has_leader,
    })
}

/// Check for a dot-leader TOC entry (`Title ..... 12`).
pub fn is_leader_entry(text: &str) -> bool {
    toc_entry(text).map(|e| e.has_leader).unwrap_or(false)
}

/// Check for a contents title line.
pub fn is_contents_title(text: &str) -> bool {
    CONTENTS_TITLE.is_match(text)
}

/// Check if the text ends a sentence or clause.
pub fn has_terminal_punctuation(text: &str) -> bool {
    text.trim_end()
        .ends_with(['.', '!', '?', ',', ';', ':'])
}
