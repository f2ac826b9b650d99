//! ASCII text normalization.
//!
//! Every character is substituted from a fixed table, kept as printable
//! ASCII, or dropped. Accented letters survive as their base letter.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::ClassifiedLine;

/// Maps typographic Unicode to plain ASCII.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize one string to printable ASCII.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut dropped = false;

        for c in text.chars() {
            if let Some(replacement) = substitute(c) {
                out.push_str(replacement);
                continue;
            }
            if is_printable_ascii(c) {
                out.push(c);
                continue;
            }
            if c == '\t' {
                out.push(' ');
                continue;
            }

            // Compatibility decomposition: "é" -> "e" + accent, "①" -> "1".
            let before = out.len();
            for d in std::iter::once(c).nfkd() {
                if is_combining_mark(d) {
                    continue;
                }
                if let Some(replacement) = substitute(d) {
                    out.push_str(replacement);
                } else if is_printable_ascii(d) {
                    out.push(d);
                }
            }
            if out.len() == before {
                dropped = true;
            }
        }

        if dropped {
            collapse_spaces(&out)
        } else {
            out
        }
    }

    /// Normalize the text of every classified line, keeping roles.
    pub fn normalize_lines(&self, lines: Vec<ClassifiedLine>) -> Vec<ClassifiedLine> {
        lines
            .into_iter()
            .map(|line| line.map_text(|text| self.normalize(text)))
            .collect()
    }
}

fn is_printable_ascii(c: char) -> bool {
    c == ' ' || c.is_ascii_graphic()
}

/// Collapse runs of spaces left behind by dropped characters.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = true;
    for c in text.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn substitute(c: char) -> Option<&'static str> {
    let s = match c {
        // Quotes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{02BC}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => "\"",
        '\u{2033}' => "''",
        '\u{2039}' => "<",
        '\u{203A}' => ">",
        '\u{00AB}' => "<<",
        '\u{00BB}' => ">>",

        // Dashes
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2212}' => "-",
        '\u{2014}' | '\u{2015}' => "--",

        // Spaces
        '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => " ",
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00AD}' => "",

        '\u{2026}' => "...",

        // Bullets
        '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{25CF}' | '\u{25E6}' | '\u{25AA}'
        | '\u{25AB}' => "-",
        '\u{2219}' => "*",

        // Symbols
        '\u{00A9}' => "(c)",
        '\u{00AE}' => "(R)",
        '\u{2122}' => "(TM)",
        '\u{00B0}' => " deg",
        '\u{00B1}' => "+/-",
        '\u{00D7}' => "x",
        '\u{00F7}' | '\u{2044}' => "/",

        // Fractions
        '\u{00BC}' => "1/4",
        '\u{00BD}' => "1/2",
        '\u{00BE}' => "3/4",
        '\u{2153}' => "1/3",
        '\u{2154}' => "2/3",

        // Arrows
        '\u{2190}' => "<-",
        '\u{2191}' => "^",
        '\u{2192}' => "->",
        '\u{2193}' => "v",
        '\u{2194}' => "<->",
        '\u{21D2}' => "=>",
        '\u{21D4}' => "<=>",

        // Ligatures
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",

        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Role};

    fn norm(text: &str) -> String {
        TextNormalizer::new().normalize(text)
    }

    #[test]
    fn test_quotes_and_dashes() {
        assert_eq!(norm("\u{201C}Hi\u{201D} it\u{2019}s"), "\"Hi\" it's");
        assert_eq!(norm("1990\u{2013}2000"), "1990-2000");
        assert_eq!(norm("5 \u{2014} Introduction"), "5 -- Introduction");
        assert_eq!(norm("wait\u{2026}"), "wait...");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(norm("\u{00A9} 2024 ACME\u{2122}"), "(c) 2024 ACME(TM)");
        assert_eq!(norm("\u{00BD} cup"), "1/2 cup");
        assert_eq!(norm("a \u{2192} b"), "a -> b");
        assert_eq!(norm("\u{FB01}nal e\u{FB00}ort"), "final effort");
    }

    #[test]
    fn test_accents_keep_base_letter() {
        assert_eq!(norm("caf\u{00E9} na\u{00EF}ve"), "cafe naive");
        assert_eq!(norm("e\u{0301}"), "e");
    }

    #[test]
    fn test_emoji_dropped() {
        assert_eq!(norm("Great job \u{1F600} team"), "Great job team");
        assert_eq!(norm("Done \u{2705}"), "Done");
        assert_eq!(norm("\u{4E2D}\u{6587}"), "");
    }

    #[test]
    fn test_tabs_and_controls() {
        assert_eq!(norm("a\tb"), "a b");
        assert_eq!(norm("a\u{0007}b"), "ab");
    }

    #[test]
    fn test_idempotent_on_ascii() {
        let samples = [
            "Plain ASCII text, with punctuation! (and 123)",
            "  leading and   inner spaces  ",
            "",
            "5 -- Introduction",
        ];
        for sample in samples {
            assert_eq!(norm(sample), sample);
            let once = norm(&format!("{}\u{2014}\u{1F600}", sample));
            assert_eq!(norm(&once), once);
        }
    }

    #[test]
    fn test_normalize_lines_keeps_roles() {
        let lines = vec![
            ClassifiedLine::new(Line::new("\u{2022} item", 11.0, false, 1), Role::Bullet),
            ClassifiedLine::new(Line::new("5 \u{2014} Intro", 11.0, false, 1), Role::TocEntry)
                .with_page_token("5"),
        ];
        let out = TextNormalizer::new().normalize_lines(lines);
        assert_eq!(out[0].role(), Role::Bullet);
        assert_eq!(out[0].text(), "- item");
        assert_eq!(out[1].text(), "5 -- Intro");
        assert_eq!(out[1].page_token(), Some("5"));
    }
}
