//! Markdown rendering for classified lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ClassifiedLine, Role};

/// Whitespace left in front of punctuation by kerned extraction (`word ,`).
static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([.,!?;:])").expect("valid punctuation regex")
});

/// Render classified lines to Markdown.
pub fn to_markdown(lines: &[ClassifiedLine]) -> String {
    MarkdownRenderer::new().render(lines)
}

/// Markdown renderer.
///
/// Output is a sequence of blocks separated by exactly one blank line.
/// Headings and paragraphs are blocks of their own; runs of bullets, numbered
/// items or TOC entries form one block each. Blank lines only split runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render a line stream. Non-empty output ends with a single newline.
    pub fn render(&self, lines: &[ClassifiedLine]) -> String {
        let mut blocks: Vec<Vec<String>> = Vec::new();
        let mut group: Option<Role> = None;

        for line in lines {
            let role = line.role();
            if role == Role::Blank {
                group = None;
                continue;
            }
            let text = line.text().trim();
            if text.is_empty() {
                continue;
            }
            let text = SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1");

            let rendered = self.render_line(line, &text);
            match role {
                Role::Bullet | Role::NumberedItem | Role::TocEntry => {
                    match blocks.last_mut() {
                        Some(block) if group == Some(role) => block.push(rendered),
                        _ => blocks.push(vec![rendered]),
                    }
                    group = Some(role);
                }
                _ => {
                    blocks.push(vec![rendered]);
                    group = None;
                }
            }
        }

        if blocks.is_empty() {
            return String::new();
        }
        let mut output = blocks
            .iter()
            .map(|block| block.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        output.push('\n');
        output
    }

    fn render_line(&self, line: &ClassifiedLine, text: &str) -> String {
        match line.role() {
            Role::Heading1 | Role::Heading2 | Role::Heading3 => {
                let level = line.role().heading_level().unwrap_or(1) as usize;
                format!("{} {}", "#".repeat(level), text)
            }
            Role::Bullet => format!("- {}", text),
            Role::NumberedItem => format!("{}. {}", line.ordinal().unwrap_or("1"), text),
            Role::TocEntry | Role::Paragraph | Role::Blank => text.to_string(),
        }
    }
}
