//! JSON structure dump.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any pipeline value (classified lines, an analysis) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassifiedLine, Line, Role};

    fn sample() -> Vec<ClassifiedLine> {
        vec![
            ClassifiedLine::new(Line::new("Intro", 18.0, true, 1), Role::Heading1),
            ClassifiedLine::new(Line::new("5 -- Methods", 11.0, false, 2), Role::TocEntry)
                .with_page_token("5"),
        ]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"heading1\""));
        assert!(json.contains("\"toc_entry\""));
        assert!(json.contains("\"page_token\": \"5\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(sample().as_slice(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let parsed: Vec<ClassifiedLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
