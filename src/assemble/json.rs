//! JSON rendering of intermediate structures.

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

/// Serialize any model value (paragraphs, block tree, metadata) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Assembly(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, PageParagraphs, ProcessedParagraph};

    #[test]
    fn test_to_json_pretty() {
        let pages = vec![PageParagraphs::new(
            1,
            vec![ProcessedParagraph::heading("Overview", HeadingLevel::H2)],
        )];

        let json = to_json(&pages, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"page_number\": 1"));
        assert!(json.contains("Overview"));
        assert!(json.contains("\"heading\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&ProcessedParagraph::plain("x"), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""kind":{"type":"plain"}"#));
    }
}
