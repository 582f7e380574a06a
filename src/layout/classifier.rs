//! Heading and list classification of paragraph text.

use regex::Regex;

use crate::model::{HeadingLevel, ListKind, ParagraphKind};

use super::thresholds::LayoutThresholds;

/// Classifies cleaned paragraph text as heading, list item or plain text.
///
/// Both checks see the same cleaned text. A paragraph that qualifies as a
/// heading is never a list item, so "1. Introduction" in body-sized type
/// is still a heading.
pub struct StructureClassifier {
    thresholds: LayoutThresholds,
    heading_prefix: Regex,
    bullet_marker: Regex,
    number_marker: Regex,
}

impl StructureClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(LayoutThresholds::default())
    }

    /// Create a classifier with custom thresholds.
    pub fn with_thresholds(thresholds: LayoutThresholds) -> Self {
        Self {
            thresholds,
            heading_prefix: Regex::new(
                r"^(?:\d+(?:\.\d+)*\.?\s|(?i:chapter|section|kapitel|abschnitt)\s)",
            )
            .unwrap(),
            bullet_marker: Regex::new(r"^[•▪▫‣⁃\-–—◦●○■□∙·]\s+").unwrap(),
            number_marker: Regex::new(r"^(?:\d+|[A-Za-z])[.)]\s+").unwrap(),
        }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &LayoutThresholds {
        &self.thresholds
    }

    /// Classify `text` set at `font_size`.
    ///
    /// Returns the kind and the text to store, which has its marker
    /// stripped for list items.
    pub fn classify(&self, text: &str, font_size: f32) -> (ParagraphKind, String) {
        if let Some(level) = self.heading_level(text, font_size) {
            return (ParagraphKind::Heading(level), text.to_string());
        }
        if let Some((kind, rest)) = self.list_marker(text) {
            return (ParagraphKind::ListItem(kind), rest.to_string());
        }
        (ParagraphKind::Plain, text.to_string())
    }

    /// Heading level for `text`, or None if it is not a heading.
    pub fn heading_level(&self, text: &str, font_size: f32) -> Option<HeadingLevel> {
        let t = &self.thresholds;
        if text.chars().count() >= t.heading_max_chars {
            return None;
        }

        let is_heading = font_size > t.heading_min_font_size
            || self.heading_prefix.is_match(text)
            || self.is_uppercase_heading(text);
        if !is_heading {
            return None;
        }

        Some(if font_size > t.h1_font_size {
            HeadingLevel::H1
        } else if font_size > t.h2_font_size {
            HeadingLevel::H2
        } else {
            HeadingLevel::H3
        })
    }

    /// List kind and marker-stripped text, or None if not a list item.
    pub fn list_marker<'t>(&self, text: &'t str) -> Option<(ListKind, &'t str)> {
        if let Some(m) = self.bullet_marker.find(text) {
            return Some((ListKind::Bullet, text[m.end()..].trim()));
        }
        if let Some(m) = self.number_marker.find(text) {
            return Some((ListKind::Number, text[m.end()..].trim()));
        }
        None
    }

    fn is_uppercase_heading(&self, text: &str) -> bool {
        text.chars().count() > self.thresholds.uppercase_min_chars
            && text.chars().any(char::is_alphabetic)
            && !text.chars().any(char::is_lowercase)
    }
}

impl Default for StructureClassifier {
    fn default() -> Self {
        Self::new()
    }
}
