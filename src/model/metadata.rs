//! Document-level metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document metadata read from the PDF info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Labelled fields that are present, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Format", format!("PDF {}", self.pdf_version)),
            ("Pages", self.page_count.to_string()),
            (
                "Encrypted",
                if self.encrypted { "Yes" } else { "No" }.to_string(),
            ),
        ];

        let optional = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                fields.push((label, value.clone()));
            }
        }
        if let Some(created) = self.created {
            fields.push(("Created", created.to_rfc3339()));
        }
        if let Some(modified) = self.modified {
            fields.push(("Modified", modified.to_rfc3339()));
        }

        fields
    }
}
