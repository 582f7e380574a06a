//! Document info dictionary reading.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use lopdf::{Dictionary, Object};

use crate::model::Metadata;

use super::backend::{decode_text_simple, LopdfBackend};

/// Read document metadata from the trailer's Info dictionary.
///
/// Missing or malformed entries are left unset; reading metadata never fails.
pub fn read_metadata(backend: &LopdfBackend) -> Metadata {
    let doc = backend.raw_doc();
    let mut metadata = Metadata::with_version(backend.version());
    metadata.page_count = backend.page_count();
    metadata.encrypted = doc.is_encrypted();

    let info = doc.trailer.get(b"Info").ok().and_then(|info| match info {
        Object::Reference(r) => doc.get_dictionary(*r).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    });

    if let Some(info) = info {
        metadata.title = info_string(info, b"Title");
        metadata.author = info_string(info, b"Author");
        metadata.subject = info_string(info, b"Subject");
        metadata.creator = info_string(info, b"Creator");
        metadata.producer = info_string(info, b"Producer");
        metadata.created = info_string(info, b"CreationDate").and_then(|d| parse_pdf_date(&d));
        metadata.modified = info_string(info, b"ModDate").and_then(|d| parse_pdf_date(&d));
    }

    metadata
}

fn info_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        Object::String(bytes, _) => decode_text_simple(bytes),
        Object::Name(bytes) => String::from_utf8_lossy(bytes).to_string(),
        _ => return None,
    };
    let value = value.trim_matches(char::from(0)).trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`) into UTC.
///
/// Only the year is mandatory. A missing timezone is read as UTC.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    if s.len() < 4 {
        return None;
    }

    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match s.get(range) {
            Some(digits) if digits.chars().all(|c| c.is_ascii_digit()) => digits.parse().ok(),
            Some(_) => None,
            None => Some(default),
        }
    };

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month = field(4..6, 1)?;
    let day = field(6..8, 1)?;
    let hour = field(8..10, 0)?;
    let minute = field(10..12, 0)?;
    let second = field(12..14, 0)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;

    let offset = s.get(14..).map(parse_offset).unwrap_or(Some(0))?;
    let zone = FixedOffset::east_opt(offset)?;
    zone.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Offset in seconds from a `Z`, `+HH'mm'` or `-HH'mm'` suffix.
fn parse_offset(suffix: &str) -> Option<i32> {
    let mut chars = suffix.chars();
    let sign = match chars.next() {
        None | Some('Z') => return Some(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    let digits: String = chars.filter(|c| c.is_ascii_digit()).collect();
    let hours: i32 = digits.get(0..2).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minutes: i32 = digits.get(2..4).and_then(|m| m.parse().ok()).unwrap_or(0);
    Some(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.hour(), 10);
        assert_eq!(date.second(), 45);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_parse_pdf_date_with_offset() {
        let date = parse_pdf_date("D:20240115103000+02'00'").unwrap();
        assert_eq!(date.hour(), 8);

        let date = parse_pdf_date("D:20240115103000-05'30'").unwrap();
        assert_eq!(date.hour(), 16);
        assert_eq!(date.minute(), 0);

        let date = parse_pdf_date("D:20240115103000Z").unwrap();
        assert_eq!(date.hour(), 10);
    }

    #[test]
    fn test_parse_pdf_date_rejects_garbage() {
        assert!(parse_pdf_date("D:20").is_none());
        assert!(parse_pdf_date("D:2024AB").is_none());
        assert!(parse_pdf_date("D:20241399").is_none());
    }

    #[test]
    fn test_info_string_trims_padding() {
        let mut dict = Dictionary::new();
        dict.set("Title", Object::string_literal("  Annual Report \u{0}"));
        dict.set("Author", Object::string_literal(""));
        assert_eq!(info_string(&dict, b"Title"), Some("Annual Report".into()));
        assert_eq!(info_string(&dict, b"Author"), None);
        assert_eq!(info_string(&dict, b"Missing"), None);
    }
}
