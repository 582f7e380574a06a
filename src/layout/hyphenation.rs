//! Rejoining words split across line breaks.

use std::borrow::Cow;

use regex::Regex;

/// Rejoins words broken by line wrapping.
///
/// Two lexical passes, applied in order:
/// 1. `exam-\nple` becomes `example`, regardless of case.
/// 2. `cat\nfish` becomes `catfish` when the next line starts lowercase;
///    a break before an uppercase or non-letter character is kept.
///
/// Neither pass looks at position or font size, so a lowercase line that
/// really does start something new is merged into the previous word.
pub struct HyphenationRepairer {
    hyphen_break: Regex,
    soft_break: Regex,
}

impl HyphenationRepairer {
    /// Create a repairer.
    pub fn new() -> Self {
        Self {
            hyphen_break: Regex::new(r"(\w)-\n[ \t]*(\w)").unwrap(),
            soft_break: Regex::new(r"(\w)\n[ \t]*(\p{Ll})").unwrap(),
        }
    }

    /// Apply both passes to `text`.
    pub fn repair(&self, text: &str) -> String {
        let joined = replace_until_stable(&self.hyphen_break, text.to_string());
        replace_until_stable(&self.soft_break, joined)
    }
}

impl Default for HyphenationRepairer {
    fn default() -> Self {
        Self::new()
    }
}

/// Repair hyphenation with a one-off repairer.
pub fn repair_hyphenation(text: &str) -> String {
    HyphenationRepairer::new().repair(text)
}

// Matches consume the first character of the next line, so one-letter
// lines need another pass. Every replacement removes a newline.
fn replace_until_stable(re: &Regex, mut text: String) -> String {
    loop {
        match re.replace_all(&text, "$1$2") {
            Cow::Borrowed(_) => return text,
            Cow::Owned(next) => text = next,
        }
    }
}
