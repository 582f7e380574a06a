//! Grouping positioned text runs into classified paragraphs.

use crate::model::{is_spaceless_script_char, Formatting, ProcessedParagraph, TextRun};

use super::classifier::StructureClassifier;
use super::hyphenation::HyphenationRepairer;
use super::thresholds::LayoutThresholds;

/// Groups a page's text runs into paragraphs by vertical gap, then repairs
/// hyphenation and classifies each paragraph.
pub struct ParagraphSegmenter {
    thresholds: LayoutThresholds,
    repairer: HyphenationRepairer,
    classifier: StructureClassifier,
}

impl ParagraphSegmenter {
    /// Create a segmenter with default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(LayoutThresholds::default())
    }

    /// Create a segmenter with custom thresholds.
    pub fn with_thresholds(thresholds: LayoutThresholds) -> Self {
        Self {
            thresholds,
            repairer: HyphenationRepairer::new(),
            classifier: StructureClassifier::with_thresholds(thresholds),
        }
    }

    /// Segment one page's runs into paragraphs in reading order.
    pub fn segment(&self, runs: &[TextRun]) -> Vec<ProcessedParagraph> {
        let ordered = self.reading_order(runs);

        let mut paragraphs = Vec::new();
        let mut current: Option<ParagraphBuffer> = None;
        let mut previous: Option<(&TextRun, usize)> = None;

        for (run, line) in ordered {
            let starts_paragraph = match previous {
                None => true,
                Some((prev, _)) => {
                    (run.y - prev.y).abs() > self.thresholds.paragraph_gap_factor * run.font_size
                }
            };

            if starts_paragraph {
                if let Some(done) = current.take().and_then(|b| self.finalize(b)) {
                    paragraphs.push(done);
                }
                current = Some(ParagraphBuffer::start(run));
            } else if let Some(buffer) = current.as_mut() {
                let separator = match previous {
                    Some((prev, prev_line)) if prev_line == line => {
                        self.is_word_gap(prev, run).then_some(' ')
                    }
                    _ => Some('\n'),
                };
                buffer.append(run, separator);
            }
            previous = Some((run, line));
        }

        if let Some(done) = current.and_then(|b| self.finalize(b)) {
            paragraphs.push(done);
        }

        paragraphs
    }

    /// Order runs top to bottom, then left to right within a line.
    ///
    /// Each run is paired with its line index.
    fn reading_order<'r>(&self, runs: &'r [TextRun]) -> Vec<(&'r TextRun, usize)> {
        let mut by_y: Vec<&TextRun> = runs.iter().collect();
        by_y.sort_by(|a, b| a.y.total_cmp(&b.y));

        let mut lines: Vec<Vec<&TextRun>> = Vec::new();
        for run in by_y {
            match lines.last_mut() {
                Some(line) if (run.y - line[0].y).abs() < self.thresholds.same_line_tolerance => {
                    line.push(run)
                }
                _ => lines.push(vec![run]),
            }
        }

        lines
            .into_iter()
            .enumerate()
            .flat_map(|(index, mut line)| {
                line.sort_by(|a, b| a.x.total_cmp(&b.x));
                line.into_iter().map(move |run| (run, index))
            })
            .collect()
    }

    /// Whether the horizontal gap between two runs on one line separates words.
    ///
    /// Runs that split a word (kerning fragments, per-glyph shows) sit flush
    /// against each other; ideographic scripts never take a space.
    fn is_word_gap(&self, prev: &TextRun, run: &TextRun) -> bool {
        let char_count = run.text.chars().count();
        let avg_char_width = if char_count > 0 && run.width > 0.0 {
            run.width / char_count as f32
        } else {
            run.font_size * 0.5
        };

        if run.x - prev.right() <= avg_char_width * self.thresholds.word_gap_factor {
            return false;
        }

        let spaceless_join = prev.text.chars().last().is_some_and(is_spaceless_script_char)
            && run.text.chars().next().is_some_and(is_spaceless_script_char);
        !spaceless_join
    }

    fn finalize(&self, buffer: ParagraphBuffer) -> Option<ProcessedParagraph> {
        let repaired = self.repairer.repair(&buffer.text);
        let cleaned = repaired.trim();
        if cleaned.is_empty() {
            return None;
        }

        let (kind, text) = self.classifier.classify(cleaned, buffer.font_size);
        Some(ProcessedParagraph {
            text,
            kind,
            formatting: buffer.formatting,
            font_size: buffer.font_size,
        })
    }
}

impl Default for ParagraphSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Text accumulated for the paragraph being built.
struct ParagraphBuffer {
    text: String,
    formatting: Formatting,
    font_size: f32,
}

impl ParagraphBuffer {
    fn start(run: &TextRun) -> Self {
        let mut formatting = Formatting::default();
        formatting.absorb(run.bold, run.italic);
        Self {
            text: run.text.clone(),
            formatting,
            font_size: run.font_size,
        }
    }

    fn append(&mut self, run: &TextRun, separator: Option<char>) {
        match separator {
            Some('\n') => self.text.push('\n'),
            Some(space)
                if !self.text.ends_with(char::is_whitespace)
                    && !run.text.starts_with(char::is_whitespace) =>
            {
                self.text.push(space)
            }
            _ => {}
        }
        self.text.push_str(&run.text);
        self.formatting.absorb(run.bold, run.italic);
        self.font_size = run.font_size;
    }
}
