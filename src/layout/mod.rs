//! Layout analysis: paragraph segmentation, hyphenation repair and
//! structure classification.
//!
//! All heuristics are lexical or geometric and read their limits from
//! [`LayoutThresholds`].

mod classifier;
mod hyphenation;
mod segmenter;
pub mod thresholds;

pub use classifier::StructureClassifier;
pub use hyphenation::{repair_hyphenation, HyphenationRepairer};
pub use segmenter::ParagraphSegmenter;
pub use thresholds::LayoutThresholds;
