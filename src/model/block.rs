//! Structural tree of the output document.

use serde::{Deserialize, Serialize};

use super::{Formatting, HeadingLevel, ListKind};

/// A block in the assembled output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading
    Heading {
        /// Heading level
        level: HeadingLevel,
        /// Heading text
        text: String,
        /// Run emphasis
        formatting: Formatting,
    },

    /// A bulleted or numbered list item
    ListItem {
        /// Marker family
        kind: ListKind,
        /// Item text without its marker
        text: String,
        /// Run emphasis
        formatting: Formatting,
    },

    /// A regular paragraph
    Paragraph {
        /// Paragraph text
        text: String,
        /// Run emphasis
        formatting: Formatting,
    },

    /// An explicit page break
    PageBreak,
}

impl Block {
    /// Check if this block is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }

    /// Text carried by the block, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::ListItem { text, .. }
            | Block::Paragraph { text, .. } => Some(text),
            Block::PageBreak => None,
        }
    }
}

/// The ordered block sequence of an assembled document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl StructuredDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of explicit page breaks.
    pub fn page_break_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_page_break()).count()
    }

    /// Number of heading blocks.
    pub fn heading_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { .. }))
            .count()
    }

    /// Number of list item blocks.
    pub fn list_item_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::ListItem { .. }))
            .count()
    }

    /// Number of blocks carrying text.
    pub fn text_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_page_break()).count()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Split the block sequence at page breaks.
    pub fn pages(&self) -> Vec<&[Block]> {
        self.blocks.split(Block::is_page_break).collect()
    }
}
