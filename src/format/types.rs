use serde::{Deserialize, Serialize};

/// One classified unit of report structure, in document order.
///
/// The sequence of blocks is the formatter's sole output; the renderer
/// decides typography (heading upper-casing, bullet glyph drawing,
/// spacing). `Blank` is a faithful record of one blank source line —
/// collapsing runs of separators is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A recognized section title.
    Heading { text: String },
    /// One or more soft-wrapped source lines joined with single spaces.
    /// Never contains a newline.
    Paragraph { text: String },
    /// A single list item; may have absorbed continuation lines.
    Bullet { text: String },
    /// An explicit paragraph separator.
    Blank,
}

impl Block {
    /// The block's text, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text } | Block::Paragraph { text } | Block::Bullet { text } => {
                Some(text)
            }
            Block::Blank => None,
        }
    }
}

/// One plain-or-bold run of text within a single block.
///
/// Produced by the emphasis tokenizer; `bold` alternates strictly
/// starting from `false` at index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}
