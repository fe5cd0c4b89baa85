//! Inline emphasis tokenization for a single block's text.
//!
//! The renderer calls this once per block. Splitting on the bold marker
//! assigns boldness by position parity, so an unterminated marker is not
//! an error — the trailing piece just keeps its parity.

use super::types::Segment;

/// The bold-marker delimiter the webhook uses.
const BOLD_MARKER: &str = "**";

/// A literal bullet glyph mid-text renders as a bold dot.
const BULLET_GLYPH: char = '•';

/// Split block text into alternating plain/bold segments, plain first.
pub fn tokenize(text: &str) -> Vec<Segment> {
    let text = text.replace(BULLET_GLYPH, "**•**");
    text.split(BOLD_MARKER)
        .enumerate()
        .map(|(i, piece)| Segment {
            text: piece.to_string(),
            bold: i % 2 == 1,
        })
        .collect()
}
