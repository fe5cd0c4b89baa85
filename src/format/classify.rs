//! Line classification of normalized answer text.
//!
//! Folds over the normalized lines with an explicit open-block state —
//! no lookback mutation of already-pushed blocks. A bullet stays open
//! only until any other block is emitted; once sealed it is never
//! reopened.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Block;
use crate::vocab::Vocabulary;

/// Emoji and their invisible companions (variation selectors, ZWJ,
/// keycap combiner). Stripped per line, not during normalization, so
/// emoji-glyph bullet markers are still visible to marker detection.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\u{FE0E}\u{FE0F}\u{200D}\u{20E3}]").expect("valid regex")
});

/// Glyphs that open a bullet without requiring a following space.
const GLYPH_BULLETS: &[char] = &['•', '🔹', '🔸', '▪', '▫', '✅', '✔', '➡'];

/// The block currently accepting lines.
enum Open {
    None,
    Bullet(String),
    Paragraph(Vec<String>),
}

fn flush(open: &mut Open, blocks: &mut Vec<Block>) {
    match std::mem::replace(open, Open::None) {
        Open::None => {}
        Open::Bullet(text) => blocks.push(Block::Bullet { text }),
        Open::Paragraph(lines) => blocks.push(Block::Paragraph {
            text: lines.join(" "),
        }),
    }
}

/// Classify normalized text into an ordered block sequence.
///
/// Empty or whitespace-only input yields an empty sequence — that is the
/// "no content" condition, not an error.
pub fn classify(normalized: &str, vocab: &Vocabulary) -> Vec<Block> {
    if normalized.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut open = Open::None;

    for source_line in normalized.split('\n') {
        let raw = source_line.trim();

        // Bullet markers first, on the raw line: the marker may itself be
        // an emoji glyph.
        if let Some(rest) = strip_bullet_marker(raw) {
            flush(&mut open, &mut blocks);
            let text = strip_emoji(rest).trim().to_string();
            open = Open::Bullet(text);
            continue;
        }

        let stripped = strip_emoji(raw);
        let line = stripped.trim();

        if line.is_empty() {
            flush(&mut open, &mut blocks);
            blocks.push(Block::Blank);
            continue;
        }

        // Laterality lines are never merged with neighbours, even though
        // they read like paragraph text: the right/left pairing must stay
        // visually distinct.
        if vocab.laterality_line.is_match(line) {
            flush(&mut open, &mut blocks);
            blocks.push(Block::Paragraph {
                text: line.to_string(),
            });
            continue;
        }

        let unmarked = line.replace("**", "");
        let unmarked = unmarked.trim_end_matches(':').trim();
        if vocab.match_section_heading(unmarked).is_some() {
            flush(&mut open, &mut blocks);
            blocks.push(Block::Heading {
                text: unmarked.to_string(),
            });
            continue;
        }

        match &mut open {
            // A soft-wrapped bullet explanation continues on the next
            // line without a marker; the lowercase start is what
            // separates it from unrelated new text.
            Open::Bullet(text) if !starts_uppercase(line) => {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(line);
            }
            Open::Paragraph(lines) => lines.push(line.to_string()),
            _ => {
                flush(&mut open, &mut blocks);
                open = Open::Paragraph(vec![line.to_string()]);
            }
        }
    }

    flush(&mut open, &mut blocks);
    blocks
}

/// Text after the bullet marker, if the line starts with one.
fn strip_bullet_marker(line: &str) -> Option<&str> {
    for dash in ["- ", "– "] {
        if let Some(rest) = line.strip_prefix(dash) {
            return Some(rest);
        }
    }
    if line == "-" || line == "–" {
        return Some("");
    }
    let mut chars = line.chars();
    let first = chars.next()?;
    if GLYPH_BULLETS.contains(&first) {
        return Some(chars.as_str().trim_start_matches(['\u{FE0E}', '\u{FE0F}']));
    }
    None
}

fn strip_emoji(line: &str) -> String {
    EMOJI.replace_all(line, "").into_owned()
}

fn starts_uppercase(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
}
