//! The answer-to-report formatting pipeline.
//!
//! Strictly pipeline-shaped: sanitize → normalize → classify, then the
//! renderer tokenizes emphasis per block. Every stage is a pure, total
//! function over strings — malformed input degrades to the closest
//! reasonable interpretation (worst case, a single paragraph block),
//! never to an error.

pub mod classify;
pub mod emphasis;
pub mod normalize;
pub mod sanitize;
pub mod types;

use tracing::debug;

pub use types::{Block, Segment};

use crate::language::Language;
use crate::vocab;

/// Format a raw webhook answer into an ordered block sequence.
///
/// An answer that sanitizes/normalizes to nothing yields an empty
/// sequence; callers surface that as "no content", not as an error.
pub fn format(raw: &str, language: Language) -> Vec<Block> {
    let vocabulary = vocab::vocabulary(language);
    let sanitized = sanitize::sanitize(raw);
    let normalized = normalize::normalize(&sanitized, vocabulary);
    let blocks = classify::classify(&normalized, vocabulary);
    debug!(language = ?language, blocks = blocks.len(), "formatted answer");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opt-in pipeline tracing while debugging: RUST_LOG=laudo=debug.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    // =================================================================
    // EMPTY-INPUT DETERMINISM
    // =================================================================

    #[test]
    fn empty_and_whitespace_answers_yield_no_blocks() {
        for lang in Language::ALL {
            assert_eq!(format("", lang), vec![]);
            assert_eq!(format("   ", lang), vec![]);
            assert_eq!(format(" \n\t\n ", lang), vec![]);
        }
    }

    // =================================================================
    // INJECTION SAFETY
    // =================================================================

    #[test]
    fn iframe_markup_never_reaches_a_block() {
        let raw = "Contexto geral\n<iframe src=\"https://evil.example\">x</iframe>\nfebre comum";
        let blocks = format(raw, Language::Pt);
        for block in &blocks {
            if let Some(text) = block.text() {
                assert!(!text.to_lowercase().contains("<iframe"), "leaked in {text:?}");
            }
        }
    }

    // =================================================================
    // HEADING ROUND-TRIP
    // =================================================================

    #[test]
    fn every_known_heading_round_trips_in_every_locale() {
        for lang in Language::ALL {
            for heading in crate::vocab::vocabulary(lang).section_headings {
                let raw = format!("texto antes\n{heading}\ntexto depois");
                let blocks = format(&raw, lang);
                let headings: Vec<_> = blocks
                    .iter()
                    .filter(|b| matches!(b, Block::Heading { .. }))
                    .collect();
                assert_eq!(headings.len(), 1, "{heading:?} in {lang:?}: {blocks:?}");
                assert_eq!(
                    headings[0],
                    &Block::Heading { text: (*heading).into() }
                );
                assert!(blocks
                    .iter()
                    .any(|b| matches!(b, Block::Paragraph { text } if text == "texto antes")));
                assert!(blocks
                    .iter()
                    .any(|b| matches!(b, Block::Paragraph { text } if text == "texto depois")));
            }
        }
    }

    #[test]
    fn accentless_lowercase_heading_still_recognized() {
        let blocks = format("intro\nprevencao:\nlave as mãos", Language::Pt);
        assert!(blocks
            .iter()
            .any(|b| matches!(b, Block::Heading { text } if text == "Prevenção")));
    }

    // =================================================================
    // BULLET CONTINUATION
    // =================================================================

    #[test]
    fn lowercase_continuation_merges_into_bullet() {
        let blocks = format("- primeiro item\ncontinuação em minúscula", Language::Pt);
        assert_eq!(
            blocks,
            vec![Block::Bullet {
                text: "primeiro item continuação em minúscula".into()
            }]
        );
    }

    #[test]
    fn uppercase_line_starts_separate_paragraph_after_bullet() {
        let blocks = format("- primeiro item\nSegunda frase", Language::Pt);
        assert_eq!(
            blocks,
            vec![
                Block::Bullet { text: "primeiro item".into() },
                Block::Paragraph { text: "Segunda frase".into() },
            ]
        );
    }

    // =================================================================
    // ESCAPE DECODING
    // =================================================================

    #[test]
    fn single_and_doubled_escapes_classify_identically() {
        let single = format("a\\nb", Language::Pt);
        let doubled = format("a\\\\nb", Language::Pt);
        assert_eq!(single, doubled);
        assert_eq!(single, vec![Block::Paragraph { text: "a b".into() }]);
    }

    // =================================================================
    // LATERALITY ISOLATION
    // =================================================================

    #[test]
    fn right_and_left_clauses_never_merge() {
        let blocks = format("Lado Direito: ok.Lado Esquerdo: ruim.", Language::Pt);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph { text: "Lado Direito: ok.".into() },
                Block::Paragraph { text: "Lado Esquerdo: ruim.".into() },
            ]
        );
    }

    // =================================================================
    // WHOLE-ANSWER SHAPE
    // =================================================================

    #[test]
    fn representative_answer_formats_end_to_end() {
        init_tracing();
        let raw = "Contexto geral\nA gripe é uma infecção viral comum.\n\n\
                   Sinais e sintomas\n- febre alta\ncom calafrios\n- tosse seca\n\n\
                   Dica: beba bastante água.";
        let blocks = format(raw, Language::Pt);
        // Heading injection isolates each heading with blank separators;
        // the label line and its value rejoin as one soft-wrapped
        // paragraph, with the label still bold-marked for the tokenizer.
        assert_eq!(
            blocks,
            vec![
                Block::Heading { text: "Contexto geral".into() },
                Block::Blank,
                Block::Paragraph { text: "A gripe é uma infecção viral comum.".into() },
                Block::Blank,
                Block::Heading { text: "Sinais e sintomas".into() },
                Block::Blank,
                Block::Bullet { text: "febre alta com calafrios".into() },
                Block::Bullet { text: "tosse seca".into() },
                Block::Blank,
                Block::Paragraph { text: "**Dica:** beba bastante água.".into() },
            ]
        );
    }
}
