//! Structural normalization of sanitized answer text.
//!
//! A fixed, order-dependent sequence of textual rewrites that inject
//! explicit line breaks around recognized headings, labels and markers,
//! so the line classifier never has to guess where one semantic unit ends
//! and the next begins. Every step is a total string rewrite; nothing
//! here can fail. Emoji stripping is deliberately NOT done here — the
//! classifier strips per line, after bullet-marker detection.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::vocab::Vocabulary;

/// One named rewrite. The pipeline order is load-bearing: later steps
/// assume earlier ones already inserted their breaks.
struct Rewrite {
    name: &'static str,
    apply: fn(&str, &Vocabulary) -> String,
}

const PIPELINE: &[Rewrite] = &[
    Rewrite { name: "section_headings", apply: inject_section_headings },
    Rewrite { name: "subsection_headings", apply: inject_subsection_headings },
    Rewrite { name: "phase_markers", apply: break_phase_markers },
    Rewrite { name: "system_info", apply: pair_system_info },
    Rewrite { name: "alert_bolding", apply: bold_alert_labels },
    Rewrite { name: "alert_breaks", apply: break_alert_labels },
    Rewrite { name: "laterality", apply: break_laterality },
    Rewrite { name: "escape_decoding", apply: decode_escapes },
    Rewrite { name: "whitespace", apply: collapse_whitespace },
];

/// Run the full rewrite pipeline over sanitized text.
///
/// A result that is empty or whitespace-only comes back as the empty
/// string; the classifier turns that into an empty block list.
pub fn normalize(sanitized: &str, vocab: &Vocabulary) -> String {
    let mut text = sanitized.to_string();
    for step in PIPELINE {
        let rewritten = (step.apply)(&text, vocab);
        if rewritten != text {
            debug!(step = step.name, "rewrite changed text");
        }
        text = rewritten;
    }
    text.trim().to_string()
}

// ═══════════════════════════════════════════
// Heading / marker injection
// ═══════════════════════════════════════════

/// Isolate every section-heading occurrence — optionally bold-wrapped,
/// optionally colon-suffixed — onto its own line, in canonical form.
fn inject_section_headings(text: &str, vocab: &Vocabulary) -> String {
    apply_rules(text, &vocab.section_rules)
}

/// Same treatment for the smaller subsection vocabulary.
fn inject_subsection_headings(text: &str, vocab: &Vocabulary) -> String {
    apply_rules(text, &vocab.subsection_rules)
}

fn apply_rules(text: &str, rules: &[(Regex, String)]) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in rules {
        text = pattern
            .replace_all(&text, regex::NoExpand(replacement))
            .into_owned();
    }
    text
}

/// Disease-phase enumerations come one per line even when the source ran
/// them together: break before the phase prefix and the crisis marker.
fn break_phase_markers(text: &str, vocab: &Vocabulary) -> String {
    vocab.phase_break.replace_all(text, "${1}\n${2}").into_owned()
}

/// Rewrite `**Sistema ...**: value` / `Sistema ... - value` pairs to
/// `Label:` on its own line with the value on the next, and force the
/// fixed scientific/common-name labels onto fresh lines.
fn pair_system_info(text: &str, vocab: &Vocabulary) -> String {
    let text = vocab.system_bold.replace_all(text, "\n${1}:\n");
    let text = vocab.system_dash.replace_all(&text, "\n${1}:\n");
    vocab.name_label_break.replace_all(&text, "\n${1}:\n").into_owned()
}

// ═══════════════════════════════════════════
// Alert labels
// ═══════════════════════════════════════════

/// Wrap alert keywords in bold markers wherever they appear as whole
/// words (re-wrapping already-bold occurrences without doubling).
fn bold_alert_labels(text: &str, vocab: &Vocabulary) -> String {
    vocab.alert_wrap.replace_all(text, "**${1}**").into_owned()
}

/// Give each alert keyword its own fresh line — swallowing whatever
/// stray punctuation, emoji or markers preceded it — normalized to a
/// bold `Label:` with the explanation on the following line.
fn break_alert_labels(text: &str, vocab: &Vocabulary) -> String {
    vocab.alert_break.replace_all(text, "\n**${1}:**\n").into_owned()
}

// ═══════════════════════════════════════════
// Laterality
// ═══════════════════════════════════════════

/// Right/left labels always start their own line, unbolded to the bare
/// `Label:` form the classifier recognizes. A left-side clause directly
/// after a right-side clause gets a break even with no separator at all.
fn break_laterality(text: &str, vocab: &Vocabulary) -> String {
    let text = vocab.laterality_unbold.replace_all(text, "${1}:");
    vocab
        .laterality_break
        .replace_all(&text, "${1}\n${2}:")
        .into_owned()
}

// ═══════════════════════════════════════════
// Escapes and whitespace
// ═══════════════════════════════════════════

/// Decode literal backslash escapes into real characters.
///
/// Capped at three passes: the webhook sometimes double-escapes, and a
/// doubled escape must resolve before the single form within each pass.
fn decode_escapes(text: &str, _vocab: &Vocabulary) -> String {
    const ESCAPES: [(&str, &str); 4] = [
        ("\\n", "\n"),
        ("\\r", "\r"),
        ("\\t", "\t"),
        ("\\\"", "\""),
    ];
    let mut text = text.to_string();
    for _ in 0..3 {
        let before = text.clone();
        for (escape, real) in ESCAPES {
            let doubled = format!("\\{escape}");
            text = text.replace(&doubled, real);
            text = text.replace(escape, real);
        }
        if text == before {
            break;
        }
    }
    text
}

static TRAILING_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid regex"));
static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Trim trailing whitespace before newlines and cap newline runs at two,
/// so at most one blank line separates any two units.
fn collapse_whitespace(text: &str, _vocab: &Vocabulary) -> String {
    let text = TRAILING_WS.replace_all(text, "\n");
    NEWLINE_RUNS.replace_all(&text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::vocab::vocabulary;

    fn norm(text: &str) -> String {
        normalize(text, vocabulary(Language::Pt))
    }

    // =================================================================
    // INDIVIDUAL STEPS
    // =================================================================

    #[test]
    fn steps_are_independently_applicable() {
        let vocab = vocabulary(Language::Pt);
        // Each rewrite is a plain string → string function; none depends
        // on the pipeline having run.
        assert_eq!(
            bold_alert_labels("dica: repouso", vocab),
            "**dica** repouso"
        );
        assert_eq!(decode_escapes("um\\ndois", vocab), "um\ndois");
        assert_eq!(collapse_whitespace("a\n\n\n\nb", vocab), "a\n\nb");
    }

    // =================================================================
    // HEADING INJECTION
    // =================================================================

    #[test]
    fn heading_mid_text_gets_own_line() {
        let out = norm("introdução Tratamento use compressas frias");
        assert!(out.contains("introdução\nTratamento\nuse compressas frias"));
    }

    #[test]
    fn heading_bold_and_colon_variants_normalize_to_canonical() {
        for variant in ["**Tratamento**:", "**Tratamento:**", "tratamento:", "TRATAMENTO"] {
            let out = norm(&format!("antes {variant} depois"));
            assert!(
                out.contains("\nTratamento\n"),
                "variant {variant:?} gave {out:?}"
            );
        }
    }

    #[test]
    fn heading_accentless_spelling_recognized() {
        let out = norm("texto prevencao: lave as mãos");
        assert!(out.contains("\nPrevenção\n"));
    }

    #[test]
    fn heading_inside_longer_word_not_injected() {
        let out = norm("os tratamentos variam");
        assert_eq!(out, "os tratamentos variam");
    }

    #[test]
    fn subsection_injected_on_own_line() {
        let out = norm("veja fases da doença a seguir");
        assert!(out.contains("\nFases da doença\n"));
    }

    // =================================================================
    // PHASE MARKERS
    // =================================================================

    #[test]
    fn phase_enumerations_break_one_per_line() {
        let out = norm("Fase de incubação dura dias Fase de convalescença dura semanas");
        assert!(out.contains("dias\nFase de convalescença"));
    }

    #[test]
    fn crisis_marker_starts_new_line() {
        let out = norm("pode ocorrer Crise epiléptica ou epileptoide em casos raros");
        assert!(out.contains("ocorrer\nCrise epiléptica ou epileptoide"));
    }

    // =================================================================
    // SYSTEM INFO
    // =================================================================

    #[test]
    fn bold_system_pair_becomes_label_and_value_lines() {
        let out = norm("**Sistema Nervoso**: dores de cabeça frequentes");
        assert!(out.contains("Sistema Nervoso:\ndores de cabeça frequentes"));
    }

    #[test]
    fn dashed_system_pair_becomes_label_and_value_lines() {
        let out = norm("Sistema Digestivo - náuseas leves");
        assert!(out.contains("Sistema Digestivo:\nnáuseas leves"));
    }

    #[test]
    fn scientific_name_label_starts_new_line() {
        let out = norm("dados gerais Nome Científico: Panthera onca");
        assert!(out.contains("\nNome Científico:\nPanthera onca"));
    }

    // =================================================================
    // ALERT LABELS
    // =================================================================

    #[test]
    fn alert_label_isolated_and_bolded() {
        let out = norm("beba água. Dica: use roupas leves");
        assert!(out.contains("beba água.\n**Dica:**\nuse roupas leves"));
    }

    #[test]
    fn alert_label_with_emoji_prefix_normalized() {
        let out = norm("💡 Atenção: procure um médico");
        assert!(out.starts_with("**Atenção:**\nprocure um médico"));
    }

    #[test]
    fn already_bold_alert_label_not_doubled() {
        let out = norm("**Dica**: durma cedo");
        assert!(out.contains("**Dica:**"));
        assert!(!out.contains("****"));
    }

    // =================================================================
    // LATERALITY
    // =================================================================

    #[test]
    fn left_side_clause_breaks_after_right_side_clause() {
        let out = norm("Lado Direito: ok.Lado Esquerdo: ruim.");
        assert!(out.contains("Lado Direito: ok.\nLado Esquerdo: ruim."));
    }

    #[test]
    fn bold_laterality_label_unwrapped() {
        let out = norm("**Lado Direito:** dor leve");
        assert!(out.contains("Lado Direito: dor leve"));
        assert!(!out.contains("**"));
    }

    // =================================================================
    // ESCAPES
    // =================================================================

    #[test]
    fn single_and_doubled_escapes_converge() {
        assert_eq!(norm("a\\nb"), "a\nb");
        assert_eq!(norm("a\\\\nb"), "a\nb");
    }

    #[test]
    fn tab_and_quote_escapes_decoded() {
        assert_eq!(norm("cita\\\"dose\\\"\\tfim"), "cita\"dose\"\tfim");
    }

    // =================================================================
    // WHITESPACE
    // =================================================================

    #[test]
    fn newline_runs_collapse_to_two() {
        assert_eq!(norm("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn trailing_spaces_trimmed_before_newlines() {
        assert_eq!(norm("a   \nb"), "a\nb");
    }

    #[test]
    fn whitespace_only_input_normalizes_to_empty() {
        assert_eq!(norm("   \n\t\n  "), "");
        assert_eq!(norm(""), "");
    }
}
