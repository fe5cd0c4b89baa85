//! Locale vocabularies for the answer formatter.
//!
//! Immutable, locale-keyed lookup tables built once on first use. Each
//! locale carries its canonical heading/label strings plus the compiled
//! patterns the normalizer and classifier consume. Matching is case- and
//! diacritic-insensitive throughout, because the webhook routinely drops
//! accents or changes capitalization.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::language::Language;

// ═══════════════════════════════════════════
// Locale data
// ═══════════════════════════════════════════

const PT_SECTIONS: &[&str] = &[
    "Contexto geral",
    "Sinais e sintomas",
    "Causas comuns",
    "Diagnóstico",
    "Tratamento",
    "Prevenção",
    "Quando procurar ajuda médica",
    "Resumo",
];
const PT_SUBSECTIONS: &[&str] = &["Fases da doença", "Fatores de risco", "Sinais de alerta"];
const PT_ALERTS: &[&str] = &["Dica", "Atenção", "Tip", "Attention"];
const PT_RIGHT: &[&str] = &["Lado Direito", "Right Side"];
const PT_LEFT: &[&str] = &["Lado Esquerdo", "Left Side"];

const EN_SECTIONS: &[&str] = &[
    "General context",
    "Signs and symptoms",
    "Common causes",
    "Diagnosis",
    "Treatment",
    "Prevention",
    "When to seek medical help",
    "Summary",
];
const EN_SUBSECTIONS: &[&str] = &["Disease phases", "Risk factors", "Warning signs"];
const EN_ALERTS: &[&str] = &["Tip", "Attention"];
const EN_RIGHT: &[&str] = &["Right Side"];
const EN_LEFT: &[&str] = &["Left Side"];

const ES_SECTIONS: &[&str] = &[
    "Contexto general",
    "Signos y síntomas",
    "Causas comunes",
    "Diagnóstico",
    "Tratamiento",
    "Prevención",
    "Cuándo buscar ayuda médica",
    "Resumen",
];
const ES_SUBSECTIONS: &[&str] = &[
    "Fases de la enfermedad",
    "Factores de riesgo",
    "Señales de alerta",
];
const ES_ALERTS: &[&str] = &["Consejo", "Atención", "Tip", "Attention"];
const ES_RIGHT: &[&str] = &["Lado Derecho", "Right Side"];
const ES_LEFT: &[&str] = &["Lado Izquierdo", "Left Side"];

const FR_SECTIONS: &[&str] = &[
    "Contexte général",
    "Signes et symptômes",
    "Causes courantes",
    "Diagnostic",
    "Traitement",
    "Prévention",
    "Quand consulter un médecin",
    "Résumé",
];
const FR_SUBSECTIONS: &[&str] = &[
    "Phases de la maladie",
    "Facteurs de risque",
    "Signes d'alerte",
];
const FR_ALERTS: &[&str] = &["Conseil", "Attention", "Tip"];
const FR_RIGHT: &[&str] = &["Côté Droit", "Right Side"];
const FR_LEFT: &[&str] = &["Côté Gauche", "Left Side"];

/// The scientific/common-name labels are a fixed bilingual pair in every
/// locale: the upstream encyclopedia emits them in Portuguese or English
/// regardless of the answer language.
const NAME_LABELS: &[&str] = &[
    "Nome Científico",
    "Scientific Name",
    "Nome Popular",
    "Common Name",
];

// ═══════════════════════════════════════════
// Vocabulary
// ═══════════════════════════════════════════

/// One locale's heading/label vocabulary plus its compiled patterns.
pub struct Vocabulary {
    pub language: Language,
    pub section_headings: &'static [&'static str],
    pub subsection_headings: &'static [&'static str],
    pub alert_labels: &'static [&'static str],
    pub right_labels: &'static [&'static str],
    pub left_labels: &'static [&'static str],
    pub phase_prefix: &'static str,
    pub crisis_marker: &'static str,
    pub system_prefix: &'static str,

    /// `(pattern, "\n<canonical>\n")` per section heading, in table order.
    pub(crate) section_rules: Vec<(Regex, String)>,
    /// Same shape for the subsection vocabulary.
    pub(crate) subsection_rules: Vec<(Regex, String)>,
    /// Folded section heading → canonical form, for the classifier.
    pub(crate) folded_sections: Vec<(String, &'static str)>,
    pub(crate) phase_break: Regex,
    pub(crate) system_bold: Regex,
    pub(crate) system_dash: Regex,
    pub(crate) name_label_break: Regex,
    pub(crate) alert_wrap: Regex,
    pub(crate) alert_break: Regex,
    pub(crate) laterality_unbold: Regex,
    pub(crate) laterality_break: Regex,
    pub(crate) laterality_line: Regex,
}

/// Look up the static vocabulary for a locale. Tables are built once,
/// on first use, and shared across threads.
pub fn vocabulary(language: Language) -> &'static Vocabulary {
    static PT: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::build(Language::Pt));
    static EN: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::build(Language::En));
    static ES: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::build(Language::Es));
    static FR: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::build(Language::Fr));
    match language {
        Language::Pt => &PT,
        Language::En => &EN,
        Language::Es => &ES,
        Language::Fr => &FR,
    }
}

impl Vocabulary {
    fn build(language: Language) -> Self {
        let (sections, subsections, alerts, right, left, phase, crisis, system) = match language {
            Language::Pt => (
                PT_SECTIONS,
                PT_SUBSECTIONS,
                PT_ALERTS,
                PT_RIGHT,
                PT_LEFT,
                "Fase de",
                "Crise epiléptica ou epileptoide",
                "Sistema",
            ),
            Language::En => (
                EN_SECTIONS,
                EN_SUBSECTIONS,
                EN_ALERTS,
                EN_RIGHT,
                EN_LEFT,
                "Phase of",
                "Epileptic or epileptoid crisis",
                "System",
            ),
            Language::Es => (
                ES_SECTIONS,
                ES_SUBSECTIONS,
                ES_ALERTS,
                ES_RIGHT,
                ES_LEFT,
                "Fase de",
                "Crisis epiléptica o epileptoide",
                "Sistema",
            ),
            Language::Fr => (
                FR_SECTIONS,
                FR_SUBSECTIONS,
                FR_ALERTS,
                FR_RIGHT,
                FR_LEFT,
                "Phase de",
                "Crise épileptique ou épileptoïde",
                "Système",
            ),
        };

        let heading_rule = |heading: &'static str| {
            let pattern = format!(
                r"(?i)(?:\*\*)?[ \t]*\b{}\b[ \t]*:?(?:\*\*)?:?",
                loose_pattern(heading)
            );
            (
                Regex::new(&pattern).expect("valid heading pattern"),
                format!("\n{heading}\n"),
            )
        };

        let alert_alts = alternation(alerts);
        let laterality_alts = format!("{}|{}", alternation(right), alternation(left));
        let system_pat = loose_pattern(system);

        Vocabulary {
            language,
            section_headings: sections,
            subsection_headings: subsections,
            alert_labels: alerts,
            right_labels: right,
            left_labels: left,
            phase_prefix: phase,
            crisis_marker: crisis,
            system_prefix: system,

            section_rules: sections.iter().copied().map(heading_rule).collect(),
            subsection_rules: subsections.iter().copied().map(heading_rule).collect(),
            folded_sections: sections.iter().map(|h| (fold(h), *h)).collect(),
            phase_break: Regex::new(&format!(
                r"(?i)([^\n])[ \t]*\b((?:{})|(?:{}))\b",
                loose_pattern(phase),
                loose_pattern(crisis)
            ))
            .expect("valid phase pattern"),
            system_bold: Regex::new(&format!(
                r"(?i)\*\*[ \t]*({system_pat}[^*\n:]*?)[ \t]*:?[ \t]*\*\*[ \t]*:?[ \t]*"
            ))
            .expect("valid system pattern"),
            system_dash: Regex::new(&format!(
                r"(?i)\b({system_pat}[\p{{L}}\p{{M}}0-9 ]*?)[ \t]+[-–][ \t]+"
            ))
            .expect("valid system pattern"),
            name_label_break: Regex::new(&format!(
                r"(?i)(?:\*\*)?[ \t]*\b({})\b[ \t]*(?:\*\*)?[ \t]*[:\-]?[ \t]*",
                alternation(NAME_LABELS)
            ))
            .expect("valid name-label pattern"),
            alert_wrap: Regex::new(&format!(
                r"(?i)\*{{0,2}}\b({alert_alts})\b[ \t]*:?\*{{0,2}}:?"
            ))
            .expect("valid alert pattern"),
            // Stray decoration before an alert label: spacing, list/bold
            // markers, separators, emoji and their joiners. Deliberately
            // excludes the period (sentence ends survive) and the newline
            // (existing blank separators survive).
            alert_break: Regex::new(&format!(
                r"(?i)[*_•~\-–—:;,!¿¡?…| \t\p{{So}}\p{{M}}\p{{Cf}}]*\*\*({alert_alts})\*\*[ \t]*:?[ \t]*"
            ))
            .expect("valid alert pattern"),
            laterality_unbold: Regex::new(&format!(
                r"(?i)\*\*[ \t]*\b({laterality_alts})\b[ \t]*:?[ \t]*\*\*[ \t]*:?"
            ))
            .expect("valid laterality pattern"),
            laterality_break: Regex::new(&format!(
                r"(?i)([^\n])[ \t]*\b({laterality_alts})\b[ \t]*:"
            ))
            .expect("valid laterality pattern"),
            laterality_line: Regex::new(&format!(
                r"(?i)^[ \t]*(?:{laterality_alts})[ \t]*:"
            ))
            .expect("valid laterality pattern"),
        }
    }

    /// Canonical section heading for a cleaned line, if the line is an
    /// exact (case- and diacritic-insensitive) heading match.
    pub(crate) fn match_section_heading(&self, cleaned_line: &str) -> Option<&'static str> {
        let folded = fold(cleaned_line);
        self.folded_sections
            .iter()
            .find(|(key, _)| *key == folded)
            .map(|(_, canonical)| *canonical)
    }
}

// ═══════════════════════════════════════════
// Folding helpers
// ═══════════════════════════════════════════

/// Case- and accent-insensitive comparison key: NFD, combining marks
/// dropped, lowercased.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Alternation of loose patterns for a label list.
fn alternation(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|l| format!("(?:{})", loose_pattern(l)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Build a diacritic-tolerant pattern for a literal phrase.
///
/// Each letter becomes a class of its accented variants followed by an
/// optional run of combining marks, so both precomposed and decomposed
/// input match. Spaces match any horizontal whitespace run. Combined with
/// `(?i)` at the call sites this gives full case/diacritic insensitivity.
fn loose_pattern(phrase: &str) -> String {
    let mut pattern = String::new();
    for c in phrase.chars() {
        match c {
            ' ' => pattern.push_str(r"[ \t]+"),
            '\'' | '’' => pattern.push_str("['’]"),
            c if c.is_alphanumeric() => {
                let base = fold_char(c);
                match base {
                    'a' => pattern.push_str("[aàáâãä]"),
                    'e' => pattern.push_str("[eèéêë]"),
                    'i' => pattern.push_str("[iìíîï]"),
                    'o' => pattern.push_str("[oòóôõö]"),
                    'u' => pattern.push_str("[uùúûü]"),
                    'c' => pattern.push_str("[cç]"),
                    'n' => pattern.push_str("[nñ]"),
                    'y' => pattern.push_str("[yýÿ]"),
                    other => pattern.push(other),
                }
                pattern.push_str(r"\p{M}*");
            }
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern
}

/// Lowercased, accent-stripped form of a single character.
fn fold_char(c: char) -> char {
    fold(c.encode_utf8(&mut [0; 4])).chars().next().unwrap_or(c)
}
