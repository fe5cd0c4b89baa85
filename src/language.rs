use serde::{Deserialize, Serialize};

/// Supported answer locales.
///
/// The language only selects which heading/label vocabulary the formatter
/// matches against — content is never translated. Portuguese is the
/// assistant's home locale and the fallback for unknown tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
    Fr,
}

impl Language {
    /// All supported locales, in vocabulary-registration order.
    pub const ALL: [Language; 4] = [Language::Pt, Language::En, Language::Es, Language::Fr];

    /// Lenient parsing of webhook locale tags ("pt-BR", "en_US", "ES", ...).
    ///
    /// Only the primary subtag is examined. Unknown or malformed tags fall
    /// back to the default locale instead of failing — the webhook is not a
    /// trusted source of well-formed tags.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "pt" => Language::Pt,
            "en" => Language::En,
            "es" => Language::Es,
            "fr" => Language::Fr,
            _ => Language::default(),
        }
    }
}
