//! HTML stripping for untrusted webhook answers.
//!
//! This is a security boundary, not cosmetic cleanup: it runs before any
//! heading/label injection so stray or malicious markup cannot straddle
//! an injected line break and evade later recognition.

use std::sync::LazyLock;

use regex::Regex;

/// Paired `<iframe ...>...</iframe>` blocks, open tag to its close,
/// across newlines, case-insensitive.
static IFRAME_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe[^>]*>.*?</iframe\s*>").expect("valid regex"));

/// Any unpaired `<iframe ...>` opening tag left after pair removal.
static IFRAME_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<iframe[^>]*>").expect("valid regex"));

/// Any remaining generic HTML tag, opening or closing.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)</?[a-z][^<>]*>").expect("valid regex"));

/// Strip embeddable/executable HTML from a raw answer.
///
/// Each removed construct becomes a single space to avoid concatenating
/// the words around it. Strips to a fixpoint: interleaved markup like
/// `<scr<b>ipt>` would otherwise reassemble into a tag once the inner
/// tag is gone. Every changed pass shortens the text, so the loop is
/// bounded by input length. Input without markup passes through
/// untouched.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let pass = strip_once(&text);
        if pass == text {
            return pass;
        }
        text = pass;
    }
}

fn strip_once(text: &str) -> String {
    let text = IFRAME_PAIR.replace_all(text, " ");
    let text = IFRAME_OPEN.replace_all(&text, " ");
    HTML_TAG.replace_all(&text, " ").into_owned()
}
