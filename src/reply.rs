//! Webhook reply unwrapping.
//!
//! The upstream webhook sometimes answers with a JSON object and
//! sometimes with raw text. The body is decoded exactly once, here, at
//! the system boundary — downstream code only ever sees the answer text
//! and never re-attempts the JSON parse.

use serde_json::Value;
use tracing::warn;

/// Conventional keys the webhook uses for the answer payload, probed in
/// order.
const ANSWER_KEYS: &[&str] = &["output", "answer", "text", "message"];

/// A webhook reply body, decoded once.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    /// The body parsed as a JSON object.
    Json(Value),
    /// Anything else — served verbatim as answer text.
    PlainText(String),
}

impl ParsedReply {
    /// Decode a reply body. Only a top-level JSON object counts as the
    /// JSON form; bare JSON scalars and arrays are treated as plain text,
    /// because the webhook never legitimately produces them.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body.trim()) {
            Ok(value @ Value::Object(_)) => ParsedReply::Json(value),
            _ => ParsedReply::PlainText(body.to_string()),
        }
    }

    /// The answer text carried by this reply, if any.
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            ParsedReply::PlainText(text) => Some(text),
            ParsedReply::Json(value) => ANSWER_KEYS
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str)),
        }
    }
}

/// Decode a reply body and extract its answer text.
///
/// A JSON reply without any known answer key degrades to the raw body —
/// robustness over correctness, since the upstream is uncontrolled.
pub fn unwrap_answer(body: &str) -> String {
    let reply = ParsedReply::parse(body);
    match reply.answer_text() {
        Some(text) => text.to_string(),
        None => {
            warn!("webhook reply JSON carries no known answer key; using raw body");
            body.to_string()
        }
    }
}
