//! Report assembly on top of the formatting pipeline.
//!
//! The one caller-visible failure condition lives here: an answer that
//! formats to nothing becomes [`ReportError::NoContent`], which the
//! surrounding application surfaces as "could not generate report". The
//! layout engine consuming a [`Report`] stays external.

use serde::Serialize;
use thiserror::Error;

use crate::format::{self, Block, Segment};
use crate::language::Language;
use crate::reply;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("answer produced no renderable content")]
    NoContent,
}

/// A formatted answer ready for the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub language: Language,
    pub blocks: Vec<Block>,
}

impl Report {
    /// Inline segments for every block, in document order. Separator
    /// blocks carry no segments. Renderers that tokenize lazily call
    /// [`crate::format::emphasis::tokenize`] per block instead.
    pub fn segments(&self) -> Vec<Vec<Segment>> {
        self.blocks
            .iter()
            .map(|block| match block.text() {
                Some(text) => format::emphasis::tokenize(text),
                None => Vec::new(),
            })
            .collect()
    }
}

/// Format an answer into a report, surfacing emptiness as an error.
pub fn build_report(raw: &str, language: Language) -> Result<Report, ReportError> {
    let blocks = format::format(raw, language);
    if blocks.is_empty() {
        return Err(ReportError::NoContent);
    }
    Ok(Report { language, blocks })
}

/// Full boundary path: webhook reply body → answer text → report.
pub fn report_from_webhook(body: &str, language: Language) -> Result<Report, ReportError> {
    let answer = reply::unwrap_answer(body);
    build_report(&answer, language)
}
