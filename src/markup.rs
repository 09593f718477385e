//! Shared HTML-tree helpers for the page extractors.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Expected page structure was not found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: &'static str, reason: String },

    #[error("no `{0}` table on page")]
    TableNotFound(&'static str),

    #[error("no `{0}` row in table")]
    MissingRow(&'static str),
}

pub(crate) fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css,
        reason: e.to_string(),
    })
}

/// First element matching `css`, which must be a table selector.
pub(crate) fn find_table<'a>(
    doc: &'a Html,
    css: &'static str,
) -> Result<ElementRef<'a>, ExtractError> {
    doc.select(&selector(css)?)
        .next()
        .ok_or(ExtractError::TableNotFound(css))
}

/// Concatenated text of `element` and its descendants.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
