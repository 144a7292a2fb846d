//! Error types for the fetch, parse, and extraction stages
//!
//! Fatal errors (`FetchError`, `ParseError`) abort a request. `Miss` is the
//! per-field, non-fatal outcome of a lookup that found nothing.
//! `AppError` is what an endpoint returns when a fatal error surfaces.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::extractors::Field;

/// Outbound fetch failed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("invalid search URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Markup payload could not be turned into a document
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("markup is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

/// Site configuration could not be loaded or compiled
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid selector for {field}: '{selector}': {reason}")]
    Selector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("failed to read site config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse site config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a field lookup came back empty
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissKind {
    /// The selector matched nothing inside the container
    #[error("no matching element")]
    NoMatch,
    /// The element was found but lacks the attribute
    #[error("element has no '{0}' attribute")]
    MissingAttribute(String),
    /// The element has no parent element to read from
    #[error("element has no parent element")]
    NoParent,
}

/// A field that could not be extracted from one record container
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {kind}")]
pub struct Miss {
    pub field: Field,
    pub kind: MissKind,
}

impl Miss {
    pub fn new(field: Field, kind: MissKind) -> Self {
        Self { field, kind }
    }
}

/// Request-level failure. The client only ever sees a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let context = match &self {
            AppError::Fetch(_) => "fetching listing failed",
            AppError::Parse(_) => "parsing listing failed",
        };
        tracing::error!(error = %self, "{context}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_messages() {
        let miss = Miss::new(Field::Rating, MissKind::MissingAttribute("aria-label".to_string()));
        assert_eq!(miss.to_string(), "stars: element has no 'aria-label' attribute");
        assert_eq!(
            Miss::new(Field::SecondaryMetric, MissKind::NoMatch).to_string(),
            "usefulness: no matching element"
        );
    }
}
