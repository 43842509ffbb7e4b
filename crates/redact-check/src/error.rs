//! Error types shared by the analyzer and cleaner.

use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, RedactError>;

/// Failure modes surfaced by `analyze` and `clean`.
///
/// Local recovery (skipped operators, untouched non-ASCII streams, failed
/// decompression) never reaches this type — those are logged and absorbed
/// by the component that hit them. Only conditions that abort the whole
/// operation are represented here.
#[derive(Debug, Error)]
pub enum RedactError {
    #[error("input is empty")]
    EmptyInput,

    #[error("missing %PDF- header")]
    MalformedPdf,

    #[error("PDF parser refused the file: {0}")]
    PdfParseFailed(String),

    #[error("failed to serialize PDF: {0}")]
    SerializeFailed(String),

    #[error("operation cancelled")]
    Cancelled,
}
