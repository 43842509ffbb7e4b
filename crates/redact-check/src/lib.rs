//! Detects and repairs improperly redacted PDF documents.
//!
//! A redaction that only paints a black rectangle (or drops a `/Redact`
//! annotation) over sensitive text leaves the original bytes fully
//! recoverable. This crate exposes two entry points: [`analyze`] produces a
//! machine-readable audit of a PDF's redaction hygiene, and [`clean`]
//! repairs the overlays and annotations an audit (or a fresh scan) finds.

pub mod audit;
pub mod clean;
pub mod error;
pub mod geometry;
pub mod params;
pub mod pdf;
pub mod scoring;
pub mod types;

pub use error::{RedactError, Result};
pub use types::{ActionsSummary, AuditLog, Finding, PageAudit, Rectangle, Risk, Signals};

/// Cooperative cancellation check, polled at page boundaries
/// (spec.md §5). Returning `true` aborts the call in progress.
pub type CancellationToken<'a> = &'a dyn Fn() -> bool;

/// Options accepted by [`analyze`].
#[derive(Default)]
pub struct AnalyzeOptions<'a> {
    pub cancel: Option<CancellationToken<'a>>,
}

/// Options accepted by [`clean`].
#[derive(Default)]
pub struct CleanOptions<'a> {
    /// A prior [`analyze`] result. Every page is always cleaned regardless
    /// of what it contains (spec.md §9: cleaning must not be conditional on
    /// audit contents) — but when supplied, its per-page `redact_annots`
    /// signal is used to source the reported `removed_redact_annots_estimate`
    /// (spec.md §4.8), since the sanitizer itself does not classify
    /// annotation subtypes.
    pub audit: Option<&'a AuditLog>,
    pub cancel: Option<CancellationToken<'a>>,
}

/// The result of [`clean`].
pub struct CleanOutput {
    pub cleaned_bytes: Vec<u8>,
    pub actions_summary: ActionsSummary,
}

/// Scans `bytes` for redaction overlays left over a PDF's original content.
///
/// # Arguments
/// * `bytes` - the PDF file contents.
/// * `file_name` - recorded verbatim in the audit's `source.file_name`.
/// * `options` - cancellation hook.
///
/// # Returns
/// A complete [`AuditLog`] describing every page, flagged or not.
///
/// # Errors
/// Returns [`RedactError::EmptyInput`] or [`RedactError::MalformedPdf`] for
/// input that is not a PDF, [`RedactError::PdfParseFailed`] if `lopdf`
/// rejects the file outright, and [`RedactError::Cancelled`] if `options.cancel`
/// signals an abort before the scan finishes.
#[tracing::instrument(skip(bytes, options), fields(file_name))]
pub fn analyze(bytes: &[u8], file_name: &str, options: AnalyzeOptions<'_>) -> Result<AuditLog> {
    audit::build_audit(bytes, file_name, options.cancel)
}

/// Repairs overlay rectangles and redaction annotations in `bytes`.
///
/// # Arguments
/// * `bytes` - the PDF file contents.
/// * `options` - an optional prior audit to scope the cleanup, plus a
///   cancellation hook.
///
/// # Returns
/// The cleaned PDF bytes alongside a summary of what was removed.
///
/// # Errors
/// Same failure modes as [`analyze`]; additionally
/// [`RedactError::SerializeFailed`] if the repaired document cannot be
/// written back out.
#[tracing::instrument(skip(bytes, options))]
pub fn clean(bytes: &[u8], options: CleanOptions<'_>) -> Result<CleanOutput> {
    let (cleaned_bytes, actions_summary) = clean::clean(bytes, options.audit, options.cancel)?;
    Ok(CleanOutput { cleaned_bytes, actions_summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object};

    fn minimal_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)],
        });
        doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }));
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn analyze_then_clean_round_trip() {
        let bytes = minimal_pdf();
        let report = analyze(&bytes, "doc.pdf", AnalyzeOptions::default()).unwrap();
        assert_eq!(report.source.page_count, 1);
        let cleaned = clean(&bytes, CleanOptions { audit: Some(&report), cancel: None }).unwrap();
        assert!(!cleaned.cleaned_bytes.is_empty());
    }

    #[test]
    fn analyze_rejects_empty_input() {
        let err = analyze(&[], "empty.pdf", AnalyzeOptions::default()).unwrap_err();
        assert!(matches!(err, RedactError::EmptyInput));
    }
}
