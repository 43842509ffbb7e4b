//! Cleaner orchestrator: sanitizes annotations and strips overlay
//! rectangles page by page, then reserializes the document (spec.md §4.9).

pub mod sanitizer;
pub mod stripper;

use crate::error::{RedactError, Result};
use crate::pdf::PdfSource;
use crate::types::{ActionsSummary, AuditLog};

/// Runs the clean pipeline over `bytes`.
///
/// Every page is always sanitized and stripped; a supplied `audit` never
/// changes which pages are touched (spec.md §9: "the cleaner ... must not
/// make behavior conditional on audit contents"). It does, however, feed
/// the reported `removed_redact_annots_estimate`: the sanitizer deletes a
/// page's `/Annots` wholesale and does not itself classify subtypes, so
/// when an `audit` is supplied, the estimate for a page whose annotations
/// were removed is taken from that page's own `redact_annots` signal
/// (spec.md §4.8) instead of the raw count of annotations removed. Without
/// an audit there is no classification to trust, so the raw removed count
/// is used as a best-effort estimate.
pub fn clean(bytes: &[u8], audit: Option<&AuditLog>, cancel: Option<&dyn Fn() -> bool>) -> Result<(Vec<u8>, ActionsSummary)> {
    let mut source = PdfSource::load(bytes)?;
    let mut summary = ActionsSummary::new();

    for (page_no, page_id) in source.pages().to_vec() {
        if cancel.is_some_and(|f| f()) {
            return Err(RedactError::Cancelled);
        }

        let removed_annots = sanitizer::sanitize_page(&mut source, page_id)?;
        if removed_annots > 0 {
            summary.removed_annots_pages += 1;
            let redact_estimate = audit
                .and_then(|a| a.pages.iter().find(|p| p.page == page_no))
                .map(|p| p.signals.redact_annots)
                .unwrap_or(removed_annots);
            summary.removed_redact_annots_estimate += redact_estimate;
        }

        for stream_id in source.content_stream_ids(page_id)? {
            let raw = source.stream_raw(stream_id)?;
            let (rewritten, removed_ops) = stripper::strip_overlays(&raw);
            if removed_ops > 0 {
                source.replace_stream_content(stream_id, rewritten)?;
                summary.removed_overlay_ops_estimate += removed_ops;
            }
        }
    }

    let cleaned_bytes = source.serialize()?;
    Ok((cleaned_bytes, summary))
}
