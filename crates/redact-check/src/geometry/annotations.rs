//! Counts redaction annotations on a page (spec.md §4.4).
//!
//! A `/Subtype /Redact` annotation left in place after "redacting" is
//! itself evidence the content was never destroyed, only marked.

use lopdf::ObjectId;

use crate::pdf::PdfSource;

const REDACT_SUBTYPE: &str = "redact";

/// Counts `/Subtype /Redact` annotations among `annot_ids`, case-insensitively.
pub fn count_redact_annotations(source: &PdfSource, annot_ids: &[ObjectId]) -> usize {
    annot_ids
        .iter()
        .filter(|id| source.annotation_subtype(**id).as_deref() == Some(REDACT_SUBTYPE))
        .count()
}
