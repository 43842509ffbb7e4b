//! Assembles the per-page signals and findings into an [`AuditLog`]
//! (spec.md §4.6).

use sha2::{Digest, Sha256};

use crate::error::{RedactError, Result};
use crate::geometry::{annotations, rectangles, text};
use crate::params;
use crate::pdf::PdfSource;
use crate::scoring;
use crate::types::{
    AuditLog, BoundingBoxSample, Finding, PageAudit, Signals, Summary, SourceInfo, ToolInfo,
};

/// Maximum number of rectangle samples embedded in a single finding.
const MAX_BBOX_SAMPLES: usize = 3;

/// Runs the full analysis pipeline over `bytes` and produces the audit log.
///
/// `cancel`, when provided, is polled at each page boundary (spec.md §5);
/// returning `true` aborts the scan with [`RedactError::Cancelled`].
pub fn build_audit(bytes: &[u8], file_name: &str, cancel: Option<&dyn Fn() -> bool>) -> Result<AuditLog> {
    let source = PdfSource::load(bytes)?;

    let sha256 = hex::encode(Sha256::digest(bytes));
    let mut pages = Vec::with_capacity(source.page_count() as usize);

    for (page_no, page_id) in source.pages() {
        if cancel.is_some_and(|f| f()) {
            return Err(RedactError::Cancelled);
        }

        let media_box = source.media_box(*page_id)?;
        let (page_w, page_h) = media_box.device_size();
        let page_area = page_w * page_h;

        let ops = source.operations(*page_id)?;
        let dark_rects = rectangles::reconstruct(&ops, media_box.urx - media_box.llx, media_box.ury - media_box.lly);
        let boxes = text::text_boxes(&ops);
        let text_chars = text::count_text_chars(&ops);
        let has_text = text_chars >= params::TEXT_CHAR_THRESHOLD;

        let annot_ids = source.annotation_ids(*page_id)?;
        let redact_annots = annotations::count_redact_annotations(&source, &annot_ids);

        let overlaps_text_likely = dark_rects.iter().any(|r| boxes.iter().any(|t| t.intersects_rect(r)));
        let raw_area_ratio = if page_area > 0.0 {
            dark_rects.iter().map(|r| r.area).sum::<f64>() / page_area
        } else {
            0.0
        };
        // Rounded to 4 decimal places before it enters the schema (spec.md §6).
        let dark_rect_area_ratio = (raw_area_ratio * 10_000.0).round() / 10_000.0;

        let signals = Signals {
            has_text,
            text_chars,
            dark_rects: dark_rects.len(),
            dark_rect_area_ratio,
            redact_annots,
            overlaps_text_likely,
        };

        let (confidence, risk) = scoring::score_page(&signals, &dark_rects, page_area);

        let mut findings = Vec::new();
        if !dark_rects.is_empty() {
            let bbox_samples =
                dark_rects.iter().take(MAX_BBOX_SAMPLES).map(|r| BoundingBoxSample::from(*r)).collect();
            findings.push(Finding::SuspectedOverlayRect { count: dark_rects.len(), bbox_samples });
        }
        if redact_annots > 0 {
            findings.push(Finding::RedactAnnotation { count: redact_annots });
        }

        pages.push(PageAudit { page: *page_no, risk, confidence, signals, findings });
    }

    let pages_flagged = pages.iter().filter(|p| p.risk == crate::types::Risk::Flagged).count();

    Ok(AuditLog {
        schema: params::SCHEMA.to_string(),
        schema_version: params::SCHEMA_VERSION.to_string(),
        tool: ToolInfo {
            name: params::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            build: params::TOOL_BUILD.to_string(),
        },
        source: SourceInfo { file_name: file_name.to_string(), file_size_bytes: bytes.len(), sha256, page_count: source.page_count() },
        generated_at: chrono::Utc::now().to_rfc3339(),
        summary: Summary { pages_flagged },
        pages,
    })
}
