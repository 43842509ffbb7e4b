//! Additive confidence scoring (spec.md §4.5).
//!
//! Every signal contributes an independent bonus or penalty; the sum is
//! clamped to `[0, 100]` and compared against [`params::FLAG_THRESHOLD`].
//! There is no weighting or machine learning here by design (spec.md §9):
//! the audit is meant to be explainable from its own `signals` field.

use crate::params;
use crate::types::{Rectangle, Risk, Signals};

/// Computes a page's confidence score and binary verdict.
///
/// `page_area` is the page's device-space area, used only to test whether
/// any single rectangle occupies more than [`params::MAX_RECT_AREA_PAGE_FRACTION`]
/// of the page (spec.md §4.5's giant-rect penalty) — a per-rectangle check,
/// independent of the summed `dark_rect_area_ratio` signal.
pub fn score_page(signals: &Signals, dark_rects: &[Rectangle], page_area: f64) -> (u8, Risk) {
    let mut total: i32 = 0;

    if signals.overlaps_text_likely {
        total += params::SCORE_OVERLAP_BONUS;
    }
    if signals.redact_annots > 0 {
        total += params::SCORE_ANNOTATION_BONUS;
    }
    if (params::MODERATE_AREA_RATIO_MIN..=params::MODERATE_AREA_RATIO_MAX).contains(&signals.dark_rect_area_ratio) {
        total += params::SCORE_MODERATE_AREA_BONUS;
    }
    if dark_rects.iter().any(|r| r.aspect_ratio() >= params::ELONGATION_RATIO) {
        total += params::SCORE_ELONGATION_BONUS;
    }
    if !signals.has_text {
        total += params::SCORE_NO_TEXT_PENALTY;
    }
    if page_area > 0.0 && dark_rects.iter().any(|r| r.area > params::MAX_RECT_AREA_PAGE_FRACTION * page_area) {
        total += params::SCORE_GIANT_RECT_PENALTY;
    }

    let confidence = total.clamp(0, 100) as u8;
    let risk = if confidence as i32 >= params::FLAG_THRESHOLD { Risk::Flagged } else { Risk::None };
    (confidence, risk)
}
