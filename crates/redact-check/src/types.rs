//! The audit log schema shared between the analyzer and its consumers.
//!
//! Top-level shape and field names are part of the stable contract
//! (spec.md §6) and must not be renamed without a schema version bump.

use serde::{Deserialize, Serialize};

/// A filled rectangle reconstructed in device space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub area: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h, area: w * h }
    }

    /// Integer-rounded dedup key (spec.md §3).
    pub fn dedup_key(&self) -> (i64, i64, i64, i64) {
        (
            self.x.round() as i64,
            self.y.round() as i64,
            self.w.round() as i64,
            self.h.round() as i64,
        )
    }

    /// True if `self` and `other` overlap with strictly positive width and height.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        let ix0 = self.x.max(other.x);
        let iy0 = self.y.max(other.y);
        let ix1 = (self.x + self.w).min(other.x + other.w);
        let iy1 = (self.y + self.h).min(other.y + other.h);
        ix1 - ix0 > 0.0 && iy1 - iy0 > 0.0
    }

    /// Long-side/short-side aspect ratio, always >= 1.0.
    pub fn aspect_ratio(&self) -> f64 {
        let (long, short) = if self.w >= self.h { (self.w, self.h) } else { (self.h, self.w) };
        if short <= 0.0 { f64::INFINITY } else { long / short }
    }
}

/// Approximate device-space bounding box for a run of glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl TextBox {
    pub fn intersects_rect(&self, rect: &Rectangle) -> bool {
        let ix0 = self.x.max(rect.x);
        let iy0 = self.y.max(rect.y);
        let ix1 = (self.x + self.w).min(rect.x + rect.w);
        let iy1 = (self.y + self.h).min(rect.y + rect.h);
        ix1 - ix0 > 0.0 && iy1 - iy0 > 0.0
    }
}

/// Per-page detection signals (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signals {
    pub has_text: bool,
    pub text_chars: usize,
    pub dark_rects: usize,
    pub dark_rect_area_ratio: f64,
    pub redact_annots: usize,
    pub overlaps_text_likely: bool,
}

/// A sample bounding box embedded in a `suspected_overlay_rect` finding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBoxSample {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl From<Rectangle> for BoundingBoxSample {
    fn from(r: Rectangle) -> Self {
        Self { x: r.x, y: r.y, w: r.w, h: r.h }
    }
}

/// A tagged observation surfaced in a page's audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Finding {
    #[serde(rename = "suspected_overlay_rect")]
    SuspectedOverlayRect { count: usize, bbox_samples: Vec<BoundingBoxSample> },
    #[serde(rename = "redact_annotation")]
    RedactAnnotation { count: usize },
}

/// Binary risk verdict for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Flagged,
    None,
}

/// The complete audit for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAudit {
    pub page: u32,
    pub risk: Risk,
    pub confidence: u8,
    pub signals: Signals,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub build: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub file_name: String,
    pub file_size_bytes: usize,
    pub sha256: String,
    pub page_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub pages_flagged: usize,
}

/// The top-level, schema-stable analyzer output (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub schema: String,
    pub schema_version: String,
    pub tool: ToolInfo,
    pub source: SourceInfo,
    pub generated_at: String,
    pub summary: Summary,
    pub pages: Vec<PageAudit>,
}

/// Outcome of a `clean` call (spec.md §4.9, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsSummary {
    pub removed_redact_annots_estimate: usize,
    pub removed_annots_pages: usize,
    pub removed_overlay_ops_estimate: usize,
    pub note: String,
}

impl ActionsSummary {
    pub const NOTE: &'static str = "Overlay removal is heuristic; verify output pages listed in the audit.";

    pub fn new() -> Self {
        Self {
            removed_redact_annots_estimate: 0,
            removed_annots_pages: 0,
            removed_overlay_ops_estimate: 0,
            note: Self::NOTE.to_string(),
        }
    }
}

impl Default for ActionsSummary {
    fn default() -> Self {
        Self::new()
    }
}
