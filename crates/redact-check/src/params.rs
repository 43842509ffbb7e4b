//! Fixed contract parameters (spec.md §6).
//!
//! These are schema-level constants, not user-tunable configuration:
//! changing one changes the meaning of a previously emitted audit.

/// PDF user-space units are multiplied by this to get device space.
pub const VIEWPORT_SCALE: f64 = 1.5;

/// A fill color channel at or below this value counts as "near-black".
pub const DARKNESS_THRESHOLD: f64 = 0.15;

/// Minimum rectangle side, in device units.
pub const MIN_RECT_SIDE: f64 = 5.0;

/// Absolute floor on rectangle area, in device units squared.
pub const MIN_RECT_AREA_FLOOR: f64 = 2000.0;

/// Rectangle area must be at least this fraction of the page area.
pub const MIN_RECT_AREA_PAGE_FRACTION: f64 = 0.0005;

/// Rectangle area above this fraction of the page area is treated as background.
pub const MAX_RECT_AREA_PAGE_FRACTION: f64 = 0.6;

/// Scoring deltas (spec.md §4.5).
pub const SCORE_OVERLAP_BONUS: i32 = 40;
pub const SCORE_ANNOTATION_BONUS: i32 = 50;
pub const SCORE_MODERATE_AREA_BONUS: i32 = 15;
pub const SCORE_ELONGATION_BONUS: i32 = 10;
pub const SCORE_NO_TEXT_PENALTY: i32 = -20;
pub const SCORE_GIANT_RECT_PENALTY: i32 = -30;

/// Moderate dark-rectangle area ratio window that earns a scoring bonus.
pub const MODERATE_AREA_RATIO_MIN: f64 = 0.005;
pub const MODERATE_AREA_RATIO_MAX: f64 = 0.2;

/// Aspect ratio (long side / short side) at or above which a rectangle counts as elongated.
pub const ELONGATION_RATIO: f64 = 3.0;

/// Confidence at or above which a page is flagged.
pub const FLAG_THRESHOLD: i32 = 20;

/// Minimum non-whitespace glyph count for a page to count as having text.
pub const TEXT_CHAR_THRESHOLD: usize = 20;

/// Fraction of bytes that must be tab/CR/LF/printable-ASCII for a stream to be eligible for stripping.
pub const ASCII_STREAM_THRESHOLD: f64 = 0.70;

/// Max chars per intermediate line, shared by all four overlay patterns.
pub const STRIPPER_LINE_CHAR_CAP: usize = 200;

/// Max intermediate lines allowed between anchor operators in patterns A and B.
pub const STRIPPER_LINE_COUNT_CAP_AB: usize = 6;

/// Max intermediate lines allowed between anchor operators in patterns C and D.
pub const STRIPPER_LINE_COUNT_CAP_CD: usize = 15;

pub const SCHEMA: &str = "com.example.redact-check";
pub const SCHEMA_VERSION: &str = "1.0.0";
pub const TOOL_NAME: &str = "redact-check";
pub const TOOL_BUILD: &str = "web";
