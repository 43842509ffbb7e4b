//! Removes the operator sequences that paint an opaque black overlay
//! rectangle out of a content stream's source text (spec.md §4.7).
//!
//! This is deliberately a text-level rewrite, not a parse-rebuild-reserialize
//! round trip: lopdf's `Content::encode` does not promise to reproduce a
//! producer's exact operator spelling, and a byte-faithful stream is safer
//! for a tool whose whole job is not being the thing that mangles a PDF
//! (spec.md §9). Regexes only ever touch streams that pass the ASCII gate.
//!
//! Four distinct shapes are recognized, each anchored on a literal black
//! fill color (never an arbitrary color — a colored overlay might be
//! legitimate page art, not a redaction):
//!   A: `0 0 0 rg` ... `x y w h re` ... `f | f* | B | B*` (RGB rect fill)
//!   B: `0 g`       ... `x y w h re` ... `f | f* | B | B*` (gray rect fill)
//!   C: `q` ... `0 0 0 rg` ... `x y m` ... `h` `f` `Q`     (RGB path fill)
//!   D: `q` ... `0 g`      ... `x y m` ... `h` `f` `Q`     (gray path fill)
//! A matched body that crosses a `BT` text block is never removed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::params;

/// Literal black RGB fill operand, allowing decimal-zero spellings (`0`,
/// `0.0`, `-0.00`, ...) but never a genuinely non-black channel.
const RGB_BLACK: &str = r"-?0(?:\.0+)? -?0(?:\.0+)? -?0(?:\.0+)? rg";
/// Literal black gray fill operand.
const GRAY_BLACK: &str = r"-?0(?:\.0+)? g";
/// `x y w h re`: signed origin, non-negative width/height.
const RECT_OP: &str = r"[-\d.]+ [-\d.]+ \d+(?:\.\d+)? \d+(?:\.\d+)? re";
/// `x y m`: path moveto, the first point of a reconstructed rectangle path.
const MOVETO_OP: &str = r"[-\d.]+ [-\d.]+ m";
/// Fill operator accepted after a rect-fill `re` (patterns A, B).
const RECT_FILL_OP: &str = r"f\*?|B\*?";

fn filler(line_count: usize) -> String {
    format!(r"(?:[^\n]{{0,{char_cap}}}\n){{0,{line_count}}}", char_cap = params::STRIPPER_LINE_CHAR_CAP)
}

/// Pattern A: `0 0 0 rg` anchoring a short `re`-based rect fill.
static PATTERN_A: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)^{black}$\n{gap}^{re}$\n^(?:{fill})$\n?",
        black = RGB_BLACK,
        gap = filler(params::STRIPPER_LINE_COUNT_CAP_AB),
        re = RECT_OP,
        fill = RECT_FILL_OP,
    ))
    .expect("pattern A is a valid regex")
});

/// Pattern B: the grayscale equivalent of A.
static PATTERN_B: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)^{black}$\n{gap}^{re}$\n^(?:{fill})$\n?",
        black = GRAY_BLACK,
        gap = filler(params::STRIPPER_LINE_COUNT_CAP_AB),
        re = RECT_OP,
        fill = RECT_FILL_OP,
    ))
    .expect("pattern B is a valid regex")
});

/// Pattern C: `q ... 0 0 0 rg ... x y m ... h f Q` path-based rect fill.
static PATTERN_C: Lazy<Regex> = Lazy::new(|| {
    let gap = filler(params::STRIPPER_LINE_COUNT_CAP_CD);
    Regex::new(&format!(
        r"(?m)^q$\n{gap}^{black}$\n{gap}^{m}$\n{gap}^h$\n^f$\n^Q$\n?",
        gap = gap,
        black = RGB_BLACK,
        m = MOVETO_OP,
    ))
    .expect("pattern C is a valid regex")
});

/// Pattern D: the grayscale equivalent of C.
static PATTERN_D: Lazy<Regex> = Lazy::new(|| {
    let gap = filler(params::STRIPPER_LINE_COUNT_CAP_CD);
    Regex::new(&format!(
        r"(?m)^q$\n{gap}^{black}$\n{gap}^{m}$\n{gap}^h$\n^f$\n^Q$\n?",
        gap = gap,
        black = GRAY_BLACK,
        m = MOVETO_OP,
    ))
    .expect("pattern D is a valid regex")
});

/// True if `bytes` is plain/printable enough for line-oriented regex
/// rewriting to be safe (spec.md §4.7: binary or non-ASCII streams are left
/// untouched rather than risk corrupting them).
pub fn is_ascii_eligible(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let printable = bytes.iter().filter(|&&b| b == b'\t' || b == b'\r' || b == b'\n' || (0x20..0x7f).contains(&b)).count();
    (printable as f64 / bytes.len() as f64) >= params::ASCII_STREAM_THRESHOLD
}

/// Strips overlay-rectangle operator sequences from a content stream's raw
/// bytes. Returns the rewritten bytes and the number of sequences removed.
/// A sequence whose body crosses a `BT` text block is left untouched.
pub fn strip_overlays(raw: &[u8]) -> (Vec<u8>, usize) {
    if !is_ascii_eligible(raw) {
        return (raw.to_vec(), 0);
    }
    let normalized = String::from_utf8_lossy(raw).replace("\r\n", "\n").replace('\r', "\n");

    let mut removed = 0usize;
    let mut text = normalized.into_owned();
    for pattern in [&*PATTERN_A, &*PATTERN_B, &*PATTERN_C, &*PATTERN_D] {
        text = apply_pattern(pattern, text, &mut removed);
    }
    (text.into_bytes(), removed)
}

fn apply_pattern(regex: &Regex, text: String, removed: &mut usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    for m in regex.find_iter(&text) {
        let body = &text[m.start()..m.end()];
        if body.contains("BT") {
            continue;
        }
        out.push_str(&text[last_end..m.start()]);
        last_end = m.end();
        *removed += 1;
    }
    out.push_str(&text[last_end..]);
    out
}
