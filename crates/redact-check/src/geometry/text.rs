//! Approximates glyph bounding boxes from the text-positioning operators
//! (spec.md §4.3). This is not a real text layout engine: widths are a
//! single average-glyph-width factor of the font size, not per-glyph
//! metrics, which is enough to test overlap against a redaction rectangle.

use lopdf::content::Operation;
use lopdf::Object;

use crate::params;
use crate::pdf::operators;
use crate::types::TextBox;

/// Rough average glyph width as a fraction of font size, used only to turn
/// a character count into a device-space box width.
const AVG_GLYPH_WIDTH_FACTOR: f64 = 0.5;
const DEFAULT_FONT_SIZE: f64 = 12.0;

struct TextState {
    translation: (f64, f64),
    position: (f64, f64),
    font_size: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self { translation: (0.0, 0.0), position: (0.0, 0.0), font_size: DEFAULT_FONT_SIZE }
    }
}

/// Non-whitespace byte count shown by a single text-showing operator.
fn non_whitespace_len(op: &Operation) -> usize {
    let collect = |bytes: &[u8]| bytes.iter().filter(|b| !b.is_ascii_whitespace()).count();
    match op.operator.as_str() {
        "Tj" | "'" | "\"" => op
            .operands
            .last()
            .and_then(|o| match o {
                Object::String(bytes, _) => Some(collect(bytes)),
                _ => None,
            })
            .unwrap_or(0),
        "TJ" => op
            .operands
            .first()
            .and_then(|o| o.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .filter_map(|o| match o {
                        Object::String(bytes, _) => Some(collect(bytes)),
                        _ => None,
                    })
                    .sum()
            })
            .unwrap_or(0),
        _ => 0,
    }
}

/// Total non-whitespace glyph count drawn on the page, for the `text_chars`
/// signal (spec.md §3).
pub fn count_text_chars(ops: &[Operation]) -> usize {
    ops.iter().map(non_whitespace_len).sum()
}

/// Approximate device-space bounding boxes for every text-showing operator.
pub fn text_boxes(ops: &[Operation]) -> Vec<TextBox> {
    let mut state = TextState::default();
    let mut out = Vec::new();

    for op in ops {
        if let Some(m) = operators::as_cm(op) {
            state.translation.0 += m[4];
            state.translation.1 += m[5];
            continue;
        }
        if let Some(tm) = operators::as_tm(op) {
            state.position = (tm[4], tm[5]);
            continue;
        }
        if let Some((tx, ty)) = operators::as_td(op) {
            state.position.0 += tx;
            state.position.1 += ty;
            continue;
        }
        if let Some(size) = operators::tf_size(op) {
            state.font_size = size;
            continue;
        }
        let Some(char_count) = operators::shown_char_count(op) else {
            continue;
        };
        if char_count == 0 {
            continue;
        }
        let width_user = char_count as f64 * state.font_size * AVG_GLYPH_WIDTH_FACTOR;
        let dx = (state.position.0 + state.translation.0) * params::VIEWPORT_SCALE;
        let dy = (state.position.1 + state.translation.1) * params::VIEWPORT_SCALE;
        let dw = width_user * params::VIEWPORT_SCALE;
        let dh = state.font_size * params::VIEWPORT_SCALE;
        out.push(TextBox { x: dx, y: dy - dh, w: dw, h: dh });
        state.position.0 += width_user;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;

    fn op(name: &str, operands: Vec<Object>) -> Operation {
        Operation::new(name, operands)
    }

    fn s(text: &str) -> Object {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    }

    #[test]
    fn counts_non_whitespace_chars_only() {
        let ops = vec![op("Tj", vec![s("a b c")])];
        assert_eq!(count_text_chars(&ops), 3);
    }

    #[test]
    fn tj_array_sums_string_runs() {
        let ops = vec![op("TJ", vec![Object::Array(vec![s("ab"), Object::Integer(-50), s("cd")])])];
        assert_eq!(count_text_chars(&ops), 4);
    }

    #[test]
    fn text_box_uses_tm_position_and_font_size() {
        let ops = vec![
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 100.into(), 200.into()]),
            op("Tf", vec![Object::Name(b"F1".to_vec()), 10.into()]),
            op("Tj", vec![s("hello")]),
        ];
        let boxes = text_boxes(&ops);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].x, 150.0);
        assert_eq!(boxes[0].y, 285.0);
        assert_eq!(boxes[0].h, 15.0);
    }

    #[test]
    fn empty_string_produces_no_box() {
        let ops = vec![op("Tj", vec![s("")])];
        assert!(text_boxes(&ops).is_empty());
    }
}
