//! Shape-based operand helpers.
//!
//! Content-stream operators are identified by name plus operand shape
//! (count and kind), never by a private opcode number, so this code keeps
//! working across PDF producer quirks (spec.md §9).

use lopdf::content::Operation;
use lopdf::Object;

/// Converts any numeric `Object` variant to `f64`.
pub fn as_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// All operands as `f64`, only if every one of them is numeric.
pub fn all_numeric(op: &Operation) -> Option<Vec<f64>> {
    let nums: Vec<f64> = op.operands.iter().filter_map(as_f64).collect();
    (nums.len() == op.operands.len()).then_some(nums)
}

/// `a b c d e f cm`: the 6-number transform matrix.
pub fn as_cm(op: &Operation) -> Option<[f64; 6]> {
    if op.operator != "cm" {
        return None;
    }
    let nums = all_numeric(op)?;
    nums.try_into().ok()
}

/// `r g b rg`: non-stroking RGB fill color.
pub fn as_rg(op: &Operation) -> Option<[f64; 3]> {
    if op.operator != "rg" {
        return None;
    }
    let nums = all_numeric(op)?;
    nums.try_into().ok()
}

/// `gray g`: non-stroking gray fill color.
pub fn as_gray(op: &Operation) -> Option<f64> {
    if op.operator != "g" {
        return None;
    }
    let nums = all_numeric(op)?;
    (nums.len() == 1).then(|| nums[0])
}

/// `x y w h re`: a rectangle appended to the current path.
pub fn as_re(op: &Operation) -> Option<[f64; 4]> {
    if op.operator != "re" {
        return None;
    }
    let nums = all_numeric(op)?;
    nums.try_into().ok()
}

/// `x y m` or `x y l`: a path moveto/lineto point.
pub fn as_point(op: &Operation) -> Option<(f64, f64)> {
    if op.operator != "m" && op.operator != "l" {
        return None;
    }
    let nums = all_numeric(op)?;
    (nums.len() == 2).then(|| (nums[0], nums[1]))
}

/// `f`, `F`, or `f*`: fill the current path (non-zero or even-odd).
pub fn is_fill(op: &Operation) -> bool {
    matches!(op.operator.as_str(), "f" | "F" | "f*")
}

/// `a b c d e f Tm`: absolute text-space transform matrix.
pub fn as_tm(op: &Operation) -> Option<[f64; 6]> {
    if op.operator != "Tm" {
        return None;
    }
    let nums = all_numeric(op)?;
    nums.try_into().ok()
}

/// `tx ty Td`: relative text-line offset.
pub fn as_td(op: &Operation) -> Option<(f64, f64)> {
    if op.operator != "Td" && op.operator != "TD" {
        return None;
    }
    let nums = all_numeric(op)?;
    (nums.len() == 2).then(|| (nums[0], nums[1]))
}

/// Text font size set by `size Tf` (the font name operand is ignored).
pub fn tf_size(op: &Operation) -> Option<f64> {
    if op.operator != "Tf" || op.operands.len() != 2 {
        return None;
    }
    as_f64(&op.operands[1])
}

/// Total drawn glyph count for `Tj`/`'`/`"` (one string) or `TJ` (an array
/// of strings and kerning numbers). Non-string bytes inside `TJ` are
/// adjustments, not glyphs, and are ignored.
pub fn shown_char_count(op: &Operation) -> Option<usize> {
    match op.operator.as_str() {
        "Tj" | "'" | "\"" => op.operands.last().and_then(|o| match o {
            Object::String(bytes, _) => Some(bytes.len()),
            _ => None,
        }),
        "TJ" => {
            let arr = op.operands.first()?.as_array().ok()?;
            Some(
                arr.iter()
                    .filter_map(|o| match o {
                        Object::String(bytes, _) => Some(bytes.len()),
                        _ => None,
                    })
                    .sum(),
            )
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(name: &str, operands: Vec<Object>) -> Operation {
        Operation::new(name, operands)
    }

    #[test]
    fn as_cm_requires_six_numbers() {
        let good = op("cm", vec![1.into(), 0.into(), 0.into(), 1.into(), 10.into(), 20.into()]);
        assert_eq!(as_cm(&good), Some([1.0, 0.0, 0.0, 1.0, 10.0, 20.0]));
        let bad = op("cm", vec![1.into(), 0.into()]);
        assert_eq!(as_cm(&bad), None);
    }

    #[test]
    fn as_rg_rejects_non_numeric_operand() {
        let bad = op("rg", vec![0.into(), 0.into(), Object::Name(b"X".to_vec())]);
        assert_eq!(as_rg(&bad), None);
    }

    #[test]
    fn shown_char_count_sums_tj_array_strings_only() {
        let tj = op(
            "TJ",
            vec![Object::Array(vec![
                Object::String(b"abc".to_vec(), lopdf::StringFormat::Literal),
                Object::Integer(-200),
                Object::String(b"de".to_vec(), lopdf::StringFormat::Literal),
            ])],
        );
        assert_eq!(shown_char_count(&tj), Some(5));
    }

    #[test]
    fn shown_char_count_single_tj() {
        let single = op("Tj", vec![Object::String(b"hello".to_vec(), lopdf::StringFormat::Literal)]);
        assert_eq!(shown_char_count(&single), Some(5));
    }
}
