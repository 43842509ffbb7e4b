//! Reconstructs filled rectangles from a page's operator list (spec.md §4.2).
//!
//! Producers draw redaction bars either as `re ... f` or as a four-point
//! `m l l l ... f` subpath. Both are tracked as path candidates and only
//! realized into a [`Rectangle`] when a fill with a dark-enough color closes
//! the path.

use lopdf::content::Operation;

use crate::params;
use crate::pdf::operators;
use crate::types::Rectangle;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FillColor {
    Rgb([f64; 3]),
    Gray(f64),
}

impl FillColor {
    fn is_dark(&self) -> bool {
        match self {
            FillColor::Rgb(c) => c.iter().all(|&ch| ch <= params::DARKNESS_THRESHOLD),
            FillColor::Gray(g) => *g <= params::DARKNESS_THRESHOLD,
        }
    }
}

/// Walks a page's decoded operators and returns the filled rectangles that
/// pass the size, area, and darkness filters, deduplicated.
pub fn reconstruct(ops: &[Operation], page_w: f64, page_h: f64) -> Vec<Rectangle> {
    let page_area = page_w * page_h;
    let mut fill: Option<FillColor> = None;
    // Composition is translation-only: rotation/skew components of `cm` are
    // dropped (spec.md §9 open question, decided in DESIGN.md).
    let mut translation = (0.0f64, 0.0f64);
    let mut pending_rects: Vec<[f64; 4]> = Vec::new();
    let mut pending_points: Vec<(f64, f64)> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for op in ops {
        if let Some(m) = operators::as_cm(op) {
            translation.0 += m[4];
            translation.1 += m[5];
            continue;
        }
        if let Some(rgb) = operators::as_rg(op) {
            fill = Some(FillColor::Rgb(rgb));
            continue;
        }
        if let Some(g) = operators::as_gray(op) {
            fill = Some(FillColor::Gray(g));
            continue;
        }
        if let Some(re) = operators::as_re(op) {
            pending_rects.push(re);
            continue;
        }
        if op.operator == "m" {
            pending_points.clear();
            if let Some(p) = operators::as_point(op) {
                pending_points.push(p);
            }
            continue;
        }
        if op.operator == "l" {
            if let Some(p) = operators::as_point(op) {
                pending_points.push(p);
            }
            continue;
        }
        if operators::is_fill(op) {
            let dark = fill.as_ref().is_some_and(FillColor::is_dark);
            if dark {
                for r in &pending_rects {
                    if let Some(rect) = to_device_rect(*r, translation, page_area) {
                        push_dedup(&mut out, &mut seen, rect);
                    }
                }
                if pending_points.len() >= 4 {
                    if let Some(rect) = bbox_rect(&pending_points, translation, page_area) {
                        push_dedup(&mut out, &mut seen, rect);
                    }
                }
            }
            pending_rects.clear();
            pending_points.clear();
        }
    }
    out
}

fn push_dedup(out: &mut Vec<Rectangle>, seen: &mut std::collections::HashSet<(i64, i64, i64, i64)>, rect: Rectangle) {
    if seen.insert(rect.dedup_key()) {
        out.push(rect);
    }
}

fn to_device_rect(re: [f64; 4], translation: (f64, f64), page_area_user: f64) -> Option<Rectangle> {
    let [x, y, w, h] = re;
    let dx = (x + translation.0) * params::VIEWPORT_SCALE;
    let dy = (y + translation.1) * params::VIEWPORT_SCALE;
    let dw = w.abs() * params::VIEWPORT_SCALE;
    let dh = h.abs() * params::VIEWPORT_SCALE;
    accept(Rectangle::new(dx, dy, dw, dh), page_area_user)
}

fn bbox_rect(points: &[(f64, f64)], translation: (f64, f64), page_area_user: f64) -> Option<Rectangle> {
    let xs = points.iter().map(|p| p.0);
    let ys = points.iter().map(|p| p.1);
    let min_x = xs.clone().fold(f64::INFINITY, f64::min);
    let max_x = xs.fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.clone().fold(f64::INFINITY, f64::min);
    let max_y = ys.fold(f64::NEG_INFINITY, f64::max);
    let dx = (min_x + translation.0) * params::VIEWPORT_SCALE;
    let dy = (min_y + translation.1) * params::VIEWPORT_SCALE;
    let dw = (max_x - min_x) * params::VIEWPORT_SCALE;
    let dh = (max_y - min_y) * params::VIEWPORT_SCALE;
    accept(Rectangle::new(dx, dy, dw, dh), page_area_user)
}

fn accept(rect: Rectangle, page_area_user: f64) -> Option<Rectangle> {
    let page_area_device = page_area_user * params::VIEWPORT_SCALE * params::VIEWPORT_SCALE;
    if rect.w < params::MIN_RECT_SIDE || rect.h < params::MIN_RECT_SIDE {
        return None;
    }
    if rect.area < params::MIN_RECT_AREA_FLOOR {
        return None;
    }
    if page_area_device > 0.0 {
        let fraction = rect.area / page_area_device;
        if fraction < params::MIN_RECT_AREA_PAGE_FRACTION || fraction > params::MAX_RECT_AREA_PAGE_FRACTION {
            return None;
        }
    }
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Object;

    fn op(name: &str, operands: Vec<Object>) -> Operation {
        Operation::new(name, operands)
    }

    fn n(v: f64) -> Object {
        Object::Real(v)
    }

    #[test]
    fn dark_rg_re_f_is_reconstructed() {
        let ops = vec![
            op("rg", vec![n(0.0), n(0.0), n(0.0)]),
            op("re", vec![n(100.0), n(100.0), n(200.0), n(30.0)]),
            op("f", vec![]),
        ];
        let rects = reconstruct(&ops, 612.0, 792.0);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].w, 300.0);
        assert_eq!(rects[0].h, 45.0);
    }

    #[test]
    fn light_fill_is_not_reconstructed() {
        let ops = vec![
            op("rg", vec![n(0.9), n(0.9), n(0.9)]),
            op("re", vec![n(100.0), n(100.0), n(200.0), n(30.0)]),
            op("f", vec![]),
        ];
        assert!(reconstruct(&ops, 612.0, 792.0).is_empty());
    }

    #[test]
    fn tiny_rect_is_filtered_by_min_side() {
        let ops = vec![op("g", vec![n(0.0)]), op("re", vec![n(0.0), n(0.0), n(1.0), n(1.0)]), op("f", vec![])];
        assert!(reconstruct(&ops, 612.0, 792.0).is_empty());
    }

    #[test]
    fn path_based_rectangle_is_reconstructed() {
        let ops = vec![
            op("g", vec![n(0.0)]),
            op("m", vec![n(50.0), n(50.0)]),
            op("l", vec![n(150.0), n(50.0)]),
            op("l", vec![n(150.0), n(80.0)]),
            op("l", vec![n(50.0), n(80.0)]),
            op("f", vec![]),
        ];
        let rects = reconstruct(&ops, 612.0, 792.0);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].w, 150.0);
        assert_eq!(rects[0].h, 45.0);
    }

    #[test]
    fn cm_translation_shifts_rectangle() {
        let ops = vec![
            op("cm", vec![n(1.0), n(0.0), n(0.0), n(1.0), n(10.0), n(20.0)]),
            op("g", vec![n(0.0)]),
            op("re", vec![n(0.0), n(0.0), n(100.0), n(20.0)]),
            op("f", vec![]),
        ];
        let rects = reconstruct(&ops, 612.0, 792.0);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].x, 15.0);
        assert_eq!(rects[0].y, 30.0);
    }

    #[test]
    fn duplicate_rectangles_are_deduped() {
        let ops = vec![
            op("g", vec![n(0.0)]),
            op("re", vec![n(100.0), n(100.0), n(200.0), n(30.0)]),
            op("f", vec![]),
            op("g", vec![n(0.0)]),
            op("re", vec![n(100.0), n(100.0), n(200.0), n(30.0)]),
            op("f", vec![]),
        ];
        assert_eq!(reconstruct(&ops, 612.0, 792.0).len(), 1);
    }

    #[test]
    fn giant_background_rect_is_filtered_by_max_area_fraction() {
        let ops = vec![op("g", vec![n(0.0)]), op("re", vec![n(0.0), n(0.0), n(612.0), n(792.0)]), op("f", vec![])];
        assert!(reconstruct(&ops, 612.0, 792.0).is_empty());
    }
}
