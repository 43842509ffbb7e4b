//! Page-level geometry reconstruction: filled rectangles, approximate text
//! layout, and redaction annotation counting (spec.md §4.2-§4.4).

pub mod annotations;
pub mod rectangles;
pub mod text;
