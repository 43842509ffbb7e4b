//! Drops a page's redaction annotations entirely (spec.md §4.8).
//!
//! A `/Redact` annotation is only ever a marker the original author never
//! applied; keeping it around after the overlay is stripped would leave a
//! stale instruction pointing at content that's now visible again.

use lopdf::ObjectId;

use crate::error::Result;
use crate::pdf::PdfSource;

/// Removes all annotations from `page_id`, returning how many were present.
pub fn sanitize_page(source: &mut PdfSource, page_id: ObjectId) -> Result<usize> {
    source.remove_annotations(page_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object};

    fn pdf_with_annot() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let annot_id = doc.add_object(dictionary! { "Subtype" => "Redact" });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)],
            "Annots" => vec![annot_id.into()],
        });
        doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }));
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn removes_existing_annotations() {
        let bytes = pdf_with_annot();
        let mut source = PdfSource::load(&bytes).unwrap();
        let (_, page_id) = source.pages()[0];
        let removed = sanitize_page(&mut source, page_id).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(source.annotation_ids(page_id).unwrap().len(), 0);
    }
}
