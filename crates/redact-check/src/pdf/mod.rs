//! Thin access layer over `lopdf`, isolating the rest of the crate from
//! object-graph plumbing (spec.md §4.1).
//!
//! Nothing here interprets page content. It hands operator lists, raw
//! stream bytes, and annotation dictionaries up to the callers that do.

pub mod operators;

use std::io::Read;

use flate2::read::ZlibDecoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{RedactError, Result};
use crate::params::VIEWPORT_SCALE;

/// zlib header bytes seen in practice: default, fastest, and best-compression
/// presets (spec.md §4.7). A stream beginning with one of these but declaring
/// no `/Filter` is still worth a speculative inflate attempt.
const ZLIB_MAGIC_PREFIXES: [[u8; 2]; 3] = [[0x78, 0x9c], [0x78, 0x01], [0x78, 0xda]];

/// Best-effort zlib inflate, used only when a stream looks compressed but
/// declares no filter. Returns `None` if the bytes don't actually inflate.
fn speculative_inflate(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).ok()?;
    Some(out)
}

fn stream_has_filter(stream: &Stream) -> bool {
    stream.dict.get(b"Filter").is_ok()
}

/// A loaded PDF, indexed by page number in document order.
pub struct PdfSource {
    doc: Document,
    pages: Vec<(u32, ObjectId)>,
}

/// A page's MediaBox in user-space points.
#[derive(Debug, Clone, Copy)]
pub struct MediaBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl MediaBox {
    /// Page width/height in device units (spec.md §3, viewport scale applied).
    pub fn device_size(&self) -> (f64, f64) {
        (
            (self.urx - self.llx) * VIEWPORT_SCALE,
            (self.ury - self.lly) * VIEWPORT_SCALE,
        )
    }
}

impl PdfSource {
    /// Loads a PDF from bytes, ignoring encryption rather than failing on it
    /// (spec.md §4.1: encrypted PDFs are still inspected best-effort).
    pub fn load(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(RedactError::EmptyInput);
        }
        if !bytes.starts_with(b"%PDF-") {
            return Err(RedactError::MalformedPdf);
        }
        let doc = Document::load_mem(bytes).map_err(|e| RedactError::PdfParseFailed(e.to_string()))?;
        let pages = doc.get_pages().into_iter().collect::<Vec<_>>();
        Ok(Self { doc, pages })
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Page numbers and their object ids, in document order, 1-based.
    pub fn pages(&self) -> &[(u32, ObjectId)] {
        &self.pages
    }

    fn page_dict(&self, page_id: ObjectId) -> Result<&Dictionary> {
        self.doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|e| RedactError::PdfParseFailed(format!("page {page_id:?}: {e}")))
    }

    pub fn media_box(&self, page_id: ObjectId) -> Result<MediaBox> {
        let dict = self.page_dict(page_id)?;
        let obj = self
            .resolve(dict.get(b"MediaBox").map_err(|_| RedactError::PdfParseFailed("missing MediaBox".into()))?)?;
        let arr = obj
            .as_array()
            .map_err(|_| RedactError::PdfParseFailed("MediaBox is not an array".into()))?;
        if arr.len() != 4 {
            return Err(RedactError::PdfParseFailed("MediaBox does not have 4 entries".into()));
        }
        let nums: Vec<f64> = arr.iter().filter_map(operators::as_f64).collect();
        if nums.len() != 4 {
            return Err(RedactError::PdfParseFailed("MediaBox entries are not all numbers".into()));
        }
        Ok(MediaBox { llx: nums[0], lly: nums[1], urx: nums[2], ury: nums[3] })
    }

    fn resolve(&self, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(r) => self
                .doc
                .get_object(*r)
                .cloned()
                .map_err(|e| RedactError::PdfParseFailed(e.to_string())),
            other => Ok(other.clone()),
        }
    }

    /// Object ids of this page's content streams, in the order they concatenate.
    pub fn content_stream_ids(&self, page_id: ObjectId) -> Result<Vec<ObjectId>> {
        let dict = self.page_dict(page_id)?;
        let contents = match dict.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };
        match contents {
            Object::Reference(r) => Ok(vec![*r]),
            Object::Array(items) => Ok(items.iter().filter_map(|o| o.as_reference().ok()).collect()),
            _ => Ok(Vec::new()),
        }
    }

    /// Decompressed bytes of a single content (or any) stream.
    ///
    /// lopdf's own `decompressed_content()` only decodes when a `/Filter` is
    /// declared. Some producers write a zlib-compressed stream without one;
    /// when the filter is absent but the bytes start with a zlib magic
    /// header, a speculative inflate is attempted before falling back to the
    /// raw bytes (spec.md §4.7).
    pub fn stream_raw(&self, id: ObjectId) -> Result<Vec<u8>> {
        let stream = self
            .doc
            .get_object(id)
            .and_then(Object::as_stream)
            .map_err(|e| RedactError::PdfParseFailed(e.to_string()))?;
        if let Ok(content) = stream.decompressed_content() {
            return Ok(content);
        }
        if !stream_has_filter(stream) {
            if let Some(prefix) = stream.content.get(0..2) {
                if ZLIB_MAGIC_PREFIXES.iter().any(|magic| magic == prefix) {
                    if let Some(inflated) = speculative_inflate(&stream.content) {
                        tracing::debug!(?id, "speculatively inflated a stream with no declared filter");
                        return Ok(inflated);
                    }
                }
            }
        }
        Ok(stream.content.clone())
    }

    /// True if the stream declares `FlateDecode` as its (sole) filter.
    pub fn stream_is_flate(&self, id: ObjectId) -> bool {
        let Ok(stream) = self.doc.get_object(id).and_then(Object::as_stream) else {
            return false;
        };
        match stream.dict.get(b"Filter") {
            Ok(Object::Name(n)) => n == b"FlateDecode",
            Ok(Object::Array(arr)) => arr.len() == 1 && matches!(&arr[0], Object::Name(n) if n == b"FlateDecode"),
            _ => false,
        }
    }

    /// Decoded operator list for a page, concatenating all of its content streams
    /// in order. Malformed individual streams are skipped and logged, not fatal
    /// (spec.md §4.1 local recovery).
    pub fn operations(&self, page_id: ObjectId) -> Result<Vec<Operation>> {
        let mut all = Vec::new();
        for id in self.content_stream_ids(page_id)? {
            let raw = match self.stream_raw(id) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(?id, error = %e, "skipping unreadable content stream");
                    continue;
                }
            };
            match Content::decode(&raw) {
                Ok(content) => all.extend(content.operations),
                Err(e) => {
                    tracing::warn!(?id, error = %e, "skipping undecodable content stream");
                }
            }
        }
        Ok(all)
    }

    /// Object ids referenced by this page's `/Annots` array.
    pub fn annotation_ids(&self, page_id: ObjectId) -> Result<Vec<ObjectId>> {
        let dict = self.page_dict(page_id)?;
        let Ok(annots) = dict.get(b"Annots") else {
            return Ok(Vec::new());
        };
        let resolved = self.resolve(annots)?;
        let Ok(arr) = resolved.as_array() else {
            return Ok(Vec::new());
        };
        Ok(arr.iter().filter_map(|o| o.as_reference().ok()).collect())
    }

    /// The annotation's `/Subtype` name, if present, lowercased.
    pub fn annotation_subtype(&self, annot_id: ObjectId) -> Option<String> {
        let dict = self.doc.get_object(annot_id).and_then(Object::as_dict).ok()?;
        let name = dict.get(b"Subtype").ok()?.as_name().ok()?;
        Some(String::from_utf8_lossy(name).to_lowercase())
    }

    pub fn is_encrypted(&self) -> bool {
        self.doc.trailer.get(b"Encrypt").is_ok()
    }

    /// Removes the page's `/Annots` entry entirely, returning how many
    /// annotations were dropped.
    pub fn remove_annotations(&mut self, page_id: ObjectId) -> Result<usize> {
        let count = self.annotation_ids(page_id)?.len();
        if count == 0 {
            return Ok(0);
        }
        let dict = self
            .doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| RedactError::PdfParseFailed(e.to_string()))?;
        dict.remove(b"Annots");
        Ok(count)
    }

    /// Replaces a content stream's bytes with `new_content`, dropping any
    /// compression filter so the bytes are stored as-is (spec.md §4.7: the
    /// stripper only ever touches streams it could read as plain ASCII).
    pub fn replace_stream_content(&mut self, id: ObjectId, new_content: Vec<u8>) -> Result<()> {
        let stream = self
            .doc
            .get_object_mut(id)
            .and_then(Object::as_stream_mut)
            .map_err(|e| RedactError::PdfParseFailed(e.to_string()))?;
        stream.dict.remove(b"Filter");
        stream.dict.remove(b"DecodeParms");
        stream.dict.set("Length", new_content.len() as i64);
        stream.content = new_content;
        Ok(())
    }

    /// Serializes the (possibly mutated) document back to bytes.
    pub fn serialize(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.doc.save_to(&mut buf).map_err(|e| RedactError::SerializeFailed(e.to_string()))?;
        Ok(buf)
    }
}
