//! Per-page evidence gathering.
//!
//! Extraction is deliberately defensive: a page that cannot yield a signal
//! simply yields none. Only a document that fails to parse at all is an
//! error, and that is the caller's problem, not this module's.

use lopdf::{Document, Object, ObjectId};

/// The raw evidence the classifier decides on, collected once per page.
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    /// Best-effort extracted text; empty when extraction fails.
    pub text: String,
    /// Number of XObjects (images, forms) declared in the page resources.
    pub xobject_count: usize,
    /// All content streams of the page, decoded and concatenated.
    pub content_bytes: Vec<u8>,
}

impl PageSignals {
    /// Collect signals for one page. `page_number` is the 1-based number
    /// from [`Document::get_pages`], `page_id` the matching object id.
    pub fn collect(doc: &Document, page_number: u32, page_id: ObjectId) -> Self {
        Self {
            text: doc.extract_text(&[page_number]).unwrap_or_default(),
            xobject_count: count_xobjects(doc, page_id),
            content_bytes: content_bytes(doc, page_id),
        }
    }

    /// True when the extracted text is non-empty after trimming.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn has_xobjects(&self) -> bool {
        self.xobject_count > 0
    }

    /// Content-stream length with leading/trailing PDF whitespace removed.
    pub fn trimmed_content_len(&self) -> usize {
        trim_pdf_whitespace(&self.content_bytes).len()
    }
}

/// Whitespace characters as the PDF syntax defines them.
fn is_pdf_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

fn trim_pdf_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_pdf_whitespace(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !is_pdf_whitespace(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Follow an indirect reference one level, leaving direct objects alone.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Look up a key on the page dictionary, walking up the page tree via
/// /Parent when the key is inherited. The depth cap guards against
/// malformed circular trees.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_id;
    for _ in 0..64 {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

/// Count the XObject entries the page's resources declare. A scanned page
/// is typically one image XObject and no text layer, so this presence
/// check is what keeps scans alive.
fn count_xobjects(doc: &Document, page_id: ObjectId) -> usize {
    let Some(resources) = resolve_inherited(doc, page_id, b"Resources") else {
        return 0;
    };
    let Ok(resources) = resolve(doc, resources).as_dict() else {
        return 0;
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return 0;
    };
    match resolve(doc, xobjects).as_dict() {
        Ok(dict) => dict.len(),
        Err(_) => 0,
    }
}

/// Decode and concatenate the page's content streams. A page may carry a
/// single stream or a list; a stream that fails to decode is skipped and
/// the rest still count.
fn content_bytes(doc: &Document, page_id: ObjectId) -> Vec<u8> {
    let mut content = Vec::new();
    for stream_id in doc.get_page_contents(page_id) {
        let Ok(stream) = doc.get_object(stream_id).and_then(|o| o.as_stream()) else {
            continue;
        };
        let bytes = if stream.dict.get(b"Filter").is_ok() {
            match stream.decompressed_content() {
                Ok(decoded) => decoded,
                Err(_) => continue,
            }
        } else {
            stream.content.clone()
        };
        // Streams in a /Contents array are logically one stream; keep the
        // operator boundary between them.
        if !content.is_empty() {
            content.push(b' ');
        }
        content.extend_from_slice(&bytes);
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Dictionary, Stream};

    /// Single-page document with the given page dictionary entries filled in
    /// by `build`.
    fn single_page_doc(build: impl FnOnce(&mut Document, &mut Dictionary)) -> (Document, u32, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        build(&mut doc, &mut page);
        let page_id = doc.add_object(page);

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        (doc, 1, page_id)
    }

    #[test]
    fn test_empty_page_has_no_signals() {
        let (doc, number, id) = single_page_doc(|_, _| {});
        let signals = PageSignals::collect(&doc, number, id);
        assert!(!signals.has_text());
        assert!(!signals.has_xobjects());
        assert_eq!(signals.trimmed_content_len(), 0);
    }

    #[test]
    fn test_text_page_yields_text() {
        let (doc, number, id) = single_page_doc(|doc, page| {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
            });
            let content = Stream::new(
                Dictionary::new(),
                b"BT /F1 12 Tf 72 700 Td (Hello) Tj ET".to_vec(),
            );
            let content_id = doc.add_object(Object::Stream(content));
            page.set("Contents", content_id);
            page.set(
                "Resources",
                dictionary! { "Font" => dictionary! { "F1" => font_id } },
            );
        });
        let signals = PageSignals::collect(&doc, number, id);
        assert!(signals.has_text());
        assert!(signals.text.contains("Hello"));
    }

    #[test]
    fn test_image_page_counts_xobjects() {
        let (doc, number, id) = single_page_doc(|doc, page| {
            let image = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![0x80],
            );
            let image_id = doc.add_object(Object::Stream(image));
            let content = Stream::new(
                Dictionary::new(),
                b"q 100 0 0 100 72 600 cm /Im0 Do Q".to_vec(),
            );
            let content_id = doc.add_object(Object::Stream(content));
            page.set("Contents", content_id);
            page.set(
                "Resources",
                dictionary! { "XObject" => dictionary! { "Im0" => image_id } },
            );
        });
        let signals = PageSignals::collect(&doc, number, id);
        assert!(!signals.has_text());
        assert_eq!(signals.xobject_count, 1);
    }

    #[test]
    fn test_contents_array_is_concatenated() {
        let (doc, number, id) = single_page_doc(|doc, page| {
            let first = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                b"0 0 m".to_vec(),
            )));
            let second = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                b"100 100 l S".to_vec(),
            )));
            page.set(
                "Contents",
                Object::Array(vec![first.into(), second.into()]),
            );
        });
        let signals = PageSignals::collect(&doc, number, id);
        assert_eq!(signals.content_bytes, b"0 0 m 100 100 l S".to_vec());
    }

    #[test]
    fn test_undecodable_stream_is_skipped() {
        let (doc, number, id) = single_page_doc(|doc, page| {
            // Claims FlateDecode but holds garbage; must not poison the
            // rest of the array.
            let broken = doc.add_object(Object::Stream(Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                b"\xde\xad\xbe\xef".to_vec(),
            )));
            let good = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                b"0 0 m 100 100 l S".to_vec(),
            )));
            page.set(
                "Contents",
                Object::Array(vec![broken.into(), good.into()]),
            );
        });
        let signals = PageSignals::collect(&doc, number, id);
        assert_eq!(signals.content_bytes, b"0 0 m 100 100 l S".to_vec());
    }

    #[test]
    fn test_trimmed_content_len_ignores_padding() {
        let signals = PageSignals {
            content_bytes: b" \n\r q Q \t ".to_vec(),
            ..Default::default()
        };
        assert_eq!(signals.trimmed_content_len(), 3);
    }
}
