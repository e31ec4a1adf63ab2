//! Best-effort document extraction
//!
//! Recovers extracted text, the page count, and the merged metadata
//! dictionary (standard Info fields under `info:`, XMP metadata-stream
//! properties under `xmp:`). Parse failure is never an error: the extractor
//! degrades to an empty result plus a finding describing the state.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use lopdf::{Document, Object};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, instrument, warn};

use crate::report::{Finding, FindingCategory, Severity};

/// Best-effort extraction result. `findings` is non-empty only when the
/// parse degraded.
#[derive(Debug, Default)]
pub struct Extraction {
    pub text: String,
    pub page_count: usize,
    pub metadata: BTreeMap<String, String>,
    pub findings: Vec<Finding>,
}

#[instrument(skip(data), fields(size = data.len()))]
pub fn extract(data: &[u8]) -> Extraction {
    let parsed = catch_unwind(AssertUnwindSafe(|| parse(data)));
    match parsed {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(err)) => degraded(err.to_string()),
        Err(_) => degraded("parser panicked on malformed input".to_string()),
    }
}

fn parse(data: &[u8]) -> lopdf::Result<Extraction> {
    let doc = Document::load_mem(data)?;
    let pages = doc.get_pages();
    let page_count = pages.len();

    let mut metadata = BTreeMap::new();
    collect_info_dictionary(&doc, &mut metadata);
    collect_xmp_stream(&doc, &mut metadata);

    let page_numbers: Vec<u32> = pages.keys().copied().collect();
    // text extraction can fail on non-standard fonts; that alone does not
    // degrade the rest of the extraction
    let text = doc.extract_text(&page_numbers).unwrap_or_default();

    debug!(page_count, metadata_fields = metadata.len(), "extraction complete");
    Ok(Extraction {
        text,
        page_count,
        metadata,
        findings: Vec::new(),
    })
}

fn degraded(reason: String) -> Extraction {
    warn!(%reason, "document extraction degraded");
    Extraction {
        findings: vec![Finding::new(
            Severity::Medium,
            FindingCategory::Extraction,
            "Document extraction degraded",
            format!(
                "The structural parse failed ({}). Text, page count, and metadata \
                 are unavailable or partial; raw-byte analysis is unaffected.",
                reason
            ),
        )],
        ..Extraction::default()
    }
}

fn collect_info_dictionary(doc: &Document, out: &mut BTreeMap<String, String>) {
    let Ok(info) = doc.trailer.get(b"Info") else {
        return;
    };
    let dict = match info {
        Object::Reference(id) => doc
            .get_object(*id)
            .ok()
            .and_then(|object| object.as_dict().ok()),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    };
    let Some(dict) = dict else {
        return;
    };
    for (key, value) in dict.iter() {
        if let Some(text) = text_value(value) {
            if !text.trim().is_empty() {
                out.insert(format!("info:{}", String::from_utf8_lossy(key)), text);
            }
        }
    }
}

fn collect_xmp_stream(doc: &Document, out: &mut BTreeMap<String, String>) {
    let Ok(catalog) = doc.catalog() else {
        return;
    };
    let Ok(metadata_ref) = catalog.get(b"Metadata") else {
        return;
    };
    let stream = match metadata_ref {
        Object::Reference(id) => doc
            .get_object(*id)
            .ok()
            .and_then(|object| object.as_stream().ok()),
        Object::Stream(stream) => Some(stream),
        _ => None,
    };
    let Some(stream) = stream else {
        return;
    };
    let xml = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    parse_xmp(&xml, out);
}

/// Pulls property values out of the XMP packet. Properties appear both as
/// child elements (`<xmp:CreatorTool>…</xmp:CreatorTool>`) and as attributes
/// of `rdf:Description`; both forms are captured under the `xmp:` prefix.
fn parse_xmp(xml: &[u8], out: &mut BTreeMap<String, String>) {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                if name.ends_with("Description") {
                    collect_description_attributes(&element, out);
                }
                stack.push(name);
            }
            Ok(Event::Empty(element)) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                if name.ends_with("Description") {
                    collect_description_attributes(&element, out);
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(text)) => {
                let Ok(value) = text.unescape() else { continue };
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                // array values (rdf:Seq/rdf:li) attach to the nearest
                // enclosing property element
                if let Some(local) = stack.iter().rev().find_map(|name| property_name(name)) {
                    out.entry(format!("xmp:{}", local))
                        .or_insert_with(|| value.to_string());
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
}

fn collect_description_attributes(
    element: &quick_xml::events::BytesStart<'_>,
    out: &mut BTreeMap<String, String>,
) {
    for attribute in element.attributes().flatten() {
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let Some(local) = property_name(&key) else {
            continue;
        };
        let value = String::from_utf8_lossy(&attribute.value).trim().to_string();
        if !value.is_empty() {
            out.entry(format!("xmp:{}", local)).or_insert(value);
        }
    }
}

/// Local name of a namespaced XMP property, skipping RDF/XML plumbing.
fn property_name(qualified: &str) -> Option<&str> {
    let (prefix, local) = qualified.split_once(':')?;
    match prefix {
        "rdf" | "x" | "xml" | "xmlns" => None,
        _ => Some(local),
    }
}

/// Decodes a PDF text string: UTF-16BE when BOM-prefixed, PDFDocEncoding
/// treated as Latin-1 otherwise.
fn text_value(object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
