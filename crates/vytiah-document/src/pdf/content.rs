// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content-stream tokenizer — turns one stream fragment into an ordered list
// of drawing instructions, and decodes show-text operands best-effort.
//
// A page's /Contents may be a single stream or an ordered array of stream
// fragments that together form one instruction sequence. Both shapes are
// modelled explicitly as `ContentEntry` instead of being re-inspected at
// every use site.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat};
use tracing::warn;
use vytiah_core::error::{Result, VytiahError};

/// Single-string show-text operator.
pub const OP_SHOW_TEXT: &str = "Tj";
/// Positioned-array show-text operator.
pub const OP_SHOW_TEXT_ARRAY: &str = "TJ";
/// Invoke-referenced-XObject operator.
pub const OP_INVOKE_XOBJECT: &str = "Do";

/// How far reference chains are followed before giving up.
const MAX_REFERENCE_DEPTH: usize = 8;

/// A page's content entry: one stream or an ordered sequence of fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEntry {
    Single(ObjectId),
    Sequence(Vec<ObjectId>),
}

impl ContentEntry {
    /// Stream object ids in fragment order.
    pub fn stream_ids(&self) -> &[ObjectId] {
        match self {
            Self::Single(id) => std::slice::from_ref(id),
            Self::Sequence(ids) => ids,
        }
    }
}

/// Resolve the content entry of a page, if it has one.
///
/// Pages without /Contents return `Ok(None)` and are pass-throughs for both
/// editing and extraction. An array entry keeps its declared fragment order.
pub fn content_entry(doc: &Document, page_id: ObjectId) -> Result<Option<ContentEntry>> {
    let page = doc.get_object(page_id).map_err(|err| {
        VytiahError::PdfError(format!("cannot read page object {page_id:?}: {err}"))
    })?;
    let page_dict = page.as_dict().map_err(|err| {
        VytiahError::PdfError(format!("page object {page_id:?} is not a dictionary: {err}"))
    })?;

    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(None);
    };

    match resolve(doc, contents) {
        Some((Some(id), Object::Stream(_))) => Ok(Some(ContentEntry::Single(id))),
        Some((_, Object::Array(elements))) => {
            let mut ids = Vec::with_capacity(elements.len());
            for element in elements {
                match resolve(doc, element) {
                    Some((Some(id), Object::Stream(_))) => ids.push(id),
                    _ => {
                        warn!(?page_id, "skipping non-stream entry in /Contents array");
                    }
                }
            }
            Ok(Some(ContentEntry::Sequence(ids)))
        }
        _ => {
            // Direct inline streams carry no object id and cannot be
            // re-targeted for editing; treat the page as contentless.
            warn!(?page_id, "unsupported /Contents shape, page passes through");
            Ok(None)
        }
    }
}

/// Fetch the stream object behind a content-entry id.
pub fn stream_at<'a>(doc: &'a Document, id: ObjectId) -> Result<&'a Stream> {
    match doc.get_object(id) {
        Ok(Object::Stream(stream)) => Ok(stream),
        Ok(_) => Err(VytiahError::PdfError(format!(
            "content object {id:?} is not a stream"
        ))),
        Err(err) => Err(VytiahError::PdfError(format!(
            "cannot read content object {id:?}: {err}"
        ))),
    }
}

/// Tokenize one content-stream fragment into its ordered instruction list.
///
/// Operands are kept as opaque `lopdf::Object`s; text decoding happens only
/// where a caller needs the decoded string.
pub fn tokenize(stream: &Stream) -> Result<Vec<Operation>> {
    // Streams without a /Filter key carry their bytes directly.
    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let content = Content::decode(&data)
        .map_err(|err| VytiahError::PdfError(format!("cannot tokenize content stream: {err}")))?;
    Ok(content.operations)
}

/// Serialize an instruction list back into plain content-stream bytes.
///
/// An empty instruction list encodes to a valid empty stream.
pub fn encode(operations: Vec<Operation>) -> Result<Vec<u8>> {
    Content { operations }
        .encode()
        .map_err(|err| VytiahError::PdfError(format!("cannot encode content stream: {err}")))
}

/// Decode a show-text operand, if the operand is a string at all.
pub fn decode_text_operand(operand: &Object) -> Option<String> {
    match operand {
        Object::String(bytes, format) => Some(decode_string(bytes, *format)),
        _ => None,
    }
}

/// Best-effort string decoding; never fails.
///
/// BOM-prefixed and hexadecimal strings are read as two-byte big-endian
/// text (the encoding the registry exports use for Cyrillic); literal
/// strings are read as UTF-8. Undecodable units become replacement
/// characters, and a trailing odd byte of a two-byte string is dropped.
pub fn decode_string(bytes: &[u8], format: StringFormat) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return decode_utf16_be(&bytes[2..]);
    }
    if format == StringFormat::Hexadecimal && !bytes.is_empty() && bytes.len() % 2 == 0 {
        return decode_utf16_be(bytes);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf16_be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Follow reference chains to the underlying object, keeping the last
/// object id seen (the id edits must target).
pub(crate) fn resolve<'a>(
    doc: &'a Document,
    object: &'a Object,
) -> Option<(Option<ObjectId>, &'a Object)> {
    let mut current = object;
    let mut last_id = None;
    for _ in 0..MAX_REFERENCE_DEPTH {
        match current {
            Object::Reference(id) => {
                last_id = Some(*id);
                current = doc.get_object(*id).ok()?;
            }
            other => return Some((last_id, other)),
        }
    }
    None
}
