// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text assembler — reconstructs plain text from show-text instructions.
//
// This is label-stream text, not rendered text: no instruction is
// interpreted for layout or position. Each `Tj` string is one line; each
// string run inside a `TJ` array is its own line (the source streams treat
// each run independently), with numeric kerning adjustments skipped.

use lopdf::{Document, Object, ObjectId};
use tracing::warn;

use super::content::{
    self, OP_SHOW_TEXT, OP_SHOW_TEXT_ARRAY, decode_text_operand,
};

/// Extract the text of one page, fragments in declared order.
///
/// A page with no content entry yields an empty string. A fragment that
/// fails to tokenize contributes nothing and the rest of the page is still
/// processed.
pub fn page_text(doc: &Document, page_id: ObjectId) -> String {
    let entry = match content::content_entry(doc, page_id) {
        Ok(Some(entry)) => entry,
        Ok(None) => return String::new(),
        Err(err) => {
            warn!(?page_id, %err, "cannot resolve content entry, skipping page text");
            return String::new();
        }
    };

    let mut lines: Vec<String> = Vec::new();
    for &stream_id in entry.stream_ids() {
        let operations = match content::stream_at(doc, stream_id).and_then(|s| content::tokenize(s))
        {
            Ok(operations) => operations,
            Err(err) => {
                warn!(?stream_id, %err, "cannot tokenize content fragment, skipping");
                continue;
            }
        };

        for operation in &operations {
            match operation.operator.as_str() {
                OP_SHOW_TEXT => {
                    if let Some(text) = operation.operands.first().and_then(decode_text_operand) {
                        lines.push(text);
                    }
                }
                OP_SHOW_TEXT_ARRAY => {
                    let Some(Object::Array(elements)) = operation.operands.first() else {
                        continue;
                    };
                    // String runs become lines; numeric positioning
                    // adjustments between them are not text.
                    for element in elements {
                        if let Some(text) = decode_text_operand(element) {
                            lines.push(text);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    lines.join("\n")
}

/// Extract the whole document's text, pages in ascending order.
///
/// Pages that contribute no text are omitted rather than producing blank
/// lines; page texts are joined with a single newline.
pub fn document_text(doc: &Document) -> String {
    let mut page_texts: Vec<String> = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let text = page_text(doc, page_id);
        if !text.is_empty() {
            page_texts.push(text);
        }
    }
    page_texts.join("\n")
}
