// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document rebuilder — applies a removal criterion to every content
// fragment and serializes the edited graph back to bytes.
//
// The input graph is never mutated: editing works on a clone, and callers
// re-parse the returned bytes into a fresh graph before any further
// operation. A fragment that cannot be tokenized passes through unmodified;
// only whole-document serialization failure surfaces as an error.

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, warn};
use vytiah_core::error::{Result, VytiahError};

use super::content;
use super::filter::{RemovalCriterion, filter_operations};

/// Apply a removal criterion across the whole document and serialize.
///
/// Pages without a content entry pass through untouched; the page set and
/// the `Single`/`Sequence` shape of every edited entry are preserved, so
/// page count is invariant across the edit.
pub fn apply_criterion(doc: &Document, criterion: &RemovalCriterion) -> Result<Vec<u8>> {
    let mut edited = doc.clone();
    let page_ids: Vec<ObjectId> = edited.get_pages().into_values().collect();

    let mut rewritten = 0usize;
    for page_id in page_ids {
        let entry = match content::content_entry(&edited, page_id) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(err) => {
                warn!(?page_id, %err, "cannot resolve content entry, page passes through");
                continue;
            }
        };

        for &stream_id in entry.stream_ids() {
            if rewrite_fragment(&mut edited, stream_id, criterion) {
                rewritten += 1;
            }
        }
    }

    let mut output = Vec::new();
    edited.save_to(&mut output).map_err(|err| {
        VytiahError::PdfError(format!("failed to serialize edited document: {err}"))
    })?;

    debug!(
        rewritten,
        output_bytes = output.len(),
        "document rebuilt from edited streams"
    );
    Ok(output)
}

/// Replace one content fragment with a plain stream of its surviving
/// instructions. Returns whether the fragment was rewritten; tokenize or
/// encode failures leave it untouched.
fn rewrite_fragment(doc: &mut Document, stream_id: ObjectId, criterion: &RemovalCriterion) -> bool {
    let operations = match content::stream_at(doc, stream_id).and_then(|s| content::tokenize(s)) {
        Ok(operations) => operations,
        Err(err) => {
            warn!(?stream_id, %err, "fragment failed to tokenize, passing through");
            return false;
        }
    };

    let survivors = filter_operations(&operations, criterion);
    let encoded = match content::encode(survivors) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!(?stream_id, %err, "fragment failed to re-encode, passing through");
            return false;
        }
    };

    match doc.get_object_mut(stream_id) {
        Ok(slot) => {
            // A fresh plain stream; Length is derived from the new content
            // and no stale /Filter survives.
            *slot = Object::Stream(Stream::new(dictionary! {}, encoded));
            true
        }
        Err(err) => {
            warn!(?stream_id, %err, "cannot replace content fragment");
            false
        }
    }
}
