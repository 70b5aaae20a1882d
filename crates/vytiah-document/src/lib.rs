// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// vytiah-document — PDF content-stream processing for the Vytiah intake engine.
//
// Operates below the page-object abstraction, on the ordered sequence of
// drawing instructions inside each page's content stream(s): tokenizing,
// removing watermark instructions by text or XObject name, extracting plain
// text in stream order, and locating embedded raster images by flattened
// index. Low-level byte/object parsing is delegated to `lopdf`.

pub mod pdf;

// Re-export the primary types so callers can use `vytiah_document::IntakeDocument` etc.
pub use pdf::document::IntakeDocument;
pub use pdf::filter::RemovalCriterion;
