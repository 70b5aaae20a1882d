// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — content-stream tokenizing, operator filtering, text assembly,
// document rebuilding, and embedded image lookup.

pub mod content;
pub mod document;
pub mod filter;
pub mod images;
pub mod rebuild;
pub mod text;

#[cfg(test)]
pub(crate) mod fixtures;

pub use document::IntakeDocument;
pub use filter::RemovalCriterion;
