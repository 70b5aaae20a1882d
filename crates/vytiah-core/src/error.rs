// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Vytiah.
//
// Only document-level classification failures propagate to callers as
// explicit errors. Per-stream and per-instruction failures are absorbed
// inside the engine, which always returns a usable text/byte result for
// any input that passed document-level classification.

use thiserror::Error;

/// Top-level error type for all Vytiah operations.
#[derive(Debug, Error)]
pub enum VytiahError {
    // -- Document classification errors --
    #[error("document '{filename}' does not match the expected template: {reason}")]
    TemplateMismatch { filename: String, reason: String },

    #[error("unreadable document: {0}")]
    InvalidDocument(String),

    // -- Processing errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image extraction failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VytiahError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_mismatch_names_the_file() {
        let err = VytiahError::TemplateMismatch {
            filename: "vytiah.pdf".into(),
            reason: "required marker phrases not found".into(),
        };
        let message = err.to_string();
        assert!(message.contains("vytiah.pdf"));
        assert!(message.contains("marker phrases"));
    }
}
