// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for intake operators.
//
// Every engine error is mapped to plain language with a clear suggestion,
// so the clerk uploading a document sees what to do next rather than a
// library error string.

use crate::error::VytiahError;

/// Whether the operator can do anything about the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Wrong file uploaded — re-upload the correct document.
    WrongInput,
    /// The file itself is damaged or unsupported.
    BadFile,
    /// Internal processing problem — retrying may help, or report it.
    Internal,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the operator should try (shown as body text).
    pub suggestion: String,
    /// Whether re-submitting the same file could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `VytiahError` into a `HumanError` an intake clerk can act on.
pub fn humanize_error(err: &VytiahError) -> HumanError {
    match err {
        VytiahError::TemplateMismatch { filename, reason } => HumanError {
            message: format!("'{filename}' is not the expected document."),
            suggestion: format!(
                "Check that you exported the correct registry document and upload it again. ({reason})"
            ),
            retriable: false,
            severity: Severity::WrongInput,
        },

        VytiahError::InvalidDocument(detail) => HumanError {
            message: "We couldn't read this file.".into(),
            suggestion: format!(
                "The file may be damaged or not a real PDF. Re-export it from the registry and try again. ({detail})"
            ),
            retriable: false,
            severity: Severity::BadFile,
        },

        VytiahError::PdfError(detail) => HumanError {
            message: "Something went wrong while processing the document.".into(),
            suggestion: format!("Try uploading again. If it keeps failing, report: {detail}"),
            retriable: true,
            severity: Severity::Internal,
        },

        VytiahError::ImageError(detail) => HumanError {
            message: "The photo inside the document couldn't be read.".into(),
            suggestion: format!(
                "The rest of the document was processed. Report this if the photo is required: {detail}"
            ),
            retriable: false,
            severity: Severity::BadFile,
        },

        VytiahError::Io(detail) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check disk space and permissions, then retry. ({detail})"),
            retriable: true,
            severity: Severity::Internal,
        },

        VytiahError::Serialization(detail) => HumanError {
            message: "A configuration file is malformed.".into(),
            suggestion: format!("Fix the template profile JSON and restart. ({detail})"),
            retriable: false,
            severity: Severity::Internal,
        },
    }
}
