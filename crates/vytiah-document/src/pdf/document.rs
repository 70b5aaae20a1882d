// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IntakeDocument — one uploaded document and its current parse generation.
//
// The byte buffer is the source of truth. Every edit rebuilds the whole
// document to fresh bytes and re-parses them into a new graph before any
// further operation, so a stale graph is never observed across an edit
// boundary. Editing is best-effort: a failed rebuild keeps the previous
// generation and the overall request still succeeds.

use std::path::Path;

use lopdf::Document;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};
use vytiah_core::TemplateProfile;
use vytiah_core::error::{Result, VytiahError};
use vytiah_core::types::ExtractedImage;

use super::filter::RemovalCriterion;
use super::{images, rebuild, text};

/// One document moving through intake processing.
pub struct IntakeDocument {
    /// Upload filename, for diagnostics and error messages.
    filename: String,
    /// Bytes of the current generation; always re-parseable.
    content: Vec<u8>,
    /// Object graph parsed from `content`.
    document: Document,
    page_count: usize,
}

impl std::fmt::Debug for IntakeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The graph and byte buffer are too large to dump.
        f.debug_struct("IntakeDocument")
            .field("filename", &self.filename)
            .field("page_count", &self.page_count)
            .field("bytes_len", &self.content.len())
            .finish_non_exhaustive()
    }
}

impl IntakeDocument {
    // -- Construction ---------------------------------------------------------

    /// Parse an uploaded document from raw bytes.
    #[instrument(skip_all, fields(bytes_len = bytes.len()))]
    pub fn from_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let filename = filename.into();
        let document = Document::load_mem(&bytes).map_err(|err| {
            VytiahError::InvalidDocument(format!("failed to parse '{filename}': {err}"))
        })?;
        let page_count = document.get_pages().len();

        debug!(filename, pages = page_count, "document parsed");

        Ok(Self {
            filename,
            content: bytes,
            document,
            page_count,
        })
    }

    // -- Inspection -----------------------------------------------------------

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Number of pages; invariant across every edit.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// SHA-256 fingerprint of the current generation's bytes.
    pub fn generation(&self) -> String {
        hex::encode(Sha256::digest(&self.content))
    }

    // -- Extraction -----------------------------------------------------------

    /// Plain text of the whole document in page/stream order.
    #[instrument(skip_all, fields(filename = %self.filename))]
    pub fn text(&self) -> String {
        text::document_text(&self.document)
    }

    /// Embedded raster image by flattened index (page-major, then in-page
    /// declared order). `None` is a normal outcome for an out-of-range
    /// index — a missing expected photo is an empty result, not a failure.
    #[instrument(skip_all, fields(filename = %self.filename, flat_index))]
    pub fn image_at(&self, flat_index: usize) -> Option<ExtractedImage> {
        images::image_at(&self.document, flat_index)
    }

    /// Total embedded raster images in the current generation.
    pub fn image_count(&self) -> usize {
        images::image_count(&self.document)
    }

    // -- Classification -------------------------------------------------------

    /// Require every marker phrase of a template profile to appear in the
    /// extracted text. Failure is a rejected-input outcome, never retried.
    #[instrument(skip_all, fields(filename = %self.filename, template = %profile.name))]
    pub fn verify_template(&self, profile: &TemplateProfile) -> Result<()> {
        let text = self.text();
        let missing: Vec<&str> = profile
            .required_phrases
            .iter()
            .filter(|phrase| !text.contains(phrase.as_str()))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            debug!("template markers found");
            Ok(())
        } else {
            Err(VytiahError::TemplateMismatch {
                filename: self.filename.clone(),
                reason: format!("required marker phrases not found: {}", missing.join(", ")),
            })
        }
    }

    // -- Editing --------------------------------------------------------------

    /// Remove every show-text instruction whose decoded text contains any
    /// of the needles. Removal drops whole instructions, not sub-spans.
    #[instrument(skip_all, fields(filename = %self.filename))]
    pub fn remove_text<I, S>(&mut self, needles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(RemovalCriterion::text(needles))
    }

    /// Remove every XObject invocation whose name is an exact match
    /// against the exclusion set.
    #[instrument(skip_all, fields(filename = %self.filename))]
    pub fn remove_xobjects<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(RemovalCriterion::xobject(names))
    }

    /// Apply a template profile's watermark scrub: text needles first,
    /// then XObject exclusions, composed as two edit passes.
    pub fn scrub(&mut self, profile: &TemplateProfile) -> &mut Self {
        self.remove_text(profile.watermark_needles.iter().cloned())
            .remove_xobjects(profile.xobject_exclusions.iter().cloned())
    }

    /// One edit pass: rebuild to fresh bytes, then re-parse. A failure in
    /// either step keeps the previous generation — editing never fails the
    /// overall request.
    fn apply(&mut self, criterion: RemovalCriterion) -> &mut Self {
        if criterion.is_empty() {
            return self;
        }

        let rebuilt = match rebuild::apply_criterion(&self.document, &criterion) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(filename = %self.filename, %err, "rebuild failed, keeping previous generation");
                return self;
            }
        };

        match Document::load_mem(&rebuilt) {
            Ok(document) => {
                self.page_count = document.get_pages().len();
                self.document = document;
                self.content = rebuilt;
                debug!(
                    filename = %self.filename,
                    generation = %self.generation(),
                    "edit applied, new generation parsed"
                );
            }
            Err(err) => {
                warn!(
                    filename = %self.filename,
                    %err,
                    "rebuilt bytes failed to re-parse, keeping previous generation"
                );
            }
        }
        self
    }

    // -- Output ---------------------------------------------------------------

    /// Bytes of the current generation, guaranteed re-parseable.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.content.clone()
    }

    /// Write the current generation to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.content)?;
        info!(filename = %self.filename, "wrote document to {}", path.as_ref().display());
        Ok(())
    }
}
