// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Vytiah intake engine.

use serde::{Deserialize, Serialize};

/// Raster image formats the engine can hand back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// JPEG — DCT-compressed streams are passed through unchanged.
    Jpeg,
    /// PNG — re-encoded from uncompressed or Flate-compressed raster data.
    Png,
    /// JPEG 2000 — JPX-compressed streams are passed through unchanged.
    Jpeg2000,
}

impl ImageFormat {
    /// File extension for the format, without a leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Jpeg2000 => "jp2",
        }
    }

    /// MIME type string for response headers.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Jpeg2000 => "image/jp2",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// An embedded raster image pulled out of a document by flattened index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// Raw bytes in the format named by `format` (already decompressed
    /// where that matters; JPEG/JP2 streams are the compressed originals).
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ExtractedImage {
    pub fn new(bytes: Vec<u8>, format: ImageFormat) -> Self {
        Self { bytes, format }
    }

    /// File extension for the image payload.
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}
