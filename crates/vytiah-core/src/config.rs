// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Template profiles — per-document-class processing parameters.
//
// Each government document class (migration service extract, pension fund
// statement, vehicle registry export) is identified by marker phrases and
// carries its own watermark-scrub criteria. Profiles are plain data so the
// surrounding service can load them from JSON instead of recompiling.

use serde::{Deserialize, Serialize};

/// Processing profile for one document template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateProfile {
    /// Short machine name, e.g. `"migration-service-extract"`.
    pub name: String,
    /// Phrases that must all appear in the extracted text for the document
    /// to be accepted as this template.
    pub required_phrases: Vec<String>,
    /// Show-text needles whose containing instructions are removed
    /// (watermark lines such as the requesting user's name).
    pub watermark_needles: Vec<String>,
    /// XObject names whose invoking instructions are removed (watermark
    /// images), with or without a leading `/`.
    pub xobject_exclusions: Vec<String>,
}

impl TemplateProfile {
    /// Parse a profile from its JSON representation.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Profile for the migration service person-info extract.
    pub fn migration_extract() -> Self {
        Self {
            name: "migration-service-extract".into(),
            required_phrases: vec![
                "Державна міграційна служба України".into(),
                "ІНФОРМАЦІЯ ПРО ОСОБУ".into(),
            ],
            watermark_needles: vec!["Користувач ".into()],
            xobject_exclusions: vec!["/I2".into()],
        }
    }
}
