// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration.
//!
//! Every key is optional; a missing file or an empty document gives
//! [`GeneratorConfig::default`].
//!
//! ```json
//! {
//!   "annotations": { "enableTransient": true, "enableValidation": true },
//!   "frameworks": { "openapi": true },
//!   "recordVersionFields": ["version"],
//!   "recordTimestampFields": [".*\\.modified_at"],
//!   "runtimeCrate": "crood",
//!   "generateFixtures": true
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf}
};

use serde::{Deserialize, Serialize};

use crate::{error::CodegenError, matcher::FieldMatcher, meta::is_toml};

/// File read by [`GeneratorConfig::from_home`].
pub const HOME_CONFIG_FILE: &str = "crood.json";

/// Options controlling the emitted code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Attribute toggles.
    pub annotations:             Annotations,
    /// Framework integrations.
    pub frameworks:              Frameworks,
    /// Expressions naming record version columns.
    pub record_version_fields:   Vec<String>,
    /// Expressions naming record timestamp columns.
    pub record_timestamp_fields: Vec<String>,
    /// Crate path generated code uses for runtime types.
    pub runtime_crate:           String,
    /// Also emit `<Table>TestDomain` fixtures.
    pub generate_fixtures:       bool
}

/// Attribute toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Annotations {
    /// Skip identity and lock fields when serializing.
    pub enable_transient:  bool,
    /// Derive `validator::Validate` with length checks.
    pub enable_validation: bool
}

/// Framework integrations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frameworks {
    /// Derive `utoipa::ToSchema`.
    pub openapi: bool
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            annotations:             Annotations::default(),
            frameworks:              Frameworks::default(),
            record_version_fields:   Vec::new(),
            record_timestamp_fields: Vec::new(),
            runtime_crate:           "crood".to_owned(),
            generate_fixtures:       false
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file.
    ///
    /// A file that does not exist or cannot be read, and a document with
    /// no content, give the default configuration. `.toml` files are
    /// parsed as TOML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Json`] or [`CodegenError::Toml`] for a malformed
    /// document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodegenError> {
        let path = path.as_ref();
        let Ok(text) = fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "no generator config, using defaults");
            return Ok(Self::default());
        };
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = if is_toml(path) {
            toml::from_str(&text)?
        } else {
            serde_json::from_str(&text)?
        };
        Ok(config)
    }

    /// Load `$HOME/crood.json`, defaults when `HOME` is unset.
    ///
    /// # Errors
    ///
    /// As [`Self::load`].
    pub fn from_home() -> Result<Self, CodegenError> {
        match home_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default())
        }
    }

    /// Compiled version field matcher.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Pattern`] for an invalid expression.
    pub fn version_matcher(&self) -> Result<FieldMatcher, CodegenError> {
        FieldMatcher::new(&self.record_version_fields)
    }

    /// Compiled timestamp field matcher.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Pattern`] for an invalid expression.
    pub fn timestamp_matcher(&self) -> Result<FieldMatcher, CodegenError> {
        FieldMatcher::new(&self.record_timestamp_fields)
    }
}

fn home_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HOME_CONFIG_FILE))
}
