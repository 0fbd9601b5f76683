// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator error type.

use std::path::PathBuf;

/// Errors raised while loading input or emitting code.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// Reading or writing a file failed.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error
    },

    /// Malformed JSON input.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML input.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A version or timestamp field expression does not compile.
    #[error("invalid field pattern `{pattern}`: {source}")]
    Pattern {
        /// The configured expression.
        pattern: String,
        /// Regex compile error.
        #[source]
        source:  regex::Error
    },

    /// Schema metadata is inconsistent.
    #[error("invalid metadata: {0}")]
    Metadata(String),

    /// Emitted tokens are not a valid Rust file.
    #[error("generated code for {table} does not parse: {source}")]
    Syntax {
        /// Table the code was generated for.
        table:  String,
        /// Parser error.
        #[source]
        source: syn::Error
    }
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source
        }
    }
}
