// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column name matching for record version and timestamp fields.
//!
//! Each configured expression must match a whole name. A column matches
//! when an expression matches its bare name, `table.column`, or
//! `schema.table.column`, so `.*\.version` targets every table while
//! `book\.version` targets one.

use regex::Regex;

use crate::error::CodegenError;

/// Compiled set of field name expressions.
#[derive(Debug, Clone, Default)]
pub struct FieldMatcher {
    patterns: Vec<Regex>
}

impl FieldMatcher {
    /// Compile `patterns`. An empty list yields a matcher that accepts
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Pattern`] for the first expression that does not
    /// compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, CodegenError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(&format!("^(?:{p})$")).map_err(|source| CodegenError::Pattern {
                    pattern: p.to_owned(),
                    source
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            patterns
        })
    }

    /// Whether the column `schema.table.column` matches.
    #[must_use]
    pub fn matches(&self, schema: &str, table: &str, column: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let in_table = format!("{table}.{column}");
        let qualified = format!("{schema}.{in_table}");
        self.patterns.iter().any(|p| {
            p.is_match(column) || p.is_match(&in_table) || p.is_match(&qualified)
        })
    }

    /// Whether no expression is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
