// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-table generation context.
//!
//! [`TableContext`] resolves everything the emitters need once: column
//! types, field names, which columns hold record versions or timestamps,
//! and whether the key is filled by the database.
//!
//! # Column flags
//!
//! | Flag | Set when |
//! |------|----------|
//! | `optional` | nullable, identity, defaulted, lock column or auto-increment key |
//! | `version` | first column matched by the version expressions |
//! | `timestamp` | first other column matched by the timestamp expressions |
//! | `key` | part of the primary key |

use crood_core::SqlType;
use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::{
    config::GeneratorConfig,
    error::CodegenError,
    matcher::FieldMatcher,
    meta::{ColumnDefinition, DatabaseDefinition, SchemaDefinition, TableDefinition},
    strategy::GeneratorStrategy,
    types
};

/// Column view used by the emitters.
#[derive(Debug)]
pub struct ColumnContext<'a> {
    /// Source metadata.
    pub def:       &'a ColumnDefinition,
    /// Resolved SQL type.
    pub sql_type:  SqlType,
    /// Field name.
    pub member:    Ident,
    /// Rust type without the `Option` wrapper.
    pub base_type: TokenStream,
    /// Field type is `Option<base_type>`.
    pub optional:  bool,
    /// Part of the primary key.
    pub key:       bool,
    /// Record version column.
    pub version:   bool,
    /// Record timestamp column.
    pub timestamp: bool
}

impl ColumnContext<'_> {
    /// Field type as declared in the struct.
    #[must_use]
    pub fn field_type(&self) -> TokenStream {
        let base = &self.base_type;
        if self.optional {
            quote! { Option<#base> }
        } else {
            base.clone()
        }
    }

    /// Version or timestamp column.
    #[must_use]
    pub const fn is_lock(&self) -> bool {
        self.version || self.timestamp
    }

    /// Column name as written in the database.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Whether the field name differs from the column name.
    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.member.to_string().trim_start_matches("r#") != self.def.name
    }
}

/// Table view used by the emitters.
#[derive(Debug)]
pub struct TableContext<'a> {
    /// Whole input, for cross-table lookups.
    pub database:           &'a DatabaseDefinition,
    /// Schema of the table.
    pub schema:             &'a SchemaDefinition,
    /// Source metadata.
    pub table:              &'a TableDefinition,
    /// Generator options.
    pub config:             &'a GeneratorConfig,
    /// Crate generated code links against.
    pub runtime:            Ident,
    /// Columns in declaration order.
    pub columns:            Vec<ColumnContext<'a>>,
    /// Single-column key filled by the database.
    pub auto_increment_key: bool
}

impl<'a> TableContext<'a> {
    /// Resolve a table.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Syntax`] when the configured runtime crate is not
    /// an identifier.
    pub fn new(
        database: &'a DatabaseDefinition,
        schema: &'a SchemaDefinition,
        table: &'a TableDefinition,
        config: &'a GeneratorConfig,
        strategy: &dyn GeneratorStrategy,
        matchers: &Matchers
    ) -> Result<Self, CodegenError> {
        let runtime: Ident = syn::parse_str(&config.runtime_crate.replace('-', "_")).map_err(
            |source| CodegenError::Syntax {
                table: table.name.clone(),
                source
            }
        )?;
        let key = table.primary_key_columns();
        let auto_increment_key = match key {
            [single] => table
                .column(single)
                .is_some_and(|c| types::is_auto_increment_key(&c.data_type)),
            _ => false
        };

        let version = find_lock(table, &schema.name, &matchers.version, None);
        let timestamp = find_lock(table, &schema.name, &matchers.timestamp, version);

        let columns = table
            .columns
            .iter()
            .map(|def| {
                let sql_type = types::resolve(&def.data_type, &def.name);
                let is_key = table.is_primary_key(&def.name);
                let is_version = version == Some(def.name.as_str());
                let is_timestamp = timestamp == Some(def.name.as_str());
                ColumnContext {
                    def,
                    sql_type,
                    member: strategy.member_name(&def.name),
                    base_type: types::rust_type(sql_type),
                    optional: def.nullable
                        || def.identity
                        || def.defaulted
                        || is_version
                        || is_timestamp
                        || (is_key && auto_increment_key),
                    key: is_key,
                    version: is_version,
                    timestamp: is_timestamp
                }
            })
            .collect();

        Ok(Self {
            database,
            schema,
            table,
            config,
            runtime,
            columns,
            auto_increment_key
        })
    }

    /// Column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnContext<'a>> {
        self.columns.iter().find(|c| c.def.name == name)
    }

    /// Key columns in key order.
    #[must_use]
    pub fn key_columns(&self) -> Vec<&ColumnContext<'a>> {
        self.table
            .primary_key_columns()
            .iter()
            .filter_map(|name| self.column(name))
            .collect()
    }

    /// Name of the version column.
    #[must_use]
    pub fn version_field(&self) -> Option<&str> {
        self.columns.iter().find(|c| c.version).map(ColumnContext::name)
    }

    /// Name of the timestamp column.
    #[must_use]
    pub fn timestamp_field(&self) -> Option<&str> {
        self.columns.iter().find(|c| c.timestamp).map(ColumnContext::name)
    }

    /// Path from a table module back to the root of the generated tree.
    #[must_use]
    pub fn to_root(&self, strategy: &dyn GeneratorStrategy) -> TokenStream {
        let depth = strategy.package_path(self.database, &self.schema.name).len();
        let mut path = quote! { super };
        for _ in 0..depth {
            path = quote! { #path::super };
        }
        path
    }
}

/// Compiled version and timestamp expressions.
#[derive(Debug, Clone, Default)]
pub struct Matchers {
    /// Version columns.
    pub version:   FieldMatcher,
    /// Timestamp columns.
    pub timestamp: FieldMatcher
}

impl Matchers {
    /// Compile the expressions of `config`.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Pattern`] for an invalid expression.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, CodegenError> {
        Ok(Self {
            version:   config.version_matcher()?,
            timestamp: config.timestamp_matcher()?
        })
    }
}

fn find_lock<'a>(
    table: &'a TableDefinition,
    schema: &str,
    matcher: &FieldMatcher,
    exclude: Option<&str>
) -> Option<&'a str> {
    let mut found = table
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .filter(|name| Some(*name) != exclude && !table.is_primary_key(name))
        .filter(|name| matcher.matches(schema, &table.name, name));
    let first = found.next();
    if let (Some(first), Some(other)) = (first, found.next()) {
        tracing::warn!(table = %table.name, first, other, "several lock columns match, using the first");
    }
    first
}
