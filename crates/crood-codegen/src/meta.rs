// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema metadata consumed by the generator.
//!
//! The generator never talks to a database. It reads a description of the
//! schemas, usually exported once by a migration tool, in JSON or TOML:
//!
//! ```json
//! {
//!   "schemas": [{
//!     "name": "public",
//!     "tables": [{
//!       "name": "book",
//!       "columns": [
//!         { "name": "id", "type": "bigserial", "identity": true },
//!         { "name": "title", "type": "varchar", "length": 255 },
//!         { "name": "version", "type": "integer", "nullable": true }
//!       ],
//!       "primaryKey": { "columns": ["id"] }
//!     }]
//!   }]
//! }
//! ```
//!
//! | Type | Holds |
//! |------|-------|
//! | [`DatabaseDefinition`] | All schemas |
//! | [`SchemaDefinition`] | Tables of one schema |
//! | [`TableDefinition`] | Columns, primary key, foreign keys |
//! | [`ColumnDefinition`] | Name, SQL type and flags |
//! | [`KeyDefinition`] | Primary key column list |
//! | [`ForeignKeyDefinition`] | Referencing and referenced columns |

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path
};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::error::CodegenError;

/// Every schema handed to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDefinition {
    /// Schemas in output order.
    #[serde(default)]
    pub schemas: Vec<SchemaDefinition>
}

/// One database schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    /// Schema name.
    pub name:   String,
    /// Tables in output order.
    #[serde(default)]
    pub tables: Vec<TableDefinition>
}

/// One table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    /// Table name.
    pub name:         String,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns:      Vec<ColumnDefinition>,
    /// Primary key, if declared.
    #[serde(default)]
    pub primary_key:  Option<KeyDefinition>,
    /// Outgoing foreign keys.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDefinition>
}

/// One column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Column name.
    pub name:      String,
    /// SQL type name, e.g. `varchar` or `timestamp with time zone`.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Declared length of character and binary types.
    #[serde(default)]
    pub length:    u32,
    /// Numeric precision.
    #[serde(default)]
    pub precision: u32,
    /// Numeric scale.
    #[serde(default)]
    pub scale:     u32,
    /// Accepts `NULL`.
    #[serde(default)]
    pub nullable:  bool,
    /// Identity / serial column.
    #[serde(default)]
    pub identity:  bool,
    /// Has a server default.
    #[serde(default)]
    pub defaulted: bool
}

/// A primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDefinition {
    /// Constraint name.
    #[serde(default)]
    pub name:    Option<String>,
    /// Key columns in key order.
    pub columns: Vec<String>
}

/// A foreign key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDefinition {
    /// Constraint name.
    #[serde(default)]
    pub name:               Option<String>,
    /// Referencing columns.
    pub columns:            Vec<String>,
    /// Schema of the referenced table, the referencing schema if absent.
    #[serde(default)]
    pub referenced_schema:  Option<String>,
    /// Referenced table.
    pub referenced_table:   String,
    /// Referenced columns, paired with `columns` by position.
    pub referenced_columns: Vec<String>
}

impl DatabaseDefinition {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Json`] on malformed input, [`CodegenError::Metadata`]
    /// when validation fails.
    pub fn from_json(text: &str) -> Result<Self, CodegenError> {
        let definition: Self = serde_json::from_str(text)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Toml`] on malformed input, [`CodegenError::Metadata`]
    /// when validation fails.
    pub fn from_toml(text: &str) -> Result<Self, CodegenError> {
        let definition: Self = toml::from_str(text)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Read a metadata file; `.toml` files are TOML, anything else JSON.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_json`] / [`Self::from_toml`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CodegenError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        if is_toml(path) {
            Self::from_toml(&text)
        } else {
            Self::from_json(&text)
        }
    }

    /// Check names and key references.
    ///
    /// # Errors
    ///
    /// [`CodegenError::Metadata`] naming the first problem found:
    /// duplicate schema, table or column names (also after conversion to
    /// snake case), a table named `mod`, key columns that do not exist,
    /// or foreign keys whose column lists differ in length.
    pub fn validate(&self) -> Result<(), CodegenError> {
        unique(self.schemas.iter().map(|s| s.name.as_str()), "schema")?;
        unique_snake(self.schemas.iter().map(|s| s.name.as_str()), "schema")?;
        for schema in &self.schemas {
            unique(schema.tables.iter().map(|t| t.name.as_str()), "table")?;
            unique_snake(schema.tables.iter().map(|t| t.name.as_str()), "table")?;
            for table in &schema.tables {
                if table.name.to_case(Case::Snake) == "mod" {
                    return Err(CodegenError::Metadata(format!(
                        "table {}.{} would be written over the package `mod.rs`",
                        schema.name, table.name
                    )));
                }
                table.validate(&schema.name)?;
            }
        }
        Ok(())
    }

    /// Whether more than one schema is generated.
    #[must_use]
    pub fn has_multiple_schemas(&self) -> bool {
        self.schemas.len() > 1
    }

    /// Find a table by schema and name.
    #[must_use]
    pub fn find_table(&self, schema: &str, name: &str) -> Option<&TableDefinition> {
        self.schemas
            .iter()
            .find(|s| s.name == schema)
            .and_then(|s| s.tables.iter().find(|t| t.name == name))
    }
}

impl TableDefinition {
    /// Look up a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key column names, empty if the table has no key.
    #[must_use]
    pub fn primary_key_columns(&self) -> &[String] {
        self.primary_key.as_ref().map_or(&[], |k| k.columns.as_slice())
    }

    /// Whether `name` is part of the primary key.
    #[must_use]
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key_columns().iter().any(|c| c == name)
    }

    /// Whether `name` is a referencing column of any foreign key.
    #[must_use]
    pub fn is_foreign_key(&self, name: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.columns.iter().any(|c| c == name))
    }

    fn validate(&self, schema: &str) -> Result<(), CodegenError> {
        unique(self.columns.iter().map(|c| c.name.as_str()), "column")?;
        unique_snake(self.columns.iter().map(|c| c.name.as_str()), "column")?;
        for key in self.primary_key_columns() {
            if self.column(key).is_none() {
                return Err(CodegenError::Metadata(format!(
                    "primary key of {schema}.{} names unknown column `{key}`",
                    self.name
                )));
            }
        }
        for fk in &self.foreign_keys {
            if let Some(missing) = fk.columns.iter().find(|c| self.column(c).is_none()) {
                return Err(CodegenError::Metadata(format!(
                    "foreign key of {schema}.{} names unknown column `{missing}`",
                    self.name
                )));
            }
            if fk.columns.is_empty() || fk.columns.len() != fk.referenced_columns.len() {
                return Err(CodegenError::Metadata(format!(
                    "foreign key of {schema}.{} to {} pairs {} columns with {}",
                    self.name,
                    fk.referenced_table,
                    fk.columns.len(),
                    fk.referenced_columns.len()
                )));
            }
        }
        Ok(())
    }
}

impl ForeignKeyDefinition {
    /// Schema of the referenced table given the referencing schema.
    #[must_use]
    pub fn target_schema<'a>(&'a self, referencing: &'a str) -> &'a str {
        self.referenced_schema.as_deref().unwrap_or(referencing)
    }
}

pub(crate) fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn unique<'a>(names: impl Iterator<Item = &'a str>, kind: &str) -> Result<(), CodegenError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CodegenError::Metadata(format!("duplicate {kind} name `{name}`")));
        }
    }
    Ok(())
}

fn unique_snake<'a>(names: impl Iterator<Item = &'a str>, kind: &str) -> Result<(), CodegenError> {
    let mut seen = HashMap::new();
    for name in names {
        let snake = name.to_case(Case::Snake);
        if let Some(first) = seen.insert(snake.clone(), name) {
            return Err(CodegenError::Metadata(format!(
                "{kind} names `{first}` and `{name}` both become `{snake}`"
            )));
        }
    }
    Ok(())
}
