// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static table metadata.
//!
//! Generated domain modules declare one `static` [`Table`] per database
//! table. The repository reads everything it needs from it: the column
//! list for `SELECT`, the key columns for identifier conditions and the
//! optimistic-lock columns for `UPDATE`/`DELETE`.
//!
//! ```rust,ignore
//! pub static BOOK: Table = Table {
//!     schema:          Some("public"),
//!     name:            "book",
//!     columns:         &[
//!         Column::new("id", SqlType::BigInt).identity(),
//!         Column::new("title", SqlType::Varchar).length(255),
//!         Column::new("version", SqlType::Integer).nullable()
//!     ],
//!     primary_key:     &["id"],
//!     version_field:   Some("version"),
//!     timestamp_field: None
//! };
//! ```

use crate::value::SqlType;

/// A single column of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name as spelled in the database.
    pub name:      &'static str,
    /// Declared type.
    pub sql_type:  SqlType,
    /// Whether the column accepts `NULL`.
    pub nullable:  bool,
    /// Identity / auto-increment column assigned by the server.
    pub identity:  bool,
    /// Column has a server-side default.
    pub defaulted: bool,
    /// Declared length for character and binary types, `0` if unbounded.
    pub length:    u32
}

impl Column {
    /// Non-null column without default.
    #[must_use]
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
            identity: false,
            defaulted: false,
            length: 0
        }
    }

    /// Mark the column nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as an identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Mark the column as having a server default.
    #[must_use]
    pub const fn defaulted(mut self) -> Self {
        self.defaulted = true;
        self
    }

    /// Set the declared length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Whether the server fills this column when it is left out of an
    /// `INSERT`.
    #[must_use]
    pub const fn is_server_assigned(&self) -> bool {
        self.identity || self.defaulted
    }
}

/// Metadata of one database table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    /// Schema name, `None` for the connection's search path.
    pub schema:          Option<&'static str>,
    /// Table name.
    pub name:            &'static str,
    /// Columns in declaration order.
    pub columns:         &'static [Column],
    /// Primary key column names in key order. Empty if the table has none.
    pub primary_key:     &'static [&'static str],
    /// Optimistic-lock version column.
    pub version_field:   Option<&'static str>,
    /// Optimistic-lock timestamp column.
    pub timestamp_field: Option<&'static str>
}

impl Table {
    /// Schema-qualified, quoted name for use in SQL.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(self.name)),
            None => quote_ident(self.name)
        }
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column in [`Table::columns`].
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Primary key columns in key order.
    ///
    /// Key names without a matching column are skipped; generated tables
    /// never contain such names.
    #[must_use]
    pub fn primary_key_columns(&self) -> Vec<&'static Column> {
        self.primary_key
            .iter()
            .filter_map(|name| self.column(name))
            .collect()
    }

    /// Whether `name` is part of the primary key.
    #[must_use]
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.contains(&name)
    }

    /// The record version column, if any.
    #[must_use]
    pub fn version_column(&self) -> Option<&'static Column> {
        self.version_field.and_then(|name| self.column(name))
    }

    /// The record timestamp column, if any.
    #[must_use]
    pub fn timestamp_column(&self) -> Option<&'static Column> {
        self.timestamp_field.and_then(|name| self.column(name))
    }

    /// Column compared on update/delete to detect concurrent changes.
    ///
    /// The version column wins over the timestamp column.
    #[must_use]
    pub fn lock_column(&self) -> Option<&'static Column> {
        self.version_column().or_else(|| self.timestamp_column())
    }

    /// Whether `name` is the version or the timestamp column.
    #[must_use]
    pub fn is_lock_field(&self, name: &str) -> bool {
        self.version_field == Some(name) || self.timestamp_field == Some(name)
    }
}

/// Double-quote an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
