// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository error type.
//!
//! Configuration errors ([`CroodError::is_configuration`]) are raised before
//! any statement is sent: a malformed identifier never reaches the database.

use crate::value::SqlType;

/// Errors produced by identifier resolution and repository operations.
#[derive(Debug, thiserror::Error)]
pub enum CroodError {
    /// The table declares no primary key, so identifiers cannot be resolved.
    #[error("table {table} has no primary key")]
    NoPrimaryKey {
        /// Table name.
        table: &'static str
    },

    /// Identifier component count differs from the key column count.
    #[error("expected {expected} primary key value(s) for {table}, got {actual}")]
    KeyArity {
        /// Table name.
        table:    &'static str,
        /// Number of key columns.
        expected: usize,
        /// Number of supplied values.
        actual:   usize
    },

    /// An identifier component does not fit its key column.
    #[error("{actual} is not compatible with type of primary key {column} ({expected})")]
    KeyType {
        /// Key column name.
        column:   &'static str,
        /// Declared column type.
        expected: SqlType,
        /// Runtime type of the supplied value.
        actual:   &'static str
    },

    /// A column name does not exist on the table.
    #[error("column {column} does not exist on {table}")]
    UnknownColumn {
        /// Table name.
        table:  &'static str,
        /// Offending column name.
        column: String
    },

    /// A domain produced a different number of values than its table has
    /// columns.
    #[error("domain for {table} produced {actual} values, table has {expected} columns")]
    Mapping {
        /// Table name.
        table:    &'static str,
        /// Column count.
        expected: usize,
        /// Value count.
        actual:   usize
    },

    /// A query that must return a row returned none.
    #[error("no results in {table}")]
    NoResults {
        /// Table name.
        table: &'static str
    },

    /// A query that must return at most one row matched several.
    #[error("more than one row in {table} matches")]
    TooManyRows {
        /// Table name.
        table: &'static str
    },

    /// An optimistic-lock guarded update or delete matched no row.
    #[error("record in {table} was changed or removed concurrently")]
    StaleRecord {
        /// Table name.
        table: &'static str
    },

    /// Error reported by sqlx or the database.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error)
}

impl CroodError {
    /// Whether the error stems from a mismatch between caller input and
    /// table metadata rather than from executing a statement.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoPrimaryKey { .. }
                | Self::KeyArity { .. }
                | Self::KeyType { .. }
                | Self::UnknownColumn { .. }
                | Self::Mapping { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_type_message_names_both_types() {
        let err = CroodError::KeyType {
            column:   "id",
            expected: SqlType::BigInt,
            actual:   "String"
        };
        assert_eq!(
            err.to_string(),
            "String is not compatible with type of primary key id (BIGINT)"
        );
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(CroodError::NoPrimaryKey { table: "log" }.is_configuration());
        assert!(
            CroodError::KeyArity {
                table:    "book",
                expected: 1,
                actual:   2
            }
            .is_configuration()
        );
        assert!(!CroodError::NoResults { table: "book" }.is_configuration());
        assert!(!CroodError::StaleRecord { table: "book" }.is_configuration());
        assert!(!CroodError::TooManyRows { table: "book" }.is_configuration());
        assert!(!CroodError::from(sqlx::Error::RowNotFound).is_configuration());
    }
}
