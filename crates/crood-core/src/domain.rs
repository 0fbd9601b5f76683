// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The contract between generated domain structs and the repository.

use sqlx::{FromRow, postgres::PgRow};

use crate::{table::Table, value::Value};

/// An immutable value type holding one row of a table.
///
/// `crood-gen` emits an implementation for every generated domain. Hand
/// written implementations must return [`Domain::values`] in the order of
/// [`Table::columns`].
///
/// # Example
///
/// ```rust,ignore
/// impl Domain for BookDomain {
///     fn table() -> &'static Table {
///         &BOOK
///     }
///
///     fn values(&self) -> Vec<Value> {
///         vec![Value::from(self.id), Value::from(self.title.clone())]
///     }
/// }
/// ```
pub trait Domain: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Metadata of the backing table.
    fn table() -> &'static Table;

    /// Column values in table column order.
    fn values(&self) -> Vec<Value>;
}
