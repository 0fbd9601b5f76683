// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mutable staging rows.
//!
//! Domains are immutable; mutations go through a [`Record`] that pairs
//! every column value with a *changed* flag. Only changed columns are
//! written by `UPDATE`, and key columns are never changed on update or
//! delete.

use crate::{
    condition::Condition,
    domain::Domain,
    error::CroodError,
    id::{Identifier, primary_key_condition},
    table::{Column, Table},
    value::Value
};

/// A staged row of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    table:   &'static Table,
    values:  Vec<Value>,
    changed: Vec<bool>
}

impl Record {
    /// Stage raw values for `table`, all columns marked changed.
    ///
    /// # Errors
    ///
    /// [`CroodError::Mapping`] if `values` does not have one entry per
    /// column.
    pub fn new(table: &'static Table, values: Vec<Value>) -> Result<Self, CroodError> {
        if values.len() != table.columns.len() {
            return Err(CroodError::Mapping {
                table:    table.name,
                expected: table.columns.len(),
                actual:   values.len()
            });
        }
        let changed = vec![true; values.len()];
        Ok(Self {
            table,
            values,
            changed
        })
    }

    /// Stage a domain object for insert.
    ///
    /// # Errors
    ///
    /// [`CroodError::Mapping`] if the domain's values do not match its table.
    pub fn from_domain<D: Domain>(domain: &D) -> Result<Self, CroodError> {
        Self::new(D::table(), domain.values())
    }

    /// Stage a domain object for update or delete: key columns unchanged.
    ///
    /// # Errors
    ///
    /// [`CroodError::Mapping`] if the domain's values do not match its table.
    pub fn for_update_or_delete<D: Domain>(domain: &D) -> Result<Self, CroodError> {
        let mut record = Self::from_domain(domain)?;
        for name in D::table().primary_key {
            record.set_changed(name, false)?;
        }
        Ok(record)
    }

    /// Table this record belongs to.
    #[must_use]
    pub const fn table(&self) -> &'static Table {
        self.table
    }

    /// Staged value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.table.column_index(column).map(|i| &self.values[i])
    }

    /// Flag a column as changed or unchanged.
    ///
    /// # Errors
    ///
    /// [`CroodError::UnknownColumn`] if the table has no such column.
    pub fn set_changed(&mut self, column: &str, changed: bool) -> Result<(), CroodError> {
        let index = self.index_of(column)?;
        self.changed[index] = changed;
        Ok(())
    }

    /// Whether a column is flagged changed.
    #[must_use]
    pub fn is_changed(&self, column: &str) -> bool {
        self.table
            .column_index(column)
            .is_some_and(|i| self.changed[i])
    }

    /// Columns with their staged values and changed flags.
    pub fn entries(&self) -> impl Iterator<Item = (&'static Column, &Value, bool)> + '_ {
        self.table
            .columns
            .iter()
            .zip(&self.values)
            .zip(&self.changed)
            .map(|((column, value), changed)| (column, value, *changed))
    }

    /// Primary key condition built from the staged key values.
    ///
    /// # Errors
    ///
    /// Same as [`primary_key_condition`].
    pub fn key_condition(&self) -> Result<Condition, CroodError> {
        let key: Vec<Value> = self
            .table
            .primary_key
            .iter()
            .map(|name| self.get(name).cloned().unwrap_or(Value::Null))
            .collect();
        primary_key_condition(self.table, &StagedKey(key))
    }

    fn index_of(&self, column: &str) -> Result<usize, CroodError> {
        self.table
            .column_index(column)
            .ok_or_else(|| CroodError::UnknownColumn {
                table:  self.table.name,
                column: column.to_owned()
            })
    }
}

struct StagedKey(Vec<Value>);

impl Identifier for StagedKey {
    fn key_values(&self) -> Vec<Value> {
        self.0.clone()
    }
}
