// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statement rendering.
//!
//! Every repository operation is rendered here into a
//! [`QueryBuilder`]; the repository only executes. Identifiers come from
//! [`Table`] metadata or are quoted, values are always bound.
//!
//! # SQL Patterns
//!
//! | Function | SQL |
//! |----------|-----|
//! | [`select`] | `SELECT c1, c2 FROM t WHERE ...` |
//! | [`select_field`] | `SELECT c FROM t WHERE ...` |
//! | [`limit`] | `... LIMIT n` |
//! | [`count`] | `SELECT COUNT(*) FROM t WHERE ...` |
//! | [`exists`] | `SELECT EXISTS(SELECT 1 FROM t WHERE ...)` |
//! | [`insert`] | `INSERT INTO t (...) VALUES (...)` |
//! | [`update`] | `UPDATE t SET ... WHERE key AND lock` |
//! | [`delete`] | `DELETE FROM t WHERE key AND lock` |
//! | [`delete_where`] | `DELETE FROM t WHERE ...` |
//! | [`truncate`] | `TRUNCATE TABLE t RESTART IDENTITY CASCADE` |
//!
//! # Version and Timestamp Columns
//!
//! The record version and record timestamp columns are maintained by the
//! statements, never by the caller: inserts write `1` and
//! `CURRENT_TIMESTAMP`, updates write `version + 1` and
//! `CURRENT_TIMESTAMP`. With optimistic locking enabled, updates and
//! deletes additionally require the lock column to still hold the staged
//! value.

use sqlx::{Postgres, QueryBuilder};

use crate::{
    condition::Condition,
    error::CroodError,
    record::Record,
    table::{Table, quote_ident},
    value::Value
};

/// A rendered statement ready to build and execute.
pub type Statement = QueryBuilder<'static, Postgres>;

fn column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| quote_ident(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_where(qb: &mut Statement, condition: &Condition) {
    if *condition != Condition::True {
        qb.push(" WHERE ");
        condition.push_to(qb);
    }
}

/// `SELECT` every column of `table`.
#[must_use]
pub fn select(table: &Table, condition: &Condition) -> Statement {
    let mut qb = Statement::new(format!(
        "SELECT {} FROM {}",
        column_list(table),
        table.qualified_name()
    ));
    push_where(&mut qb, condition);
    qb
}

/// `SELECT` a single column of `table`.
///
/// # Errors
///
/// [`CroodError::UnknownColumn`] if `field` is not a column of `table`.
pub fn select_field(
    table: &'static Table,
    field: &str,
    condition: &Condition
) -> Result<Statement, CroodError> {
    let column = table.column(field).ok_or_else(|| CroodError::UnknownColumn {
        table:  table.name,
        column: field.to_owned()
    })?;
    let mut qb = Statement::new(format!(
        "SELECT {} FROM {}",
        quote_ident(column.name),
        table.qualified_name()
    ));
    push_where(&mut qb, condition);
    Ok(qb)
}

/// Append `LIMIT rows` to a rendered `SELECT`.
pub fn limit(qb: &mut Statement, rows: u32) {
    qb.push(format!(" LIMIT {rows}"));
}

/// `SELECT COUNT(*)`.
#[must_use]
pub fn count(table: &Table, condition: &Condition) -> Statement {
    let mut qb = Statement::new(format!("SELECT COUNT(*) FROM {}", table.qualified_name()));
    push_where(&mut qb, condition);
    qb
}

/// `SELECT EXISTS(...)`.
#[must_use]
pub fn exists(table: &Table, condition: &Condition) -> Statement {
    let mut qb = Statement::new(format!("SELECT EXISTS(SELECT 1 FROM {}", table.qualified_name()));
    push_where(&mut qb, condition);
    qb.push(")");
    qb
}

/// `INSERT` a staged record.
///
/// Unchanged columns are left out, as are server-assigned columns
/// (identity or defaulted) whose staged value is `NULL`. Version and
/// timestamp columns are always written by the statement.
#[must_use]
pub fn insert(record: &Record) -> Statement {
    let table = record.table();
    let mut columns = Vec::new();
    let mut values: Vec<InsertValue> = Vec::new();

    for (column, value, changed) in record.entries() {
        if table.version_field == Some(column.name) {
            columns.push(column.name);
            values.push(InsertValue::Sql("1"));
        } else if table.timestamp_field == Some(column.name) {
            columns.push(column.name);
            values.push(InsertValue::Sql("CURRENT_TIMESTAMP"));
        } else if !changed || (value.is_null() && column.is_server_assigned()) {
            continue;
        } else {
            columns.push(column.name);
            values.push(InsertValue::Bind(value.clone()));
        }
    }

    let mut qb = Statement::new(format!("INSERT INTO {}", table.qualified_name()));
    if columns.is_empty() {
        qb.push(" DEFAULT VALUES");
        return qb;
    }

    let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    qb.push(format!(" ({}) VALUES (", names.join(", ")));
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        match value {
            InsertValue::Sql(sql) => {
                qb.push(sql);
            }
            InsertValue::Bind(v) => v.push_to(&mut qb)
        }
    }
    qb.push(")");
    qb
}

enum InsertValue {
    Sql(&'static str),
    Bind(Value)
}

/// `UPDATE` the changed, non-key columns of a staged record.
///
/// Returns `Ok(None)` when the record has nothing to write (every column is
/// a key column or unchanged and the table has no version/timestamp
/// column).
///
/// # Errors
///
/// Key resolution errors from [`Record::key_condition`].
pub fn update(record: &Record, locking: bool) -> Result<Option<Statement>, CroodError> {
    let table = record.table();
    let mut assignments: Vec<(&str, Value)> = Vec::new();

    for (column, value, changed) in record.entries() {
        if table.is_primary_key(column.name) || table.is_lock_field(column.name) || !changed {
            continue;
        }
        assignments.push((column.name, value.clone()));
    }

    let has_lock_fields = table.version_column().is_some() || table.timestamp_column().is_some();
    if assignments.is_empty() && !has_lock_fields {
        return Ok(None);
    }

    let guard = where_clause(record, locking)?;
    let mut qb = Statement::new(format!("UPDATE {} SET ", table.qualified_name()));
    let mut first = true;
    let mut separator = |qb: &mut Statement| {
        if !first {
            qb.push(", ");
        }
        first = false;
    };

    for (name, value) in assignments {
        separator(&mut qb);
        qb.push(format!("{} = ", quote_ident(name)));
        value.push_to(&mut qb);
    }
    if let Some(version) = table.version_column() {
        separator(&mut qb);
        let name = quote_ident(version.name);
        qb.push(format!("{name} = COALESCE({name}, 0) + 1"));
    }
    if let Some(timestamp) = table.timestamp_column() {
        separator(&mut qb);
        qb.push(format!("{} = CURRENT_TIMESTAMP", quote_ident(timestamp.name)));
    }

    push_where(&mut qb, &guard);
    Ok(Some(qb))
}

/// `DELETE` a staged record by key.
///
/// # Errors
///
/// Key resolution errors from [`Record::key_condition`].
pub fn delete(record: &Record, locking: bool) -> Result<Statement, CroodError> {
    let guard = where_clause(record, locking)?;
    let mut qb = Statement::new(format!("DELETE FROM {}", record.table().qualified_name()));
    push_where(&mut qb, &guard);
    Ok(qb)
}

/// `DELETE` all rows matching a condition.
#[must_use]
pub fn delete_where(table: &Table, condition: &Condition) -> Statement {
    let mut qb = Statement::new(format!("DELETE FROM {}", table.qualified_name()));
    push_where(&mut qb, condition);
    qb
}

/// `TRUNCATE` the table, restarting identities and cascading.
#[must_use]
pub fn truncate(table: &Table) -> Statement {
    Statement::new(format!(
        "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
        table.qualified_name()
    ))
}

/// Key condition, plus lock column equality when locking.
fn where_clause(record: &Record, locking: bool) -> Result<Condition, CroodError> {
    let key = record.key_condition()?;
    let lock = if locking {
        record.table().lock_column()
    } else {
        None
    };
    Ok(match lock {
        Some(column) => {
            let staged = record.get(column.name).cloned().unwrap_or(Value::Null);
            key.and(Condition::Eq(column.name.to_owned(), staged))
        }
        None => key
    })
}
