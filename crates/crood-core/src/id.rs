// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Identifiers and primary-key conditions.
//!
//! An [`Identifier`] is anything that can be split into one value per
//! primary key column: a scalar for single-column keys, a tuple for
//! composite keys. [`primary_key_condition`] checks the identifier against
//! the table before building the `WHERE` clause.
//!
//! ```rust,ignore
//! // single column key
//! repo.find_by_id(&42_i64).await?;
//!
//! // composite key (book_id, tag)
//! repo.find_by_id(&(42_i64, "rust")).await?;
//! ```

use uuid::Uuid;

use crate::{condition::Condition, error::CroodError, table::Table, value::Value};

/// A primary key value, possibly spanning several columns.
pub trait Identifier {
    /// One value per key component, in key order.
    fn key_values(&self) -> Vec<Value>;
}

macro_rules! scalar_identifier {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identifier for $ty {
                fn key_values(&self) -> Vec<Value> {
                    vec![Value::from(self.clone())]
                }
            }
        )*
    };
}

scalar_identifier!(i16, i32, i64, String, Uuid, Value);

impl Identifier for &str {
    fn key_values(&self) -> Vec<Value> {
        vec![Value::from(*self)]
    }
}

/// Key components already converted, for keys wider than four columns.
impl Identifier for Vec<Value> {
    fn key_values(&self) -> Vec<Value> {
        self.clone()
    }
}

macro_rules! tuple_identifier {
    ($($name:ident),+) => {
        impl<$($name),+> Identifier for ($($name,)+)
        where
            $($name: Clone + Into<Value>),+
        {
            #[allow(non_snake_case)]
            fn key_values(&self) -> Vec<Value> {
                let ($($name,)+) = self.clone();
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_identifier!(A, B);
tuple_identifier!(A, B, C);
tuple_identifier!(A, B, C, D);

/// Build `key1 = $1 AND key2 = $2 ...` for `id` against `table`.
///
/// # Errors
///
/// - [`CroodError::NoPrimaryKey`] if the table has no key columns
/// - [`CroodError::KeyArity`] if the identifier has a different number of
///   components than the key
/// - [`CroodError::KeyType`] if a component is not assignable to its column
pub fn primary_key_condition<I>(table: &'static Table, id: &I) -> Result<Condition, CroodError>
where
    I: Identifier + ?Sized
{
    let columns = table.primary_key_columns();
    if columns.is_empty() {
        return Err(CroodError::NoPrimaryKey {
            table: table.name
        });
    }

    let values = id.key_values();
    if values.len() != columns.len() {
        return Err(CroodError::KeyArity {
            table:    table.name,
            expected: columns.len(),
            actual:   values.len()
        });
    }

    let mut parts = Vec::with_capacity(columns.len());
    for (column, value) in columns.into_iter().zip(values) {
        let coerced = value.coerce_to(column.sql_type).ok_or(CroodError::KeyType {
            column:   column.name,
            expected: column.sql_type,
            actual:   value.type_name()
        })?;
        parts.push(Condition::Eq(column.name.to_owned(), coerced));
    }

    Ok(match parts.len() {
        1 => parts.remove(0),
        _ => Condition::And(parts)
    })
}
