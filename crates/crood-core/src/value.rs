// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column types and runtime-typed cell values.
//!
//! [`SqlType`] is the declared type of a column, [`Value`] is what a domain
//! object actually holds at runtime. The two meet in
//! [`Value::coerce_to`], which decides whether a value may be compared with
//! or written into a column.
//!
//! # Type Mapping Table
//!
//! | `SqlType` | Rust Type | `Value` variant |
//! |-----------|-----------|-----------------|
//! | `SmallInt` | `i16` | `SmallInt` |
//! | `Integer` | `i32` | `Int` |
//! | `BigInt` | `i64` | `BigInt` |
//! | `Decimal` | `rust_decimal::Decimal` | `Decimal` |
//! | `Real` | `f32` | `Real` |
//! | `Double` | `f64` | `Double` |
//! | `Boolean` | `bool` | `Bool` |
//! | `Char` / `Varchar` / `Text` | `String` | `Text` |
//! | `Bytea` | `Vec<u8>` | `Bytes` |
//! | `Uuid` | `uuid::Uuid` | `Uuid` |
//! | `Date` | `chrono::NaiveDate` | `Date` |
//! | `Time` | `chrono::NaiveTime` | `Time` |
//! | `Timestamp` | `chrono::NaiveDateTime` | `Timestamp` |
//! | `TimestampTz` | `chrono::DateTime<Utc>` | `TimestampTz` |
//! | `Json` / `Jsonb` | `serde_json::Value` | `Json` |

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Declared SQL type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// `SMALLINT` (2 bytes).
    SmallInt,
    /// `INTEGER` (4 bytes).
    Integer,
    /// `BIGINT` (8 bytes).
    BigInt,
    /// `NUMERIC` / `DECIMAL`.
    Decimal,
    /// `REAL`.
    Real,
    /// `DOUBLE PRECISION`.
    Double,
    /// `BOOLEAN`.
    Boolean,
    /// `CHAR(n)`.
    Char,
    /// `VARCHAR(n)`.
    Varchar,
    /// `TEXT`.
    Text,
    /// `BYTEA`.
    Bytea,
    /// `UUID`.
    Uuid,
    /// `DATE`.
    Date,
    /// `TIME`.
    Time,
    /// `TIMESTAMP` without time zone.
    Timestamp,
    /// `TIMESTAMPTZ`.
    TimestampTz,
    /// `JSON`.
    Json,
    /// `JSONB`.
    Jsonb
}

impl SqlType {
    /// SQL spelling of the type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Real => "REAL",
            Self::Double => "DOUBLE PRECISION",
            Self::Boolean => "BOOLEAN",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Text => "TEXT",
            Self::Bytea => "BYTEA",
            Self::Uuid => "UUID",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampTz => "TIMESTAMPTZ",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB"
        }
    }

    /// Whether values of this type are character data.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Char | Self::Varchar | Self::Text)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell value carrying its runtime type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    Bool(bool),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Json(serde_json::Value)
}

impl Value {
    /// Whether this is SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the runtime type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::SmallInt(_) => "i16",
            Self::Int(_) => "i32",
            Self::BigInt(_) => "i64",
            Self::Real(_) => "f32",
            Self::Double(_) => "f64",
            Self::Decimal(_) => "Decimal",
            Self::Text(_) => "String",
            Self::Bytes(_) => "Vec<u8>",
            Self::Uuid(_) => "Uuid",
            Self::Date(_) => "NaiveDate",
            Self::Time(_) => "NaiveTime",
            Self::Timestamp(_) => "NaiveDateTime",
            Self::TimestampTz(_) => "DateTime<Utc>",
            Self::Json(_) => "serde_json::Value"
        }
    }

    /// Convert this value for use against a column of type `ty`.
    ///
    /// Returns `None` when the runtime type is not assignable to `ty`.
    /// Integers widen losslessly (`i16 -> i32 -> i64`); text fits every
    /// character type; JSON fits both `JSON` and `JSONB`. `NULL` is never
    /// assignable here, nullability is the caller's concern.
    #[must_use]
    pub fn coerce_to(&self, ty: SqlType) -> Option<Value> {
        let coerced = match (self, ty) {
            (Self::SmallInt(v), SqlType::SmallInt) => Self::SmallInt(*v),
            (Self::SmallInt(v), SqlType::Integer) => Self::Int(i32::from(*v)),
            (Self::SmallInt(v), SqlType::BigInt) => Self::BigInt(i64::from(*v)),
            (Self::Int(v), SqlType::Integer) => Self::Int(*v),
            (Self::Int(v), SqlType::BigInt) => Self::BigInt(i64::from(*v)),
            (Self::BigInt(v), SqlType::BigInt) => Self::BigInt(*v),
            (Self::Decimal(v), SqlType::Decimal) => Self::Decimal(*v),
            (Self::Real(v), SqlType::Real) => Self::Real(*v),
            (Self::Real(v), SqlType::Double) => Self::Double(f64::from(*v)),
            (Self::Double(v), SqlType::Double) => Self::Double(*v),
            (Self::Bool(v), SqlType::Boolean) => Self::Bool(*v),
            (Self::Text(v), t) if t.is_character() => Self::Text(v.clone()),
            (Self::Bytes(v), SqlType::Bytea) => Self::Bytes(v.clone()),
            (Self::Uuid(v), SqlType::Uuid) => Self::Uuid(*v),
            (Self::Date(v), SqlType::Date) => Self::Date(*v),
            (Self::Time(v), SqlType::Time) => Self::Time(*v),
            (Self::Timestamp(v), SqlType::Timestamp) => Self::Timestamp(*v),
            (Self::TimestampTz(v), SqlType::TimestampTz) => Self::TimestampTz(*v),
            (Self::Json(v), SqlType::Json | SqlType::Jsonb) => Self::Json(v.clone()),
            _ => return None
        };
        Some(coerced)
    }

    /// Append this value to a statement.
    ///
    /// Non-null values become bind parameters. `NULL` is written as a
    /// literal so it does not need a parameter type.
    pub fn push_to(self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Self::Null => qb.push("NULL"),
            Self::Bool(v) => qb.push_bind(v),
            Self::SmallInt(v) => qb.push_bind(v),
            Self::Int(v) => qb.push_bind(v),
            Self::BigInt(v) => qb.push_bind(v),
            Self::Real(v) => qb.push_bind(v),
            Self::Double(v) => qb.push_bind(v),
            Self::Decimal(v) => qb.push_bind(v),
            Self::Text(v) => qb.push_bind(v),
            Self::Bytes(v) => qb.push_bind(v),
            Self::Uuid(v) => qb.push_bind(v),
            Self::Date(v) => qb.push_bind(v),
            Self::Time(v) => qb.push_bind(v),
            Self::Timestamp(v) => qb.push_bind(v),
            Self::TimestampTz(v) => qb.push_bind(v),
            Self::Json(v) => qb.push_bind(v)
        };
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    f32 => Real,
    f64 => Double,
    Decimal => Decimal,
    String => Text,
    Vec<u8> => Bytes,
    Uuid => Uuid,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    serde_json::Value => Json,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_but_never_narrow() {
        assert_eq!(Value::SmallInt(7).coerce_to(SqlType::BigInt), Some(Value::BigInt(7)));
        assert_eq!(Value::Int(7).coerce_to(SqlType::BigInt), Some(Value::BigInt(7)));
        assert_eq!(Value::BigInt(7).coerce_to(SqlType::Integer), None);
        assert_eq!(Value::Int(7).coerce_to(SqlType::SmallInt), None);
    }

    #[test]
    fn text_fits_every_character_type() {
        for ty in [SqlType::Char, SqlType::Varchar, SqlType::Text] {
            assert!(Value::from("abc").coerce_to(ty).is_some());
        }
        assert!(Value::from("abc").coerce_to(SqlType::Uuid).is_none());
    }

    #[test]
    fn null_is_not_assignable() {
        assert!(Value::Null.coerce_to(SqlType::BigInt).is_none());
    }

    #[test]
    fn option_none_becomes_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3_i64)), Value::BigInt(3));
    }

    #[test]
    fn null_renders_as_literal() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        Value::Null.push_to(&mut qb);
        qb.push(", ");
        Value::from(1_i32).push_to(&mut qb);
        assert_eq!(qb.sql(), "SELECT NULL, $1");
    }

    #[test]
    fn sql_type_names() {
        assert_eq!(SqlType::Double.to_string(), "DOUBLE PRECISION");
        assert!(SqlType::Varchar.is_character());
        assert!(!SqlType::Uuid.is_character());
    }
}
