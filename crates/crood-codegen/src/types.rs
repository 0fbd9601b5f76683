// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL type names to runtime and Rust types.
//!
//! | SQL names | [`SqlType`] | Rust |
//! |-----------|-------------|------|
//! | `smallint`, `int2`, `smallserial` | `SmallInt` | `i16` |
//! | `integer`, `int`, `int4`, `serial` | `Integer` | `i32` |
//! | `bigint`, `int8`, `bigserial` | `BigInt` | `i64` |
//! | `numeric`, `decimal`, `decimal_integer` | `Decimal` | `rust_decimal::Decimal` |
//! | `real`, `float4` | `Real` | `f32` |
//! | `double precision`, `float8` | `Double` | `f64` |
//! | `boolean`, `bool` | `Boolean` | `bool` |
//! | `char`, `character`, `bpchar` | `Char` | `String` |
//! | `varchar`, `character varying` | `Varchar` | `String` |
//! | `text`, `citext` | `Text` | `String` |
//! | `bytea`, `blob` | `Bytea` | `Vec<u8>` |
//! | `uuid` | `Uuid` | `uuid::Uuid` |
//! | `date` | `Date` | `chrono::NaiveDate` |
//! | `time` | `Time` | `chrono::NaiveTime` |
//! | `timestamp` | `Timestamp` | `chrono::NaiveDateTime` |
//! | `timestamptz`, `timestamp with time zone` | `TimestampTz` | `chrono::DateTime<chrono::Utc>` |
//! | `json` / `jsonb` | `Json` / `Jsonb` | `serde_json::Value` |
//!
//! Names are matched case-insensitively, ignoring a trailing `(n)` or
//! `(p, s)` modifier. Unknown names fall back to `text`.

use crood_core::SqlType;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Key types the database increments on its own.
const AUTO_INCREMENT: &[&str] = &[
    "smallint",
    "int2",
    "smallserial",
    "serial2",
    "integer",
    "int",
    "int4",
    "serial",
    "serial4",
    "decimal_integer",
    "bigint",
    "int8",
    "bigserial",
    "serial8"
];

/// Resolve a SQL type name, `None` if it is not known.
#[must_use]
pub fn lookup(name: &str) -> Option<SqlType> {
    let ty = match normalize(name).as_str() {
        "smallint" | "int2" | "smallserial" | "serial2" => SqlType::SmallInt,
        "integer" | "int" | "int4" | "serial" | "serial4" => SqlType::Integer,
        "bigint" | "int8" | "bigserial" | "serial8" => SqlType::BigInt,
        "numeric" | "decimal" | "decimal_integer" => SqlType::Decimal,
        "real" | "float4" => SqlType::Real,
        "double precision" | "double" | "float8" | "float" => SqlType::Double,
        "boolean" | "bool" => SqlType::Boolean,
        "char" | "character" | "bpchar" => SqlType::Char,
        "varchar" | "character varying" => SqlType::Varchar,
        "text" | "citext" | "clob" => SqlType::Text,
        "bytea" | "blob" | "binary" | "varbinary" => SqlType::Bytea,
        "uuid" => SqlType::Uuid,
        "date" => SqlType::Date,
        "time" | "time without time zone" => SqlType::Time,
        "timestamp" | "timestamp without time zone" => SqlType::Timestamp,
        "timestamptz" | "timestamp with time zone" => SqlType::TimestampTz,
        "json" => SqlType::Json,
        "jsonb" => SqlType::Jsonb,
        _ => return None
    };
    Some(ty)
}

/// Resolve a SQL type name, falling back to `text` with a warning.
#[must_use]
pub fn resolve(name: &str, column: &str) -> SqlType {
    lookup(name).unwrap_or_else(|| {
        tracing::warn!(column, sql_type = name, "unknown SQL type, mapping to text");
        SqlType::Text
    })
}

/// Whether a key column of this type is filled by the database.
#[must_use]
pub fn is_auto_increment_key(name: &str) -> bool {
    AUTO_INCREMENT.contains(&normalize(name).as_str())
}

/// Rust type of a non-null column.
#[must_use]
pub fn rust_type(ty: SqlType) -> TokenStream {
    match ty {
        SqlType::SmallInt => quote! { i16 },
        SqlType::Integer => quote! { i32 },
        SqlType::BigInt => quote! { i64 },
        SqlType::Decimal => quote! { rust_decimal::Decimal },
        SqlType::Real => quote! { f32 },
        SqlType::Double => quote! { f64 },
        SqlType::Boolean => quote! { bool },
        SqlType::Char | SqlType::Varchar | SqlType::Text => quote! { String },
        SqlType::Bytea => quote! { Vec<u8> },
        SqlType::Uuid => quote! { uuid::Uuid },
        SqlType::Date => quote! { chrono::NaiveDate },
        SqlType::Time => quote! { chrono::NaiveTime },
        SqlType::Timestamp => quote! { chrono::NaiveDateTime },
        SqlType::TimestampTz => quote! { chrono::DateTime<chrono::Utc> },
        SqlType::Json | SqlType::Jsonb => quote! { serde_json::Value }
    }
}

/// Whether getters should hand out a reference rather than a copy.
#[must_use]
pub const fn is_copy(ty: SqlType) -> bool {
    !matches!(
        ty,
        SqlType::Char
            | SqlType::Varchar
            | SqlType::Text
            | SqlType::Bytea
            | SqlType::Json
            | SqlType::Jsonb
    )
}

/// Whether a declared length bounds values of this type.
#[must_use]
pub const fn has_length(ty: SqlType) -> bool {
    ty.is_character() || matches!(ty, SqlType::Bytea)
}

/// `SqlType::<Variant>` path under the runtime crate.
#[must_use]
pub fn variant_path(runtime: &syn::Ident, ty: SqlType) -> TokenStream {
    let variant = format_ident!("{}", variant_name(ty));
    quote! { ::#runtime::SqlType::#variant }
}

const fn variant_name(ty: SqlType) -> &'static str {
    match ty {
        SqlType::SmallInt => "SmallInt",
        SqlType::Integer => "Integer",
        SqlType::BigInt => "BigInt",
        SqlType::Decimal => "Decimal",
        SqlType::Real => "Real",
        SqlType::Double => "Double",
        SqlType::Boolean => "Boolean",
        SqlType::Char => "Char",
        SqlType::Varchar => "Varchar",
        SqlType::Text => "Text",
        SqlType::Bytea => "Bytea",
        SqlType::Uuid => "Uuid",
        SqlType::Date => "Date",
        SqlType::Time => "Time",
        SqlType::Timestamp => "Timestamp",
        SqlType::TimestampTz => "TimestampTz",
        SqlType::Json => "Json",
        SqlType::Jsonb => "Jsonb"
    }
}

fn normalize(name: &str) -> String {
    let base = name.split('(').next().unwrap_or(name);
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(lookup("INT4"), Some(SqlType::Integer));
        assert_eq!(lookup("character  varying(255)"), Some(SqlType::Varchar));
        assert_eq!(lookup("Timestamp With Time Zone"), Some(SqlType::TimestampTz));
        assert_eq!(lookup("numeric(10, 2)"), Some(SqlType::Decimal));
        assert_eq!(lookup("geometry"), None);
    }

    #[test]
    fn unknown_type_falls_back_to_text() {
        assert_eq!(resolve("tsvector", "body"), SqlType::Text);
    }

    #[test]
    fn auto_increment_keys() {
        for name in ["smallint", "integer", "decimal_integer", "bigint", "BIGSERIAL"] {
            assert!(is_auto_increment_key(name), "{name}");
        }
        for name in ["uuid", "varchar", "numeric", "text"] {
            assert!(!is_auto_increment_key(name), "{name}");
        }
    }

    #[test]
    fn rust_types() {
        assert_eq!(rust_type(SqlType::BigInt).to_string(), "i64");
        assert_eq!(
            rust_type(SqlType::TimestampTz).to_string(),
            quote! { chrono::DateTime<chrono::Utc> }.to_string()
        );
        assert!(!is_copy(SqlType::Text));
        assert!(is_copy(SqlType::Uuid));
    }

    #[test]
    fn variant_paths() {
        let runtime = format_ident!("crood");
        assert_eq!(
            variant_path(&runtime, SqlType::TimestampTz).to_string(),
            quote! { ::crood::SqlType::TimestampTz }.to_string()
        );
    }
}
