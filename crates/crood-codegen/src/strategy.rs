// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming of generated items and modules.
//!
//! | Item | `book_tag` / `createdAt` with [`DomainStrategy`] |
//! |------|-----------------------------------------------|
//! | struct | `BookTagDomain` |
//! | module | `book_tag` |
//! | field / getter | `created_at` |
//! | setter | `set_created_at` |
//! | table static | `BOOK_TAG` |
//! | id alias | `BookTagId` |
//! | package | `domain`, or `<schema>::domain` with several schemas |
//!
//! [`TestDomainStrategy`] differs only in the `TestDomain` suffix and the
//! `fixture` package.

use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span};
use quote::format_ident;

use crate::meta::DatabaseDefinition;

/// Rust keywords that can be used as raw identifiers.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield"
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Generated method names a getter must not shadow.
const METHODS: &[&str] = &["new", "for_insert", "to_domain"];

/// Naming rules shared by the domain and fixture emitters.
pub trait GeneratorStrategy {
    /// Appended to the struct name.
    fn suffix(&self) -> &'static str;

    /// Last module segment the files are written to.
    fn package(&self) -> &'static str;

    /// Struct name for a table.
    fn struct_name(&self, table: &str) -> Ident {
        format_ident!("{}{}", pascal(table), self.suffix())
    }

    /// Module (file) name for a table.
    fn module_name(&self, table: &str) -> Ident {
        ident(&table.to_case(Case::Snake))
    }

    /// Field name for a column.
    fn member_name(&self, column: &str) -> Ident {
        ident(&column.to_case(Case::Snake))
    }

    /// Getter name for a column.
    fn getter_name(&self, column: &str) -> Ident {
        let name = column.to_case(Case::Snake);
        if METHODS.contains(&name.as_str()) {
            format_ident!("get_{}", name)
        } else {
            ident(&name)
        }
    }

    /// Setter name for a column.
    fn setter_name(&self, column: &str) -> Ident {
        format_ident!("set_{}", column.to_case(Case::Snake))
    }

    /// Name of the `static` table metadata item.
    fn table_static_name(&self, table: &str) -> Ident {
        format_ident!("{}", table.to_case(Case::Snake).to_uppercase())
    }

    /// Name of the primary key type alias.
    fn id_type_name(&self, table: &str) -> Ident {
        format_ident!("{}Id", pascal(table))
    }

    /// Module path, relative to the output root, of the tables of `schema`.
    fn package_path(&self, database: &DatabaseDefinition, schema: &str) -> Vec<String> {
        let mut path = Vec::with_capacity(2);
        if database.has_multiple_schemas() {
            path.push(schema.to_case(Case::Snake));
        }
        path.push(self.package().to_owned());
        path
    }
}

/// Names immutable domain structs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainStrategy;

impl GeneratorStrategy for DomainStrategy {
    fn suffix(&self) -> &'static str {
        "Domain"
    }

    fn package(&self) -> &'static str {
        "domain"
    }
}

/// Names mutable test fixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestDomainStrategy;

impl GeneratorStrategy for TestDomainStrategy {
    fn suffix(&self) -> &'static str {
        "TestDomain"
    }

    fn package(&self) -> &'static str {
        "fixture"
    }
}

/// Build an identifier, escaping keywords and leading digits.
#[must_use]
pub fn ident(name: &str) -> Ident {
    if RESERVED.contains(&name) {
        format_ident!("{}_", name)
    } else if KEYWORDS.contains(&name) {
        Ident::new_raw(name, Span::call_site())
    } else if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format_ident!("_{}", name)
    } else {
        format_ident!("{}", name)
    }
}

fn pascal(name: &str) -> String {
    let pascal = name.to_case(Case::Pascal);
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("T{pascal}")
    } else {
        pascal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::SchemaDefinition;

    fn database(schemas: &[&str]) -> DatabaseDefinition {
        DatabaseDefinition {
            schemas: schemas
                .iter()
                .map(|name| SchemaDefinition {
                    name:   (*name).to_owned(),
                    tables: Vec::new()
                })
                .collect()
        }
    }

    #[test]
    fn domain_names() {
        let s = DomainStrategy;
        assert_eq!(s.struct_name("book_tag").to_string(), "BookTagDomain");
        assert_eq!(s.module_name("book_tag").to_string(), "book_tag");
        assert_eq!(s.member_name("createdAt").to_string(), "created_at");
        assert_eq!(s.setter_name("createdAt").to_string(), "set_created_at");
        assert_eq!(s.table_static_name("book_tag").to_string(), "BOOK_TAG");
        assert_eq!(s.id_type_name("book_tag").to_string(), "BookTagId");
    }

    #[test]
    fn test_domain_suffix() {
        assert_eq!(TestDomainStrategy.struct_name("book").to_string(), "BookTestDomain");
        assert_eq!(TestDomainStrategy.package(), "fixture");
    }

    #[test]
    fn schema_segment_only_with_several_schemas() {
        let s = DomainStrategy;
        assert_eq!(s.package_path(&database(&["public"]), "public"), ["domain"]);
        assert_eq!(
            s.package_path(&database(&["public", "audit"]), "audit"),
            ["audit", "domain"]
        );
    }

    #[test]
    fn keywords_become_raw() {
        assert_eq!(DomainStrategy.member_name("type").to_string(), "r#type");
        assert_eq!(ident("self").to_string(), "self_");
        assert_eq!(ident("1st").to_string(), "_1st");
    }

    #[test]
    fn getters_do_not_shadow_constructors() {
        assert_eq!(DomainStrategy.getter_name("new").to_string(), "get_new");
        assert_eq!(DomainStrategy.getter_name("title").to_string(), "title");
    }
}
