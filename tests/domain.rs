// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generated domains against the runtime, without a database.

mod library;

use crood::{
    Condition, CroodError, Domain, Record, SqlType, Value, field, primary_key_condition, statement
};
use library::{
    domain::{AUTHOR, AuthorDomain, BOOK, BOOK_TAG, BookDomain, BookId, BookTagDomain, BookTagId},
    fixture::{AuthorTestDomain, BookTagTestDomain, BookTestDomain}
};
use validator::Validate;

fn dune() -> BookDomain {
    BookDomain::new(
        Some(7),
        "Dune".into(),
        3,
        chrono::NaiveDate::from_ymd_opt(1965, 8, 1),
        Some(2),
        None
    )
}

#[test]
fn values_follow_table_columns() {
    let book = dune();
    let values = book.values();
    assert_eq!(values.len(), BookDomain::table().columns.len());
    assert_eq!(values[0], Value::BigInt(7));
    assert_eq!(values[1], Value::from("Dune"));
    assert_eq!(values[2], Value::Int(3));
    assert_eq!(values[5], Value::Null);
}

#[test]
fn table_metadata_matches_schema() {
    assert_eq!(BOOK.qualified_name(), "\"public\".\"book\"");
    assert_eq!(BOOK.lock_column().map(|c| c.name), Some("version"));
    assert_eq!(BOOK.timestamp_column().map(|c| c.sql_type), Some(SqlType::TimestampTz));
    assert_eq!(AUTHOR.lock_column().map(|c| c.name), Some("version"));
    assert!(BOOK_TAG.lock_column().is_none());
    assert!(BOOK.column("id").is_some_and(|c| c.identity));
}

#[test]
fn for_insert_leaves_server_columns_empty() {
    let book = BookDomain::for_insert("Dune".into(), 3, None);
    assert_eq!(book.id(), None);
    let sql = statement::insert(&Record::from_domain(&book).unwrap()).sql().to_owned();
    assert_eq!(
        sql,
        "INSERT INTO \"public\".\"book\" (\"title\", \"author_id\", \"published\", \"version\", \"modified_at\") \
         VALUES ($1, $2, NULL, 1, CURRENT_TIMESTAMP)"
    );
}

#[test]
fn update_guards_on_version() {
    let record = Record::for_update_or_delete(&dune()).unwrap();
    let sql = statement::update(&record, true).unwrap().unwrap().sql().to_owned();
    assert!(sql.starts_with("UPDATE \"public\".\"book\" SET \"title\" = $1"));
    assert!(sql.contains("\"version\" = COALESCE(\"version\", 0) + 1"));
    assert!(sql.contains("\"modified_at\" = CURRENT_TIMESTAMP"));
    assert!(sql.ends_with("WHERE (\"id\" = $4 AND \"version\" = $5)"));
}

#[test]
fn update_without_locking_has_key_only() {
    let record = Record::for_update_or_delete(&dune()).unwrap();
    let sql = statement::update(&record, false).unwrap().unwrap().sql().to_owned();
    assert!(sql.ends_with("WHERE \"id\" = $4"));
}

#[test]
fn delete_of_composite_key() {
    let tag = BookTagDomain::new(7, "classic".into());
    let record = Record::for_update_or_delete(&tag).unwrap();
    let sql = statement::delete(&record, true).unwrap().sql().to_owned();
    assert_eq!(
        sql,
        "DELETE FROM \"public\".\"book_tag\" WHERE (\"book_id\" = $1 AND \"tag\" = $2)"
    );
}

#[test]
fn generated_id_types_resolve() {
    let id: BookId = 7;
    assert_eq!(
        primary_key_condition(&BOOK, &id).unwrap(),
        Condition::Eq("id".into(), Value::BigInt(7))
    );

    let id: BookTagId = (7, "classic".into());
    assert!(matches!(primary_key_condition(&BOOK_TAG, &id).unwrap(), Condition::And(parts) if parts.len() == 2));

    let err = primary_key_condition(&BOOK_TAG, &7_i64).unwrap_err();
    assert!(matches!(err, CroodError::KeyArity { expected: 2, actual: 1, .. }));
}

#[test]
fn conditions_render_against_generated_table() {
    let cond = field("title").like("Du%").and(field("published").is_not_null());
    let sql = statement::select(&BOOK, &cond).sql().to_owned();
    assert!(sql.starts_with("SELECT \"id\", \"title\", \"author_id\""));
    assert!(sql.ends_with("WHERE (\"title\" LIKE $1 AND \"published\" IS NOT NULL)"));
}

#[test]
fn length_validation() {
    assert!(dune().validate().is_ok());
    let long = BookDomain::for_insert("x".repeat(256), 3, None);
    assert!(long.validate().is_err());
}

#[test]
fn lock_and_identity_fields_are_not_serialized() {
    let json = serde_json::to_value(dune()).unwrap();
    assert!(json.get("id").is_none());
    assert!(json.get("version").is_none());
    assert!(json.get("modified_at").is_none());
    assert_eq!(json["title"], "Dune");
    assert_eq!(json["author_id"], 3);
}

#[test]
fn fixtures_wire_foreign_keys() {
    let mut author = AuthorTestDomain::new();
    author.set_id(Some(3)).set_name(Some("Herbert".into()));

    let mut book = BookTestDomain::new();
    book.set_id(Some(7))
        .set_title(Some("Dune".into()))
        .set_author_domain(Some(author.clone()));
    assert_eq!(book.author_id(), Some(3));
    assert_eq!(book.author_domain(), Some(&author));

    let domain = book.to_domain();
    assert_eq!(domain.author_id(), 3);
    assert_eq!(domain.title(), "Dune");

    let mut tag = BookTagTestDomain::new();
    tag.set_tag(Some("classic".into())).set_book_domain(Some(book));
    assert_eq!(tag.to_domain(), BookTagDomain::new(7, "classic".into()));
}

#[test]
fn empty_fixture_fills_defaults() {
    let author = AuthorTestDomain::new().to_domain();
    assert_eq!(author, AuthorDomain::new(None, String::new(), None));
}
