// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Immutable domain struct emitter.
//!
//! For a table `public.book` with an auto-increment key, a version column
//! and a length-bounded title, the emitted module reads:
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
//! pub struct BookDomain {
//!     id: Option<i64>,
//!     title: String,
//!     version: Option<i32>
//! }
//!
//! pub static BOOK: ::crood::Table = ::crood::Table { .. };
//! pub type BookId = i64;
//!
//! impl BookDomain {
//!     pub fn new(id: Option<i64>, title: String, version: Option<i32>) -> Self;
//!     pub fn for_insert(title: String) -> Self;
//!     pub const fn id(&self) -> Option<i64>;
//!     pub fn title(&self) -> &str;
//! }
//!
//! impl ::crood::Domain for BookDomain { .. }
//! ```
//!
//! # `for_insert`
//!
//! | Table shape | Result |
//! |-------------|--------|
//! | single identity column | not emitted |
//! | two columns, second nullable | not emitted |
//! | single auto-increment key | key and lock columns omitted |
//! | any other key | lock columns omitted, not emitted if there are none |

use crood_core::SqlType;
use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;

use crate::{
    context::{ColumnContext, TableContext},
    strategy::{DomainStrategy, GeneratorStrategy},
    types
};

/// Emit the domain module of one table, `None` if the table has no key.
#[must_use]
pub fn generate(ctx: &TableContext<'_>) -> Option<TokenStream> {
    if ctx.table.primary_key_columns().is_empty() {
        tracing::warn!(
            schema = %ctx.schema.name,
            table = %ctx.table.name,
            "no primary key found, skipping domain generation"
        );
        return None;
    }

    let strategy = DomainStrategy;
    let name = strategy.struct_name(&ctx.table.name);
    let runtime = &ctx.runtime;
    let doc = format!(" Row of `{}.{}`.", ctx.schema.name, ctx.table.name);

    let derives = derives(ctx);
    let fields = ctx.columns.iter().map(|c| field(ctx, c));
    let table = table_static(ctx, &strategy);
    let id = id_alias(ctx, &strategy);
    let constructors = constructors(ctx);
    let getters = ctx
        .columns
        .iter()
        .filter(|c| !c.is_lock())
        .map(|c| accessor(c, &strategy.getter_name(c.name()), c.optional));
    let static_name = strategy.table_static_name(&ctx.table.name);
    let values = ctx.columns.iter().map(|c| {
        let member = &c.member;
        if types::is_copy(c.sql_type) {
            quote! { ::#runtime::Value::from(self.#member) }
        } else {
            quote! { ::#runtime::Value::from(self.#member.clone()) }
        }
    });

    Some(quote! {
        #[doc = #doc]
        #[derive(#(#derives),*)]
        pub struct #name {
            #(#fields),*
        }

        #table

        #id

        impl #name {
            #constructors

            #(#getters)*
        }

        impl ::#runtime::Domain for #name {
            fn table() -> &'static ::#runtime::Table {
                &#static_name
            }

            fn values(&self) -> Vec<::#runtime::Value> {
                vec![#(#values),*]
            }
        }
    })
}

/// Which columns `for_insert` leaves out, `None` if it is not emitted.
#[must_use]
pub fn insert_constructor_plan(ctx: &TableContext<'_>) -> Option<Vec<bool>> {
    let columns = &ctx.columns;
    let table = &ctx.table.name;

    if columns.len() == 1 && columns[0].def.identity {
        tracing::info!(%table, "only attribute is an identity key, skipping for_insert");
        return None;
    }
    if columns.len() == 2 && columns[1].def.nullable {
        tracing::info!(%table, "second attribute is nullable, skipping for_insert");
        return None;
    }

    let omitted: Vec<bool> = columns
        .iter()
        .map(|c| c.is_lock() || (ctx.auto_increment_key && c.key))
        .collect();
    if !omitted.contains(&true) {
        tracing::debug!(%table, "nothing to omit, skipping for_insert");
        return None;
    }
    if ctx.auto_increment_key {
        tracing::info!(%table, "generating for_insert without primary key");
    }
    Some(omitted)
}

fn derives(ctx: &TableContext<'_>) -> Vec<TokenStream> {
    let mut derives = vec![
        quote! { Debug },
        quote! { Clone },
        quote! { PartialEq },
        quote! { sqlx::FromRow },
        quote! { serde::Serialize },
        quote! { serde::Deserialize }
    ];
    if ctx.config.annotations.enable_validation {
        derives.push(quote! { validator::Validate });
    }
    if ctx.config.frameworks.openapi {
        derives.push(quote! { utoipa::ToSchema });
    }
    derives
}

fn field(ctx: &TableContext<'_>, column: &ColumnContext<'_>) -> TokenStream {
    let member = &column.member;
    let ty = column.field_type();
    let rename = column.is_renamed().then(|| {
        let name = column.name();
        quote! { #[sqlx(rename = #name)] }
    });
    let transient = (ctx.config.annotations.enable_transient
        && (column.def.identity || column.is_lock()))
    .then(|| quote! { #[serde(skip_serializing)] });
    let validate = validation(ctx, column);
    quote! {
        #rename
        #transient
        #validate
        #member: #ty
    }
}

/// `#[validate(length(max = N))]` for bounded text and binary columns.
pub(crate) fn validation(ctx: &TableContext<'_>, column: &ColumnContext<'_>) -> Option<TokenStream> {
    let length = column.def.length;
    (ctx.config.annotations.enable_validation && types::has_length(column.sql_type) && length > 0)
        .then(|| {
            let max = Literal::u32_unsuffixed(length);
            quote! { #[validate(length(max = #max))] }
        })
}

fn table_static(ctx: &TableContext<'_>, strategy: &DomainStrategy) -> TokenStream {
    let runtime = &ctx.runtime;
    let name = strategy.table_static_name(&ctx.table.name);
    let doc = format!(" Metadata of `{}.{}`.", ctx.schema.name, ctx.table.name);
    let schema = &ctx.schema.name;
    let table = &ctx.table.name;
    let columns = ctx.columns.iter().map(|c| {
        let column = c.name();
        let ty = types::variant_path(runtime, c.sql_type);
        let mut tokens = quote! { ::#runtime::Column::new(#column, #ty) };
        if c.def.nullable {
            tokens = quote! { #tokens.nullable() };
        }
        if c.def.identity {
            tokens = quote! { #tokens.identity() };
        }
        if c.def.defaulted {
            tokens = quote! { #tokens.defaulted() };
        }
        if types::has_length(c.sql_type) && c.def.length > 0 {
            let length = Literal::u32_unsuffixed(c.def.length);
            tokens = quote! { #tokens.length(#length) };
        }
        tokens
    });
    let keys = ctx.table.primary_key_columns();
    let version = optional_str(ctx.version_field());
    let timestamp = optional_str(ctx.timestamp_field());

    quote! {
        #[doc = #doc]
        pub static #name: ::#runtime::Table = ::#runtime::Table {
            schema: Some(#schema),
            name: #table,
            columns: &[#(#columns),*],
            primary_key: &[#(#keys),*],
            version_field: #version,
            timestamp_field: #timestamp
        };
    }
}

fn id_alias(ctx: &TableContext<'_>, strategy: &DomainStrategy) -> TokenStream {
    let runtime = &ctx.runtime;
    let name = strategy.id_type_name(&ctx.table.name);
    let keys = ctx.key_columns();
    let ty = match keys.as_slice() {
        [single] if has_scalar_identifier(single) => single.base_type.clone(),
        [_] => quote! { ::#runtime::Value },
        parts if parts.len() <= 4 => {
            let parts = parts.iter().map(|c| &c.base_type);
            quote! { (#(#parts),*) }
        }
        _ => quote! { Vec<::#runtime::Value> }
    };
    quote! {
        #[doc = " Primary key of the table."]
        pub type #name = #ty;
    }
}

fn has_scalar_identifier(column: &ColumnContext<'_>) -> bool {
    matches!(
        column.sql_type,
        SqlType::SmallInt
            | SqlType::Integer
            | SqlType::BigInt
            | SqlType::Char
            | SqlType::Varchar
            | SqlType::Text
            | SqlType::Uuid
    )
}

fn constructors(ctx: &TableContext<'_>) -> TokenStream {
    let lint = many_arguments(ctx.columns.len());
    let params = ctx.columns.iter().map(|c| {
        let member = &c.member;
        let ty = c.field_type();
        quote! { #member: #ty }
    });
    let members = ctx.columns.iter().map(|c| &c.member);
    let primary = quote! {
        #[doc = " Create a domain object from every column value."]
        #lint
        #[must_use]
        pub fn new(#(#params),*) -> Self {
            Self { #(#members),* }
        }
    };

    let Some(omitted) = insert_constructor_plan(ctx) else {
        return primary;
    };
    let kept: Vec<_> = ctx
        .columns
        .iter()
        .zip(&omitted)
        .filter(|(_, omit)| !**omit)
        .map(|(c, _)| c)
        .collect();
    let lint = many_arguments(kept.len());
    let params = kept.iter().map(|c| {
        let member = &c.member;
        let ty = c.field_type();
        quote! { #member: #ty }
    });
    let inits = ctx.columns.iter().zip(&omitted).map(|(c, omit)| {
        let member = &c.member;
        if *omit {
            quote! { #member: None }
        } else {
            quote! { #member }
        }
    });

    quote! {
        #primary

        #[doc = " Create a domain object to insert, leaving server-assigned columns empty."]
        #lint
        #[must_use]
        pub fn for_insert(#(#params),*) -> Self {
            Self { #(#inits),* }
        }
    }
}

fn many_arguments(count: usize) -> Option<TokenStream> {
    (count > 7).then(|| quote! { #[allow(clippy::too_many_arguments)] })
}

/// Read accessor handing out copies for `Copy` types and borrows otherwise.
pub(crate) fn accessor(column: &ColumnContext<'_>, name: &Ident, optional: bool) -> TokenStream {
    let member = &column.member;
    let base = &column.base_type;
    let copy = types::is_copy(column.sql_type);
    let text = column.sql_type.is_character();
    let (ret, body) = match (copy, text, optional) {
        (true, _, false) => (quote! { #base }, quote! { self.#member }),
        (true, _, true) => (quote! { Option<#base> }, quote! { self.#member }),
        (false, true, false) => (quote! { &str }, quote! { &self.#member }),
        (false, true, true) => (quote! { Option<&str> }, quote! { self.#member.as_deref() }),
        (false, false, false) => (quote! { &#base }, quote! { &self.#member }),
        (false, false, true) => (quote! { Option<&#base> }, quote! { self.#member.as_ref() })
    };
    let constness = copy.then(|| quote! { const });
    quote! {
        #[must_use]
        pub #constness fn #name(&self) -> #ret {
            #body
        }
    }
}

fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { Some(#value) },
        None => quote! { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GeneratorConfig,
        context::Matchers,
        meta::{ColumnDefinition, DatabaseDefinition}
    };

    const LIBRARY: &str = r#"{
        "schemas": [{
            "name": "public",
            "tables": [
                {
                    "name": "book",
                    "columns": [
                        { "name": "id", "type": "bigserial", "identity": true },
                        { "name": "title", "type": "varchar", "length": 255 },
                        { "name": "authorId", "type": "integer", "nullable": true },
                        { "name": "version", "type": "integer" }
                    ],
                    "primaryKey": { "columns": ["id"] }
                },
                {
                    "name": "book_tag",
                    "columns": [
                        { "name": "book_id", "type": "bigint" },
                        { "name": "tag", "type": "text" },
                        { "name": "modified_at", "type": "timestamptz" }
                    ],
                    "primaryKey": { "columns": ["book_id", "tag"] }
                },
                {
                    "name": "counter",
                    "columns": [{ "name": "id", "type": "serial", "identity": true }],
                    "primaryKey": { "columns": ["id"] }
                },
                {
                    "name": "note",
                    "columns": [
                        { "name": "id", "type": "integer" },
                        { "name": "body", "type": "text", "nullable": true }
                    ],
                    "primaryKey": { "columns": ["id"] }
                },
                {
                    "name": "audit_line",
                    "columns": [{ "name": "line", "type": "text" }]
                }
            ]
        }]
    }"#;

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            record_version_fields: vec!["version".to_owned()],
            record_timestamp_fields: vec!["modified_at".to_owned()],
            ..GeneratorConfig::default()
        }
    }

    fn with_table<R>(
        config: &GeneratorConfig,
        table: &str,
        f: impl FnOnce(&TableContext<'_>) -> R
    ) -> R {
        let db = DatabaseDefinition::from_json(LIBRARY).unwrap();
        let schema = &db.schemas[0];
        let table = schema.tables.iter().find(|t| t.name == table).unwrap();
        let matchers = Matchers::from_config(config).unwrap();
        let ctx = TableContext::new(&db, schema, table, config, &DomainStrategy, &matchers).unwrap();
        f(&ctx)
    }

    fn render(config: &GeneratorConfig, table: &str) -> String {
        with_table(config, table, |ctx| {
            let tokens = generate(ctx).unwrap();
            prettyplease::unparse(&syn::parse2(tokens).unwrap())
        })
    }

    fn compact(code: &str) -> String {
        code.split_whitespace()
            .collect::<String>()
            .replace(",)", ")")
            .replace(",]", "]")
            .replace(",}", "}")
    }

    #[test]
    fn table_without_key_is_skipped() {
        with_table(&config(), "audit_line", |ctx| assert!(generate(ctx).is_none()));
    }

    #[test]
    fn auto_increment_key_is_left_out_of_for_insert() {
        let code = compact(&render(&config(), "book"));
        assert!(code.contains("pubstructBookDomain"));
        assert!(code.contains(
            "pubfnnew(id:Option<i64>,title:String,author_id:Option<i32>,version:Option<i32>)->Self"
        ));
        assert!(code.contains("pubfnfor_insert(title:String,author_id:Option<i32>)->Self"));
        assert!(code.contains("id:None"));
        assert!(code.contains("version:None"));
    }

    #[test]
    fn lock_columns_have_no_getter() {
        let code = compact(&render(&config(), "book"));
        assert!(code.contains("pubconstfnid(&self)->Option<i64>"));
        assert!(code.contains("pubfntitle(&self)->&str"));
        assert!(code.contains("pubconstfnauthor_id(&self)->Option<i32>"));
        assert!(!code.contains("fnversion(&self)"));
    }

    #[test]
    fn renamed_columns_keep_database_name() {
        let code = compact(&render(&config(), "book"));
        assert!(code.contains("#[sqlx(rename=\"authorId\")]author_id:Option<i32>"));
        assert!(code.contains("::crood::Column::new(\"authorId\",::crood::SqlType::Integer).nullable()"));
    }

    #[test]
    fn table_static_describes_table() {
        let code = compact(&render(&config(), "book"));
        assert!(code.contains("pubstaticBOOK:::crood::Table=::crood::Table{"));
        assert!(code.contains("::crood::Column::new(\"id\",::crood::SqlType::BigInt).identity()"));
        assert!(code.contains(".length(255)"));
        assert!(code.contains("primary_key:&[\"id\"]"));
        assert!(code.contains("version_field:Some(\"version\")"));
        assert!(code.contains("timestamp_field:None"));
        assert!(code.contains("pubtypeBookId=i64;"));
        assert!(code.contains("impl::crood::DomainforBookDomain"));
    }

    #[test]
    fn composite_key_omits_lock_columns_only() {
        let code = compact(&render(&config(), "book_tag"));
        assert!(code.contains("pubtypeBookTagId=(i64,String);"));
        assert!(code.contains("pubfnfor_insert(book_id:i64,tag:String)->Self"));
        assert!(code.contains("modified_at:None"));
    }

    #[test]
    fn secondary_constructor_skip_rules() {
        let config = config();
        with_table(&config, "counter", |ctx| assert!(insert_constructor_plan(ctx).is_none()));
        with_table(&config, "note", |ctx| assert!(insert_constructor_plan(ctx).is_none()));
        with_table(&GeneratorConfig::default(), "book_tag", |ctx| {
            assert!(insert_constructor_plan(ctx).is_none());
        });
        with_table(&config, "book", |ctx| {
            assert_eq!(insert_constructor_plan(ctx), Some(vec![true, false, false, true]));
        });
    }

    #[test]
    fn annotations_follow_config() {
        let mut config = config();
        config.annotations.enable_validation = true;
        config.annotations.enable_transient = true;
        config.frameworks.openapi = true;
        let code = compact(&render(&config, "book"));
        assert!(code.contains("validator::Validate"));
        assert!(code.contains("utoipa::ToSchema"));
        assert!(code.contains("#[validate(length(max=255))]title:String"));
        assert!(code.contains("#[serde(skip_serializing)]id:Option<i64>"));
        assert!(code.contains("#[serde(skip_serializing)]version:Option<i32>"));
    }

    #[test]
    fn annotations_off_by_default() {
        let code = render(&config(), "book");
        assert!(!code.contains("validate"));
        assert!(!code.contains("skip_serializing"));
        assert!(!code.contains("ToSchema"));
    }

    #[test]
    fn values_follow_column_order() {
        let code = compact(&render(&config(), "book"));
        assert!(code.contains(
            "vec![::crood::Value::from(self.id),::crood::Value::from(self.title.clone()),::crood::Value::from(self.author_id),::crood::Value::from(self.version)]"
        ));
    }

    #[test]
    fn keyword_column_is_raw_without_rename() {
        let column = ColumnDefinition {
            name: "type".to_owned(),
            data_type: "text".to_owned(),
            ..ColumnDefinition::default()
        };
        let mut db = DatabaseDefinition::from_json(LIBRARY).unwrap();
        db.schemas[0].tables[3].columns[1] = column;
        let config = config();
        let schema = &db.schemas[0];
        let matchers = Matchers::from_config(&config).unwrap();
        let ctx =
            TableContext::new(&db, schema, &schema.tables[3], &config, &DomainStrategy, &matchers)
                .unwrap();
        let code = compact(&prettyplease::unparse(&syn::parse2(generate(&ctx).unwrap()).unwrap()));
        assert!(code.contains("r#type:String"));
        assert!(!code.contains("sqlx(rename"));
    }
}
