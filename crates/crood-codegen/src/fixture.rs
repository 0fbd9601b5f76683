// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mutable test fixture emitter.
//!
//! A `<Table>TestDomain` starts out with every column empty and is filled
//! through setters. Every single-column foreign key gets a nested fixture
//! of the referenced table instead of a setter for the column; the nested
//! setter also copies the referenced key:
//!
//! ```rust,ignore
//! let mut author = AuthorTestDomain::new();
//! author.set_id(Some(7)).set_name(Some("Le Guin".into()));
//!
//! let mut book = BookTestDomain::new();
//! book.set_title(Some("The Dispossessed".into())).set_author_domain(Some(author));
//! assert_eq!(book.author_id(), Some(7));
//!
//! repo.create(&book.to_domain()).await?;
//! ```

use std::collections::HashSet;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::{
    context::{ColumnContext, TableContext},
    domain::{accessor, validation},
    meta::ColumnDefinition,
    strategy::{DomainStrategy, GeneratorStrategy, TestDomainStrategy},
    types
};

/// Emit the fixture module of one table, `None` if the table has no key.
#[must_use]
pub fn generate(ctx: &TableContext<'_>) -> Option<TokenStream> {
    if ctx.table.primary_key_columns().is_empty() {
        return None;
    }

    let strategy = TestDomainStrategy;
    let name = strategy.struct_name(&ctx.table.name);
    let domain = DomainStrategy.struct_name(&ctx.table.name);
    let root = ctx.to_root(&strategy);
    let domain_path = package_path(ctx, &DomainStrategy, &ctx.schema.name);
    let doc = format!(" Test fixture for `{}.{}`.", ctx.schema.name, ctx.table.name);

    let mut derives = vec![
        quote! { Debug },
        quote! { Clone },
        quote! { Default },
        quote! { PartialEq },
        quote! { serde::Serialize },
        quote! { serde::Deserialize }
    ];
    if ctx.config.annotations.enable_validation {
        derives.push(quote! { validator::Validate });
    }
    let fields = ctx.columns.iter().map(|c| {
        let member = &c.member;
        let base = &c.base_type;
        let validate = validation(ctx, c);
        quote! {
            #validate
            #member: Option<#base>
        }
    });
    let references = references(ctx, &root);
    let reference_fields = references.iter().map(Reference::field);
    let getters = ctx
        .columns
        .iter()
        .map(|c| accessor(c, &strategy.getter_name(c.name()), true));
    let setters = ctx
        .columns
        .iter()
        .filter(|c| !references.iter().any(|r| r.column == c.name()))
        .map(|c| setter(c, &strategy.setter_name(c.name())));
    let reference_methods = references.iter().map(Reference::methods);
    let arguments = ctx.columns.iter().map(to_domain_argument);

    Some(quote! {
        #[doc = #doc]
        #[derive(#(#derives),*)]
        pub struct #name {
            #(#fields,)*
            #(#reference_fields),*
        }

        impl #name {
            #[doc = " Fixture with every column empty."]
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            #(#getters)*

            #(#setters)*

            #(#reference_methods)*

            #[doc = " Immutable domain object, empty required columns set to their default."]
            #[must_use]
            pub fn to_domain(&self) -> #root::#domain_path::#domain {
                #root::#domain_path::#domain::new(#(#arguments),*)
            }
        }
    })
}

struct Reference {
    column:  String,
    member:  Ident,
    getter:  Ident,
    setter:  Ident,
    ty:      TokenStream,
    copy_to: Option<(Ident, TokenStream)>
}

impl Reference {
    fn field(&self) -> TokenStream {
        let member = &self.member;
        let ty = &self.ty;
        quote! {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            #member: Option<Box<#ty>>
        }
    }

    fn methods(&self) -> TokenStream {
        let Self {
            column: _,
            member,
            getter,
            setter,
            ty,
            copy_to
        } = self;
        let copy = copy_to.as_ref().map(|(column, value)| {
            quote! { self.#column = #member.as_ref().and_then(|d| #value); }
        });
        quote! {
            #[must_use]
            pub fn #getter(&self) -> Option<&#ty> {
                self.#member.as_deref()
            }

            pub fn #setter(&mut self, #member: Option<#ty>) -> &mut Self {
                #copy
                self.#member = #member.map(Box::new);
                self
            }
        }
    }
}

fn references(ctx: &TableContext<'_>, root: &TokenStream) -> Vec<Reference> {
    let strategy = TestDomainStrategy;
    let mut used: HashSet<String> = ctx.columns.iter().map(|c| c.member.to_string()).collect();
    let mut references = Vec::new();

    for fk in &ctx.table.foreign_keys {
        let ([column], [referenced]) = (fk.columns.as_slice(), fk.referenced_columns.as_slice())
        else {
            tracing::warn!(
                table = %ctx.table.name,
                columns = ?fk.columns,
                "only single-column foreign keys are wired in fixtures, skipping"
            );
            continue;
        };
        let schema = fk.target_schema(&ctx.schema.name);
        let Some(target) = ctx.database.find_table(schema, &fk.referenced_table) else {
            tracing::warn!(
                table = %ctx.table.name,
                referenced = %fk.referenced_table,
                "referenced table is not generated, skipping"
            );
            continue;
        };
        if target.primary_key_columns().is_empty() {
            continue;
        }

        let mut base = fk.referenced_table.clone();
        if !used.insert(format!("{base}_domain")) {
            base.clone_from(column);
            if !used.insert(format!("{base}_domain")) {
                continue;
            }
        }
        let member = strategy.member_name(&base).to_string();
        let member = format_ident!("{}_domain", member.trim_start_matches("r#"));
        let package = package_path(ctx, &strategy, schema);
        let struct_name = strategy.struct_name(&fk.referenced_table);

        references.push(Reference {
            column: column.clone(),
            getter: member.clone(),
            setter: format_ident!("set_{}", member),
            member,
            ty: quote! { #root::#package::#struct_name },
            copy_to: target
                .column(referenced)
                .and_then(|referenced| key_copy(ctx, column, referenced))
        });
    }
    references
}

fn key_copy(
    ctx: &TableContext<'_>,
    column: &str,
    referenced: &ColumnDefinition
) -> Option<(Ident, TokenStream)> {
    let column = ctx.column(column)?;
    let referenced_type = types::resolve(&referenced.data_type, &referenced.name);
    if referenced_type != column.sql_type {
        tracing::warn!(
            table = %ctx.table.name,
            column = %column.name(),
            "foreign key and referenced column types differ, key is not copied"
        );
        return None;
    }
    let getter = TestDomainStrategy.getter_name(&referenced.name);
    let value = if types::is_copy(column.sql_type) {
        quote! { d.#getter() }
    } else {
        quote! { d.#getter().map(ToOwned::to_owned) }
    };
    Some((column.member.clone(), value))
}

fn setter(column: &ColumnContext<'_>, name: &Ident) -> TokenStream {
    let member = &column.member;
    let base = &column.base_type;
    quote! {
        pub fn #name(&mut self, #member: Option<#base>) -> &mut Self {
            self.#member = #member;
            self
        }
    }
}

fn to_domain_argument(column: &ColumnContext<'_>) -> TokenStream {
    let member = &column.member;
    let value = if types::is_copy(column.sql_type) {
        quote! { self.#member }
    } else {
        quote! { self.#member.clone() }
    };
    if column.optional {
        value
    } else {
        quote! { #value.unwrap_or_default() }
    }
}

fn package_path(ctx: &TableContext<'_>, strategy: &dyn GeneratorStrategy, schema: &str) -> TokenStream {
    let segments = strategy
        .package_path(ctx.database, schema)
        .into_iter()
        .map(|s| crate::strategy::ident(&s));
    quote! { #(#segments)::* }
}
