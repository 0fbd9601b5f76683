// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Domain code generator for crood.
//!
//! Reads schema metadata and writes one immutable `<Table>Domain` struct
//! per table, ready to be used with `crood::CroodRepository`, plus
//! optional mutable `<Table>TestDomain` fixtures.
//!
//! # Pipeline
//!
//! ```text
//! schema.json ──► DatabaseDefinition ──► TableContext ──► domain / fixture
//!                   (meta)                (context)        (quote tokens)
//!                                                               │
//!                         out/**/*.rs ◄── prettyplease ◄── syn::File
//! ```
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`meta`] | Schema metadata input |
//! | [`config`] | Generator options |
//! | [`types`] | SQL type names to Rust types |
//! | [`matcher`] | Version and timestamp column expressions |
//! | [`strategy`] | Naming of items and modules |
//! | [`context`] | Per-table resolution |
//! | [`domain`] | Domain struct emitter |
//! | [`fixture`] | Test fixture emitter |
//! | [`generator`] | File assembly and output |
//!
//! # Usage
//!
//! ```rust,ignore
//! use crood_codegen::{DatabaseDefinition, Generator, GeneratorConfig};
//!
//! let database = DatabaseDefinition::from_path("schema.json")?;
//! let config = GeneratorConfig::from_home()?;
//! Generator::new(config).generate_into(&database, "src/db")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod matcher;
pub mod meta;
pub mod strategy;
pub mod types;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::{GeneratedFile, Generator, write_all};
pub use matcher::FieldMatcher;
pub use meta::{
    ColumnDefinition, DatabaseDefinition, ForeignKeyDefinition, KeyDefinition, SchemaDefinition,
    TableDefinition
};
pub use strategy::{DomainStrategy, GeneratorStrategy, TestDomainStrategy};
