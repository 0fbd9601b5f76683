// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # crood
//!
//! Typed domain structs generated from schema metadata, and a generic CRUD
//! repository with optimistic locking on top of `sqlx`.
//!
//! ## Quick Start
//!
//! Generate the domain module tree once per schema change:
//!
//! ```text
//! crood-gen --schema schema.json --out src/db --fixtures
//! ```
//!
//! Then use the generated structs with the repository:
//!
//! ```rust,ignore
//! use crood::prelude::*;
//!
//! mod db;
//! use db::domain::{BookDomain, BookId};
//!
//! let books = CroodRepository::<BookDomain>::new(pool);
//!
//! books.create(&BookDomain::for_insert("Solaris".into(), None)).await?;
//! let book = books.find_one_where(field("title").eq("Solaris")).await?;
//! books.update(&book).await?;
//! books.delete_by_id(&BookId::from(1_i64)).await?;
//! ```
//!
//! ## Crates
//!
//! | Crate | Role |
//! |-------|------|
//! | `crood-core` | Runtime types and [`CroodRepository`], re-exported here |
//! | `crood-codegen` | Generator library and the `crood-gen` binary, re-exported as `codegen` with the `codegen` feature |

pub use crood_core::*;

/// Domain code generator.
#[cfg(feature = "codegen")]
pub use crood_codegen as codegen;
