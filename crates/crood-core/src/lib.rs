// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core runtime for crood.
//!
//! This crate holds everything generated domain code links against, and
//! the generic repository that executes CRUD statements for it through
//! `sqlx`.
//!
//! # Overview
//!
//! - [`Domain`] - Contract implemented by generated domain structs
//! - [`Table`], [`Column`] - Static table metadata
//! - [`Identifier`], [`primary_key_condition`] - Primary key resolution
//! - [`Condition`], [`field`] - `WHERE` clause building
//! - [`Record`] - Mutable staging row for inserts, updates and deletes
//! - [`CroodRepository`] - Generic CRUD with optimistic locking
//! - [`prelude`] - Convenient re-exports
//!
//! # Usage
//!
//! ```rust,ignore
//! use crood_core::prelude::*;
//!
//! let books = CroodRepository::<BookDomain>::new(pool);
//! let book = books.find_by_id(&42_i64).await?;
//! books.update(&book).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod condition;
pub mod domain;
pub mod error;
pub mod id;
pub mod prelude;
pub mod record;
pub mod repository;
pub mod statement;
pub mod table;
pub mod value;

pub use condition::{Condition, Field, field};
pub use domain::Domain;
pub use error::CroodError;
pub use id::{Identifier, primary_key_condition};
pub use record::Record;
pub use repository::{CroodRepository, RepositorySettings};
pub use table::{Column, Table};
pub use value::{SqlType, Value};

/// Base repository trait.
///
/// [`CroodRepository`] implements it; hand written repositories for the
/// same domains can too, so services can be generic over where rows come
/// from.
///
/// # Associated Types
///
/// - `Error` - Error type for repository operations
/// - `Pool` - Underlying database pool type
pub trait Repository: Send + Sync {
    /// Error type for repository operations.
    type Error: std::error::Error + Send + Sync;

    /// Underlying database pool type.
    type Pool;

    /// Get reference to the underlying database pool.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let pool = repo.pool();
    /// let mut tx = pool.begin().await?;
    /// // Custom operations...
    /// tx.commit().await?;
    /// ```
    fn pool(&self) -> &Self::Pool;
}
