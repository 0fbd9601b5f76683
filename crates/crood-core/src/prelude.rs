// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crood_core::prelude::*;
//! ```

pub use crate::{
    Column, Condition, CroodError, CroodRepository, Domain, Identifier, Repository,
    RepositorySettings, SqlType, Table, Value, field
};
