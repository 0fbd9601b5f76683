// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cardinality split for collection mutations.
//!
//! | Input | Execution | Result |
//! |-------|-----------|--------|
//! | `[]` | nothing | `0` |
//! | `[d]` | one statement on the pool | rows affected |
//! | `[d1, d2, ..]` | one statement per row, single transaction | sum of rows affected |

/// How a slice of domain objects is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality<'a, T> {
    /// Nothing to do.
    Empty,
    /// Exactly one element: a single statement.
    Single(&'a T),
    /// Two or more elements: a batch.
    Many(&'a [T])
}

impl<'a, T> Cardinality<'a, T> {
    /// Classify a slice.
    #[must_use]
    pub const fn of(items: &'a [T]) -> Self {
        match items {
            [] => Self::Empty,
            [single] => Self::Single(single),
            _ => Self::Many(items)
        }
    }
}

/// Sum per-row affected counts of a batch.
#[must_use]
pub fn total_affected(counts: &[u64]) -> u64 {
    counts.iter().sum()
}
