// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `WHERE` clause conditions.
//!
//! Conditions are plain data; [`Condition::push_to`] renders them into a
//! [`QueryBuilder`] with every value bound as a parameter.
//!
//! ```rust,ignore
//! use crood_core::field;
//!
//! let cond = field("title").like("Rust%").and(field("author_id").is_in([1, 2, 3]));
//! let books = repo.find_all_where(cond).await?;
//! ```
//!
//! # Rendering Rules
//!
//! | Condition | SQL |
//! |-----------|-----|
//! | `Eq(c, Null)` | `"c" IS NULL` |
//! | `Ne(c, Null)` | `"c" IS NOT NULL` |
//! | `In(c, [])` | `FALSE` |
//! | `And([])` | `TRUE` |
//! | `Or([])` | `FALSE` |

use sqlx::{Postgres, QueryBuilder};

use crate::{table::quote_ident, value::Value};

/// A boolean SQL expression over columns of one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Always true.
    True,
    Eq(String, Value),
    Ne(String, Value),
    Lt(String, Value),
    Le(String, Value),
    Gt(String, Value),
    Ge(String, Value),
    In(String, Vec<Value>),
    IsNull(String),
    IsNotNull(String),
    Like(String, String),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>)
}

impl Condition {
    /// Conjunction with another condition, flattening nested `AND`s.
    #[must_use]
    pub fn and(self, other: Condition) -> Self {
        match (self, other) {
            (Self::True, c) | (c, Self::True) => c,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), c) => {
                left.push(c);
                Self::And(left)
            }
            (c, Self::And(mut right)) => {
                right.insert(0, c);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right])
        }
    }

    /// Disjunction with another condition.
    #[must_use]
    pub fn or(self, other: Condition) -> Self {
        match (self, other) {
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), c) => {
                left.push(c);
                Self::Or(left)
            }
            (left, right) => Self::Or(vec![left, right])
        }
    }

    /// Negation.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Render into a statement.
    pub fn push_to(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Self::True => {
                qb.push("TRUE");
            }
            Self::Eq(col, Value::Null) => {
                qb.push(quote_ident(col)).push(" IS NULL");
            }
            Self::Ne(col, Value::Null) => {
                qb.push(quote_ident(col)).push(" IS NOT NULL");
            }
            Self::Eq(col, v) => push_comparison(qb, col, " = ", v),
            Self::Ne(col, v) => push_comparison(qb, col, " <> ", v),
            Self::Lt(col, v) => push_comparison(qb, col, " < ", v),
            Self::Le(col, v) => push_comparison(qb, col, " <= ", v),
            Self::Gt(col, v) => push_comparison(qb, col, " > ", v),
            Self::Ge(col, v) => push_comparison(qb, col, " >= ", v),
            Self::In(_, values) if values.is_empty() => {
                qb.push("FALSE");
            }
            Self::In(col, values) => {
                qb.push(quote_ident(col)).push(" IN (");
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        qb.push(", ");
                    }
                    v.clone().push_to(qb);
                }
                qb.push(")");
            }
            Self::IsNull(col) => {
                qb.push(quote_ident(col)).push(" IS NULL");
            }
            Self::IsNotNull(col) => {
                qb.push(quote_ident(col)).push(" IS NOT NULL");
            }
            Self::Like(col, pattern) => {
                qb.push(quote_ident(col)).push(" LIKE ").push_bind(pattern.clone());
            }
            Self::And(parts) => push_junction(qb, parts, " AND ", "TRUE"),
            Self::Or(parts) => push_junction(qb, parts, " OR ", "FALSE"),
            Self::Not(inner) => {
                qb.push("NOT (");
                inner.push_to(qb);
                qb.push(")");
            }
        }
    }
}

fn push_comparison(qb: &mut QueryBuilder<'static, Postgres>, col: &str, op: &str, v: &Value) {
    qb.push(quote_ident(col)).push(op);
    v.clone().push_to(qb);
}

fn push_junction(
    qb: &mut QueryBuilder<'static, Postgres>,
    parts: &[Condition],
    sep: &str,
    empty: &str
) {
    match parts {
        [] => {
            qb.push(empty);
        }
        [single] => single.push_to(qb),
        _ => {
            qb.push("(");
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    qb.push(sep);
                }
                part.push_to(qb);
            }
            qb.push(")");
        }
    }
}

/// Start a condition on the named column.
#[must_use]
pub fn field(name: impl Into<String>) -> Field {
    Field(name.into())
}

/// Column reference used to build conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field(String);

impl Field {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn eq(self, v: impl Into<Value>) -> Condition {
        Condition::Eq(self.0, v.into())
    }

    #[must_use]
    pub fn ne(self, v: impl Into<Value>) -> Condition {
        Condition::Ne(self.0, v.into())
    }

    #[must_use]
    pub fn lt(self, v: impl Into<Value>) -> Condition {
        Condition::Lt(self.0, v.into())
    }

    #[must_use]
    pub fn le(self, v: impl Into<Value>) -> Condition {
        Condition::Le(self.0, v.into())
    }

    #[must_use]
    pub fn gt(self, v: impl Into<Value>) -> Condition {
        Condition::Gt(self.0, v.into())
    }

    #[must_use]
    pub fn ge(self, v: impl Into<Value>) -> Condition {
        Condition::Ge(self.0, v.into())
    }

    #[must_use]
    pub fn is_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Condition {
        Condition::In(self.0, values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_null(self) -> Condition {
        Condition::IsNull(self.0)
    }

    #[must_use]
    pub fn is_not_null(self) -> Condition {
        Condition::IsNotNull(self.0)
    }

    #[must_use]
    pub fn like(self, pattern: impl Into<String>) -> Condition {
        Condition::Like(self.0, pattern.into())
    }
}
