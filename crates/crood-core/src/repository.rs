// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generic CRUD repository.
//!
//! [`CroodRepository`] works for any [`Domain`]: table metadata comes from
//! [`Domain::table`], row values from [`Domain::values`], and reads decode
//! through the domain's `sqlx::FromRow` implementation.
//!
//! # Operations
//!
//! | Group | Methods |
//! |-------|---------|
//! | Scalar reads | `fetch_count_where`, `fetch_one`, `fetch_optional`, `fetch_all`, `fetch_*_where` |
//! | Domain reads | `find_all`, `find_all_where`, `find_one_where`, `find_optional_where`, `find_by_id`, `find_optional_by_id` |
//! | Existence | `exists_by_id`, `exists_where` |
//! | Mutations | `create`, `create_all`, `update`, `update_all`, `delete`, `delete_all`, `delete_by_id`, `delete_where`, `truncate` |
//!
//! # Optimistic Locking
//!
//! With [`RepositorySettings::optimistic_locking`] enabled (the default),
//! `update` and `delete` compare the table's lock column against the value
//! staged in the domain. A statement that then affects no row fails with
//! [`CroodError::StaleRecord`]; inside a batch the whole transaction is
//! rolled back.
//!
//! # Example
//!
//! ```rust,ignore
//! let books = CroodRepository::<BookDomain>::new(pool.clone());
//!
//! books.create(&BookDomain::for_insert("Dune".into(), Some(4))).await?;
//! let dune = books.find_one_where(field("title").eq("Dune")).await?;
//! books.update(&dune.with_title("Dune Messiah")).await?;
//! ```

use std::marker::PhantomData;

use sqlx::{Executor, FromRow, PgPool, Postgres, postgres::PgRow};

use crate::{
    Repository,
    batch::{Cardinality, total_affected},
    condition::Condition,
    domain::Domain,
    error::CroodError,
    id::{Identifier, primary_key_condition},
    record::Record,
    statement::{self, Statement},
    table::Table,
    value::Value
};

/// Repository behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositorySettings {
    /// Guard updates and deletes with the table's lock column.
    pub optimistic_locking: bool
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            optimistic_locking: true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Update,
    Delete
}

/// CRUD operations for one domain type over a PostgreSQL pool.
pub struct CroodRepository<D> {
    pool:     PgPool,
    settings: RepositorySettings,
    _domain:  PhantomData<fn() -> D>
}

impl<D> Clone for CroodRepository<D> {
    fn clone(&self) -> Self {
        Self {
            pool:     self.pool.clone(),
            settings: self.settings,
            _domain:  PhantomData
        }
    }
}

impl<D: Domain> Repository for CroodRepository<D> {
    type Error = CroodError;
    type Pool = PgPool;

    fn pool(&self) -> &Self::Pool {
        &self.pool
    }
}

impl<D: Domain> CroodRepository<D> {
    /// Repository with default settings (optimistic locking on).
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_settings(pool, RepositorySettings::default())
    }

    /// Repository with explicit settings.
    #[must_use]
    pub fn with_settings(pool: PgPool, settings: RepositorySettings) -> Self {
        Self {
            pool,
            settings,
            _domain: PhantomData
        }
    }

    /// Metadata of the domain's table.
    #[must_use]
    pub fn table(&self) -> &'static Table {
        D::table()
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> RepositorySettings {
        self.settings
    }

    /// Number of rows matching `condition`.
    pub async fn fetch_count_where(&self, condition: Condition) -> Result<i64, CroodError> {
        let mut qb = statement::count(D::table(), &condition);
        trace(D::table(), &qb);
        Ok(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?)
    }

    /// Value of `field` in the row where `field = value`.
    ///
    /// # Errors
    ///
    /// [`CroodError::NoResults`] if no row matches.
    pub async fn fetch_one<F>(&self, field: &str, value: impl Into<Value>) -> Result<F, CroodError>
    where
        (F,): for<'r> FromRow<'r, PgRow>,
        F: Send + Unpin
    {
        let condition = Condition::Eq(field.to_owned(), value.into());
        self.fetch_one_where(field, condition).await
    }

    /// Value of `field` in the row where `field = value`, if any.
    pub async fn fetch_optional<F>(
        &self,
        field: &str,
        value: impl Into<Value>
    ) -> Result<Option<F>, CroodError>
    where
        (F,): for<'r> FromRow<'r, PgRow>,
        F: Send + Unpin
    {
        let condition = Condition::Eq(field.to_owned(), value.into());
        self.fetch_optional_where(field, condition).await
    }

    /// Values of `field` in rows where `field IN (values)`.
    pub async fn fetch_all<F, V>(
        &self,
        field: &str,
        values: impl IntoIterator<Item = V>
    ) -> Result<Vec<F>, CroodError>
    where
        (F,): for<'r> FromRow<'r, PgRow>,
        F: Send + Unpin,
        V: Into<Value>
    {
        let condition = Condition::In(field.to_owned(), values.into_iter().map(Into::into).collect());
        self.fetch_all_where(field, condition).await
    }

    /// Value of `field` in the single row matching `condition`.
    ///
    /// # Errors
    ///
    /// [`CroodError::NoResults`] if no row matches,
    /// [`CroodError::TooManyRows`] if several do.
    pub async fn fetch_one_where<F>(&self, field: &str, condition: Condition) -> Result<F, CroodError>
    where
        (F,): for<'r> FromRow<'r, PgRow>,
        F: Send + Unpin
    {
        self.fetch_optional_where(field, condition)
            .await?
            .ok_or(CroodError::NoResults {
                table: D::table().name
            })
    }

    /// Value of `field` in the row matching `condition`, if any.
    ///
    /// # Errors
    ///
    /// [`CroodError::TooManyRows`] if several rows match.
    pub async fn fetch_optional_where<F>(
        &self,
        field: &str,
        condition: Condition
    ) -> Result<Option<F>, CroodError>
    where
        (F,): for<'r> FromRow<'r, PgRow>,
        F: Send + Unpin
    {
        let mut qb = statement::select_field(D::table(), field, &condition)?;
        statement::limit(&mut qb, 2);
        trace(D::table(), &qb);
        at_most_one(D::table(), qb.build_query_scalar::<F>().fetch_all(&self.pool).await?)
    }

    /// Values of `field` in all rows matching `condition`.
    pub async fn fetch_all_where<F>(&self, field: &str, condition: Condition) -> Result<Vec<F>, CroodError>
    where
        (F,): for<'r> FromRow<'r, PgRow>,
        F: Send + Unpin
    {
        let mut qb = statement::select_field(D::table(), field, &condition)?;
        trace(D::table(), &qb);
        Ok(qb.build_query_scalar::<F>().fetch_all(&self.pool).await?)
    }

    /// Every row of the table.
    pub async fn find_all(&self) -> Result<Vec<D>, CroodError> {
        self.find_all_where(Condition::True).await
    }

    /// Every row matching `condition`.
    pub async fn find_all_where(&self, condition: Condition) -> Result<Vec<D>, CroodError> {
        let mut qb = statement::select(D::table(), &condition);
        trace(D::table(), &qb);
        Ok(qb.build_query_as::<D>().fetch_all(&self.pool).await?)
    }

    /// The single row matching `condition`.
    ///
    /// # Errors
    ///
    /// [`CroodError::NoResults`] if no row matches,
    /// [`CroodError::TooManyRows`] if several do.
    pub async fn find_one_where(&self, condition: Condition) -> Result<D, CroodError> {
        self.find_optional_where(condition)
            .await?
            .ok_or(CroodError::NoResults {
                table: D::table().name
            })
    }

    /// The row matching `condition`, if any.
    ///
    /// # Errors
    ///
    /// [`CroodError::TooManyRows`] if several rows match.
    pub async fn find_optional_where(&self, condition: Condition) -> Result<Option<D>, CroodError> {
        let mut qb = statement::select(D::table(), &condition);
        statement::limit(&mut qb, 2);
        trace(D::table(), &qb);
        at_most_one(D::table(), qb.build_query_as::<D>().fetch_all(&self.pool).await?)
    }

    /// The row with primary key `id`.
    ///
    /// # Errors
    ///
    /// Key resolution errors (see [`primary_key_condition`]) or
    /// [`CroodError::NoResults`].
    pub async fn find_by_id<I>(&self, id: &I) -> Result<D, CroodError>
    where
        I: Identifier + ?Sized
    {
        self.find_one_where(primary_key_condition(D::table(), id)?).await
    }

    /// The row with primary key `id`, if any.
    pub async fn find_optional_by_id<I>(&self, id: &I) -> Result<Option<D>, CroodError>
    where
        I: Identifier + ?Sized
    {
        self.find_optional_where(primary_key_condition(D::table(), id)?)
            .await
    }

    /// Whether a row with primary key `id` exists.
    pub async fn exists_by_id<I>(&self, id: &I) -> Result<bool, CroodError>
    where
        I: Identifier + ?Sized
    {
        self.exists_where(primary_key_condition(D::table(), id)?).await
    }

    /// Whether any row matches `condition`.
    pub async fn exists_where(&self, condition: Condition) -> Result<bool, CroodError> {
        let mut qb = statement::exists(D::table(), &condition);
        trace(D::table(), &qb);
        Ok(qb.build_query_scalar::<bool>().fetch_one(&self.pool).await?)
    }

    /// Insert one domain object. Returns rows affected.
    pub async fn create(&self, domain: &D) -> Result<u64, CroodError> {
        let record = Record::from_domain(domain)?;
        execute(D::table(), &self.pool, statement::insert(&record)).await
    }

    /// Insert a collection. Returns the summed rows affected.
    pub async fn create_all(&self, domains: &[D]) -> Result<u64, CroodError> {
        match Cardinality::of(domains) {
            Cardinality::Empty => Ok(0),
            Cardinality::Single(domain) => self.create(domain).await,
            Cardinality::Many(domains) => {
                let records = domains
                    .iter()
                    .map(Record::from_domain)
                    .collect::<Result<Vec<_>, _>>()?;

                let mut tx = self.pool.begin().await?;
                let mut counts = Vec::with_capacity(records.len());
                for record in &records {
                    counts.push(execute(D::table(), &mut *tx, statement::insert(record)).await?);
                }
                tx.commit().await?;

                tracing::debug!(table = D::table().name, rows = records.len(), "batch insert committed");
                Ok(total_affected(&counts))
            }
        }
    }

    /// Update one domain object by key.
    ///
    /// # Errors
    ///
    /// [`CroodError::StaleRecord`] if optimistic locking is on and the row
    /// changed since it was read.
    pub async fn update(&self, domain: &D) -> Result<u64, CroodError> {
        self.update_or_delete(std::slice::from_ref(domain), Operation::Update)
            .await
    }

    /// Update a collection. Returns the summed rows affected.
    pub async fn update_all(&self, domains: &[D]) -> Result<u64, CroodError> {
        self.update_or_delete(domains, Operation::Update).await
    }

    /// Delete one domain object by key.
    ///
    /// # Errors
    ///
    /// [`CroodError::StaleRecord`] if optimistic locking is on and the row
    /// changed since it was read.
    pub async fn delete(&self, domain: &D) -> Result<u64, CroodError> {
        self.update_or_delete(std::slice::from_ref(domain), Operation::Delete)
            .await
    }

    /// Delete a collection. Returns the summed rows affected.
    pub async fn delete_all(&self, domains: &[D]) -> Result<u64, CroodError> {
        self.update_or_delete(domains, Operation::Delete).await
    }

    /// Delete the row with primary key `id`.
    pub async fn delete_by_id<I>(&self, id: &I) -> Result<u64, CroodError>
    where
        I: Identifier + ?Sized
    {
        self.delete_where(primary_key_condition(D::table(), id)?).await
    }

    /// Delete every row matching `condition`.
    pub async fn delete_where(&self, condition: Condition) -> Result<u64, CroodError> {
        execute(D::table(), &self.pool, statement::delete_where(D::table(), &condition)).await
    }

    /// Remove every row, restarting identities.
    pub async fn truncate(&self) -> Result<u64, CroodError> {
        execute(D::table(), &self.pool, statement::truncate(D::table())).await
    }

    async fn update_or_delete(&self, domains: &[D], operation: Operation) -> Result<u64, CroodError> {
        match Cardinality::of(domains) {
            Cardinality::Empty => Ok(0),
            Cardinality::Single(domain) => {
                let record = Record::for_update_or_delete(domain)?;
                match self.render(&record, operation)? {
                    Some(qb) => self.guarded(execute(D::table(), &self.pool, qb).await?),
                    None => Ok(0)
                }
            }
            Cardinality::Many(domains) => {
                let mut statements = Vec::with_capacity(domains.len());
                for domain in domains {
                    let record = Record::for_update_or_delete(domain)?;
                    if let Some(qb) = self.render(&record, operation)? {
                        statements.push(qb);
                    }
                }

                let mut tx = self.pool.begin().await?;
                let mut counts = Vec::with_capacity(statements.len());
                for qb in statements {
                    counts.push(self.guarded(execute(D::table(), &mut *tx, qb).await?)?);
                }
                tx.commit().await?;

                tracing::debug!(
                    table = D::table().name,
                    rows = domains.len(),
                    ?operation,
                    "batch committed"
                );
                Ok(total_affected(&counts))
            }
        }
    }

    fn render(&self, record: &Record, operation: Operation) -> Result<Option<Statement>, CroodError> {
        let locking = self.settings.optimistic_locking;
        match operation {
            Operation::Update => statement::update(record, locking),
            Operation::Delete => statement::delete(record, locking).map(Some)
        }
    }

    /// Turn a zero-row result of a lock-guarded statement into
    /// [`CroodError::StaleRecord`].
    fn guarded(&self, affected: u64) -> Result<u64, CroodError> {
        let table = D::table();
        if affected == 0 && self.settings.optimistic_locking && table.lock_column().is_some() {
            tracing::warn!(table = table.name, "optimistic lock check failed");
            return Err(CroodError::StaleRecord {
                table: table.name
            });
        }
        Ok(affected)
    }
}

fn trace(table: &Table, qb: &Statement) {
    tracing::debug!(table = table.name, sql = qb.sql(), "executing statement");
}

fn at_most_one<T>(table: &Table, mut rows: Vec<T>) -> Result<Option<T>, CroodError> {
    if rows.len() > 1 {
        return Err(CroodError::TooManyRows {
            table: table.name
        });
    }
    Ok(rows.pop())
}

async fn execute<'c, E>(table: &Table, executor: E, mut qb: Statement) -> Result<u64, CroodError>
where
    E: Executor<'c, Database = Postgres>
{
    trace(table, &qb);
    Ok(qb.build().execute(executor).await?.rows_affected())
}
