//! Unit-of-Work Store: one transaction scope per inbound request.
//!
//! Writes are staged in order and only reach the database on [`flush`] (or
//! [`commit`], which flushes first). Nothing written inside the scope is
//! visible to other connections until the commit succeeds.
//!
//! [`flush`]: UnitOfWork::flush
//! [`commit`]: UnitOfWork::commit

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, Transaction};
use streamify_core::error::{CoreError, CoreResult};

use crate::error::classify;
use crate::query::{Filter, SqlValue, Statement};
use crate::DbPool;

/// A row that can be staged for insertion.
pub trait Insertable: Send + Sync {
    const TABLE: &'static str;

    /// Column/value pairs to insert. Columns left out take their database
    /// defaults.
    fn values(&self) -> Vec<(&'static str, SqlValue)>;
}

/// Lifecycle of a scope. A scope is closed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScopeState {
    Open,
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Delete,
}

/// A write waiting to be flushed.
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub table: &'static str,
    pub op: WriteOp,
    pub statement: Statement,
}

impl PendingWrite {
    pub fn insert<N: Insertable>(row: &N) -> Self {
        PendingWrite {
            table: N::TABLE,
            op: WriteOp::Insert,
            statement: Statement::insert(N::TABLE, row.values()),
        }
    }

    /// `None` when there is nothing to assign.
    pub fn update(
        table: &'static str,
        assignments: Vec<(&'static str, SqlValue)>,
        key: &dyn Filter,
    ) -> Option<Self> {
        if assignments.is_empty() {
            return None;
        }
        Some(PendingWrite {
            table,
            op: WriteOp::Update,
            statement: Statement::update(table, assignments, key),
        })
    }

    pub fn delete(table: &'static str, key: &dyn Filter) -> Self {
        PendingWrite {
            table,
            op: WriteOp::Delete,
            statement: Statement::delete(table, key),
        }
    }
}

/// A transaction scope with an ordered queue of staged writes.
pub struct UnitOfWork {
    pool: DbPool,
    tx: Option<Transaction<'static, Postgres>>,
    pending: Vec<PendingWrite>,
    state: ScopeState,
}

impl UnitOfWork {
    /// Open a scope on a fresh transaction.
    ///
    /// Any failure to obtain a connection is reported as `Connection`,
    /// whatever the driver said.
    pub async fn begin(pool: &DbPool) -> CoreResult<Self> {
        let tx = pool.begin().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to open unit of work");
            CoreError::Connection(e.to_string())
        })?;
        Ok(UnitOfWork {
            pool: pool.clone(),
            tx: Some(tx),
            pending: Vec::new(),
            state: ScopeState::Open,
        })
    }

    pub fn state(&self) -> ScopeState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ScopeState::Open
    }

    /// Number of staged writes not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Stage a row for insertion.
    pub fn stage<N: Insertable>(&mut self, row: &N) -> CoreResult<()> {
        self.stage_write(PendingWrite::insert(row))
    }

    pub fn stage_write(&mut self, write: PendingWrite) -> CoreResult<()> {
        self.ensure_open()?;
        self.pending.push(write);
        Ok(())
    }

    /// Apply staged writes in order without ending the transaction.
    ///
    /// On failure the remaining staged writes are discarded and the scope
    /// must be rolled back.
    pub async fn flush(&mut self) -> CoreResult<()> {
        self.ensure_open()?;
        let pending = std::mem::take(&mut self.pending);
        let Some(tx) = self.tx.as_mut() else {
            return Err(closed_error(self.state));
        };
        for write in pending {
            write
                .statement
                .execute(&mut **tx)
                .await
                .map_err(|e| {
                    tracing::debug!(table = write.table, op = ?write.op, error = %e, "Staged write failed");
                    classify(e)
                })?;
        }
        Ok(())
    }

    /// Flush and commit. On success the scope is closed.
    ///
    /// If flushing or committing fails the transaction is rolled back and
    /// the scope is closed as `RolledBack`; calling [`rollback`] afterwards
    /// is a no-op.
    ///
    /// [`rollback`]: UnitOfWork::rollback
    pub async fn commit(&mut self) -> CoreResult<()> {
        if let Err(e) = self.flush().await {
            if let Err(rollback_err) = self.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback after failed flush failed");
            }
            return Err(e);
        }
        let Some(tx) = self.tx.take() else {
            return Err(closed_error(self.state));
        };
        match tx.commit().await {
            Ok(()) => {
                self.state = ScopeState::Committed;
                Ok(())
            }
            Err(e) => {
                // A failed COMMIT leaves nothing applied.
                self.state = ScopeState::RolledBack;
                Err(classify(e))
            }
        }
    }

    /// Discard everything staged or flushed in this scope.
    ///
    /// No-op once the scope is closed.
    pub async fn rollback(&mut self) -> CoreResult<()> {
        if !self.is_open() {
            return Ok(());
        }
        self.pending.clear();
        self.state = ScopeState::RolledBack;
        match self.tx.take() {
            Some(tx) => tx.rollback().await.map_err(classify),
            None => Ok(()),
        }
    }

    /// Close a request scope according to its outcome: commit on `Ok`,
    /// roll back on `Err`. A scope an auto-committing call already closed is
    /// left as is.
    pub async fn finish<T>(&mut self, result: CoreResult<T>) -> CoreResult<T> {
        match result {
            Ok(value) => {
                if self.is_open() {
                    self.commit().await?;
                }
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Run a select. While the scope is open the staged writes are flushed
    /// first and the read happens inside the transaction; once closed the
    /// read goes through the pool.
    pub async fn fetch<T>(&mut self, statement: &Statement) -> CoreResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        if self.is_open() {
            self.flush().await?;
            let Some(tx) = self.tx.as_mut() else {
                return Err(closed_error(self.state));
            };
            statement.fetch_all(&mut **tx).await.map_err(classify)
        } else {
            statement.fetch_all(&self.pool).await.map_err(classify)
        }
    }

    fn ensure_open(&self) -> CoreResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(closed_error(self.state))
        }
    }
}

impl std::fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if self.tx.is_some() {
            // The driver rolls the transaction back when it is dropped.
            tracing::warn!(
                pending = self.pending.len(),
                "Unit of work dropped while open; rolling back"
            );
        }
    }
}

fn closed_error(state: ScopeState) -> CoreError {
    CoreError::Unknown(format!("unit of work is closed ({state:?})"))
}
