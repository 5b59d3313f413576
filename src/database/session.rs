//! Transactional sessions
//!
//! A [`Session`] is a pooled connection with an open transaction. It is the
//! unit of work of the database layer: statements run inside the
//! transaction, `commit`/`rollback` consume the session and return the
//! connection to its pool, and dropping an unfinished session rolls the
//! transaction back. A connection with an open transaction is never handed
//! back to the pool.

use crate::domain::{DatabaseError, Result};
use deadpool_postgres::Object;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

/// A transactional unit of work borrowed from a pool
///
/// Single-owner for its duration; a session must not be shared across
/// concurrent operations.
#[derive(Debug)]
pub struct Session {
    client: Option<Object>,
    readonly: bool,
    open: bool,
}

impl Session {
    /// Open a transaction on a pooled connection
    ///
    /// Readonly sessions begin with `BEGIN READ ONLY` so the server rejects
    /// writes even if the pool's credentials would allow them.
    pub(crate) async fn begin(client: Object, readonly: bool) -> Result<Self> {
        let begin = if readonly { "BEGIN READ ONLY" } else { "BEGIN" };
        client
            .batch_execute(begin)
            .await
            .map_err(|err| DatabaseError::Begin(err.to_string()))?;

        Ok(Self {
            client: Some(client),
            readonly,
            open: true,
        })
    }

    /// Whether this session came from the read-only pool
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    // The connection is only taken in commit/rollback/drop, all of which
    // consume or end the session.
    fn client(&self) -> &Object {
        self.client
            .as_ref()
            .expect("session connection already released")
    }

    /// Execute a statement, returning the number of affected rows
    pub async fn execute(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64> {
        self.client()
            .execute(statement, params)
            .await
            .map_err(|err| DatabaseError::Query(err.to_string()).into())
    }

    /// Run a query, returning all rows
    pub async fn query(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        self.client()
            .query(statement, params)
            .await
            .map_err(|err| DatabaseError::Query(err.to_string()).into())
    }

    /// Run a query that must return exactly one row
    pub async fn query_one(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Row> {
        self.client()
            .query_one(statement, params)
            .await
            .map_err(|err| DatabaseError::Query(err.to_string()).into())
    }

    /// Run a query returning at most one row
    pub async fn query_opt(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>> {
        self.client()
            .query_opt(statement, params)
            .await
            .map_err(|err| DatabaseError::Query(err.to_string()).into())
    }

    /// Execute a batch of statements separated by semicolons
    pub async fn batch_execute(&self, statements: &str) -> Result<()> {
        self.client()
            .batch_execute(statements)
            .await
            .map_err(|err| DatabaseError::Query(err.to_string()).into())
    }

    /// Commit the transaction and release the connection
    ///
    /// # Errors
    ///
    /// If the commit fails the session is still released; the connection is
    /// rolled back or discarded by the drop backstop.
    pub async fn commit(mut self) -> Result<()> {
        self.client()
            .batch_execute("COMMIT")
            .await
            .map_err(|err| DatabaseError::Commit(err.to_string()))?;
        self.open = false;
        Ok(())
    }

    /// Roll back the transaction and release the connection
    pub async fn rollback(mut self) -> Result<()> {
        self.client()
            .batch_execute("ROLLBACK")
            .await
            .map_err(|err| DatabaseError::Rollback(err.to_string()))?;
        self.open = false;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        let Some(client) = self.client.take() else {
            return;
        };

        // Rollback requires an async call. On a live runtime, roll back on
        // a spawned task; the connection returns to the pool afterwards.
        // Without a runtime, discard the connection so the server aborts
        // the transaction. Either way no dirty connection is pooled.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = client.batch_execute("ROLLBACK").await {
                        tracing::warn!(error = %err, "Failed to roll back abandoned session");
                        drop(Object::take(client));
                    }
                });
            }
            Err(_) => drop(Object::take(client)),
        }
    }
}
