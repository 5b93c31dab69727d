//! # rec-storage-redb
//!
//! redb-backed implementations of [`rec_core::session::SessionStore`] and
//! [`rec_core::catalog::QuestionCatalogBackend`] for the recommendation core
//! (C3, C1 persistent-store side).
//!
//! Every table holds postcard-encoded values behind a single [`redb::Database`]
//! handle; each operation runs on a blocking thread under a timeout, since redb
//! itself is synchronous.
//!
//! ## Example
//!
//! ```no_run
//! use rec_storage_redb::RedbStore;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = RedbStore::open(Path::new("./recommender.redb")).await?;
//! # Ok(())
//! # }
//! ```

mod catalog_backend;
mod session_store;

use redb::{Database, TableDefinition};
use rec_core::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub(crate) const SESSIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("sessions");
pub(crate) const QUESTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("questions");

/// Timeout applied to every blocking redb operation, matching the single
/// retrieval-stage deadline shape the rest of the pipeline uses (§4.13).
const DB_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a synchronous redb operation on a blocking thread, bounded by
/// [`DB_OPERATION_TIMEOUT`]. A closure that runs long or a worker that
/// panics both surface as [`Error::Internal`] rather than hanging the
/// caller.
pub(crate) async fn with_db_timeout<T, F>(operation: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(DB_OPERATION_TIMEOUT, tokio::task::spawn_blocking(operation)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(Error::Internal(format!("redb task join error: {join_error}"))),
        Err(_) => Err(Error::Internal(format!(
            "redb operation timed out after {DB_OPERATION_TIMEOUT:?}"
        ))),
    }
}

/// Shared handle to the redb database backing both the Session Store and
/// the Question Catalog's persistent-store side.
#[derive(Clone)]
pub struct RedbStore {
    pub(crate) db: Arc<Database>,
    pub(crate) session_ttl: Duration,
}

impl RedbStore {
    /// Open (creating if absent) the database at `path` and ensure every
    /// table exists (§4.1, §4.3).
    pub async fn open(path: &Path) -> Result<Self> {
        Self::open_with_ttl(path, rec_core::types::constants::DEFAULT_SESSION_TTL).await
    }

    /// Open with an explicit session TTL, overriding the default (§4.3).
    pub async fn open_with_ttl(path: &Path, session_ttl: Duration) -> Result<Self> {
        info!(path = %path.display(), "opening redb store");
        let path_buf = path.to_path_buf();

        let db = with_db_timeout(move || {
            Database::create(&path_buf).map_err(|error| Error::Internal(format!("failed to open redb database: {error}")))
        })
        .await?;

        let store = Self {
            db: Arc::new(db),
            session_ttl,
        };
        store.initialize_tables().await?;
        info!("redb store ready");
        Ok(store)
    }

    async fn initialize_tables(&self) -> Result<()> {
        let db = Arc::clone(&self.db);
        with_db_timeout(move || {
            let write_txn = db
                .begin_write()
                .map_err(|error| Error::Internal(format!("failed to begin write transaction: {error}")))?;
            {
                write_txn
                    .open_table(SESSIONS_TABLE)
                    .map_err(|error| Error::Internal(format!("failed to open sessions table: {error}")))?;
                write_txn
                    .open_table(QUESTIONS_TABLE)
                    .map_err(|error| Error::Internal(format!("failed to open questions table: {error}")))?;
            }
            write_txn
                .commit()
                .map_err(|error| Error::Internal(format!("failed to commit transaction: {error}")))?;
            Ok(())
        })
        .await
    }
}
