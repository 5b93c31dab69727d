//! [`QuestionCatalogBackend`] backed by a redb table keyed by domain (§4.1).
//!
//! `rec_core::catalog::CachedCatalog` already falls back to the built-in
//! question set whenever this backend is absent, errors, or returns an
//! empty list, so `load_questions` only needs to surface the stored value
//! or a genuine I/O failure — it never needs its own fallback logic.

use crate::{with_db_timeout, RedbStore, QUESTIONS_TABLE};
use async_trait::async_trait;
use rec_core::catalog::QuestionCatalogBackend;
use rec_core::types::{Domain, Question};
use std::sync::Arc;
use tracing::instrument;

#[async_trait]
impl QuestionCatalogBackend for RedbStore {
    #[instrument(skip(self))]
    async fn load_questions(&self, domain: Domain) -> anyhow::Result<Vec<Question>> {
        let db = Arc::clone(&self.db);

        let questions = with_db_timeout(move || {
            let read_txn = db.begin_read()?;
            let table = match read_txn.open_table(QUESTIONS_TABLE) {
                Ok(table) => table,
                Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
                Err(error) => return Err(rec_core::error::Error::Internal(format!(
                    "failed to open questions table: {error}"
                ))),
            };
            match table.get(domain.as_str()) {
                Ok(Some(stored)) => postcard::from_bytes(stored.value()).map_err(|error| {
                    rec_core::error::Error::Internal(format!("failed to decode questions: {error}"))
                }),
                Ok(None) => Ok(Vec::new()),
                Err(error) => Err(rec_core::error::Error::Internal(format!("failed to read questions: {error}"))),
            }
        })
        .await?;

        Ok(questions)
    }
}

impl RedbStore {
    /// Seed (or replace) the stored question set for `domain`. Not part of
    /// the [`QuestionCatalogBackend`] contract; an operational entry point
    /// for loading a curated set ahead of serving traffic.
    #[instrument(skip(self, questions))]
    pub async fn seed_questions(&self, domain: Domain, questions: Vec<Question>) -> rec_core::error::Result<()> {
        let db = Arc::clone(&self.db);
        let bytes = postcard::to_allocvec(&questions)
            .map_err(|error| rec_core::error::Error::Internal(format!("failed to encode questions: {error}")))?;

        with_db_timeout(move || {
            let write_txn = db.begin_write().map_err(|error| {
                rec_core::error::Error::Internal(format!("failed to begin write transaction: {error}"))
            })?;
            {
                let mut table = write_txn.open_table(QUESTIONS_TABLE).map_err(|error| {
                    rec_core::error::Error::Internal(format!("failed to open questions table: {error}"))
                })?;
                table
                    .insert(domain.as_str(), bytes.as_slice())
                    .map_err(|error| rec_core::error::Error::Internal(format!("failed to insert questions: {error}")))?;
            }
            write_txn
                .commit()
                .map_err(|error| rec_core::error::Error::Internal(format!("failed to commit transaction: {error}")))?;
            Ok(())
        })
        .await
    }
}
