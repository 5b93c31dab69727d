//! [`SessionStore`] backed by a redb table keyed by session id (§4.3).
//!
//! `update` and `touch` read, mutate, and write back the session inside a
//! single redb write transaction: redb only ever admits one writer at a
//! time, so the whole read-modify-write is atomic without any extra
//! session-level locking (the in-process store needs a per-session
//! `Mutex` for exactly this reason; here the transaction already gives it).

use crate::{with_db_timeout, RedbStore, SESSIONS_TABLE};
use async_trait::async_trait;
use chrono::Utc;
use rec_core::error::{Error, Result};
use rec_core::session::SessionStore;
use rec_core::types::Session;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

fn is_expired(session: &Session, ttl: Duration) -> bool {
    let age = Utc::now().signed_duration_since(session.last_touched_at);
    age.to_std().map(|age| age >= ttl).unwrap_or(false)
}

fn encode(session: &Session) -> Result<Vec<u8>> {
    postcard::to_allocvec(session).map_err(|error| Error::Internal(format!("failed to encode session: {error}")))
}

fn decode(bytes: &[u8]) -> Result<Session> {
    postcard::from_bytes(bytes).map_err(|error| Error::Internal(format!("failed to decode session: {error}")))
}

#[async_trait]
impl SessionStore for RedbStore {
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create(&self, session: Session) -> Result<Session> {
        let db = Arc::clone(&self.db);
        let bytes = encode(&session)?;
        let id = session.id;

        with_db_timeout(move || {
            let write_txn = db
                .begin_write()
                .map_err(|error| Error::Internal(format!("failed to begin write transaction: {error}")))?;
            {
                let mut table = write_txn
                    .open_table(SESSIONS_TABLE)
                    .map_err(|error| Error::Internal(format!("failed to open sessions table: {error}")))?;
                table
                    .insert(id.to_string().as_str(), bytes.as_slice())
                    .map_err(|error| Error::Internal(format!("failed to insert session: {error}")))?;
            }
            write_txn
                .commit()
                .map_err(|error| Error::Internal(format!("failed to commit transaction: {error}")))?;
            Ok(())
        })
        .await?;

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Session> {
        let db = Arc::clone(&self.db);
        let ttl = self.session_ttl;

        let session = with_db_timeout(move || {
            let read_txn = db
                .begin_read()
                .map_err(|error| Error::Internal(format!("failed to begin read transaction: {error}")))?;
            let table = read_txn
                .open_table(SESSIONS_TABLE)
                .map_err(|error| Error::Internal(format!("failed to open sessions table: {error}")))?;
            let stored = table
                .get(id.to_string().as_str())
                .map_err(|error| Error::Internal(format!("failed to read session: {error}")))?
                .ok_or(Error::SessionExpired(id))?;
            decode(stored.value())
        })
        .await?;

        if is_expired(&session, ttl) {
            self.remove(id).await?;
            return Err(Error::SessionExpired(id));
        }
        Ok(session)
    }

    #[instrument(skip(self, mutator))]
    async fn update(&self, id: Uuid, mutator: Box<dyn FnOnce(&mut Session) + Send>) -> Result<Session> {
        let db = Arc::clone(&self.db);
        let ttl = self.session_ttl;

        with_db_timeout(move || {
            let write_txn = db
                .begin_write()
                .map_err(|error| Error::Internal(format!("failed to begin write transaction: {error}")))?;

            let session = {
                let mut table = write_txn
                    .open_table(SESSIONS_TABLE)
                    .map_err(|error| Error::Internal(format!("failed to open sessions table: {error}")))?;
                let stored = table
                    .get(id.to_string().as_str())
                    .map_err(|error| Error::Internal(format!("failed to read session: {error}")))?
                    .ok_or(Error::SessionExpired(id))?;
                let mut session = decode(stored.value())?;
                drop(stored);

                if is_expired(&session, ttl) {
                    table
                        .remove(id.to_string().as_str())
                        .map_err(|error| Error::Internal(format!("failed to remove expired session: {error}")))?;
                    drop(table);
                    write_txn
                        .commit()
                        .map_err(|error| Error::Internal(format!("failed to commit transaction: {error}")))?;
                    return Err(Error::SessionExpired(id));
                }

                mutator(&mut session);
                session.last_touched_at = Utc::now();
                let bytes = encode(&session)?;
                table
                    .insert(id.to_string().as_str(), bytes.as_slice())
                    .map_err(|error| Error::Internal(format!("failed to write session: {error}")))?;
                session
            };

            write_txn
                .commit()
                .map_err(|error| Error::Internal(format!("failed to commit transaction: {error}")))?;
            Ok(session)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Uuid) -> Result<()> {
        self.update(id, Box::new(|_session: &mut Session| {})).await?;
        Ok(())
    }
}

impl RedbStore {
    async fn remove(&self, id: Uuid) -> Result<()> {
        let db = Arc::clone(&self.db);
        with_db_timeout(move || {
            let write_txn = db
                .begin_write()
                .map_err(|error| Error::Internal(format!("failed to begin write transaction: {error}")))?;
            {
                let mut table = write_txn
                    .open_table(SESSIONS_TABLE)
                    .map_err(|error| Error::Internal(format!("failed to open sessions table: {error}")))?;
                table
                    .remove(id.to_string().as_str())
                    .map_err(|error| Error::Internal(format!("failed to remove session: {error}")))?;
            }
            write_txn
                .commit()
                .map_err(|error| Error::Internal(format!("failed to commit transaction: {error}")))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rec_core::types::{Context, DayClass, Domain, FlowName, QuestionFlow, Season, TimeOfDay};
    use tempfile::TempDir;

    fn flow() -> QuestionFlow {
        QuestionFlow {
            greeting: "hi".to_string(),
            questions: vec![],
            context: Context {
                time_of_day: TimeOfDay::Afternoon,
                day_class: DayClass::Weekday,
                season: Season::Summer,
                timezone: "UTC".to_string(),
                attention_level: None,
                discovery_mode: None,
                personal_context: None,
            },
            flow_type: FlowName::Standard,
        }
    }

    async fn store() -> (RedbStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (store, _dir) = store().await;
        let session = Session::new(Domain::Movies, flow(), Utc::now());
        let id = session.id;
        store.create(session.clone()).await.unwrap();
        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.id, session.id);
    }

    #[tokio::test]
    async fn get_unknown_id_is_session_expired() {
        let (store, _dir) = store().await;
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::SessionExpired(_)));
    }

    #[tokio::test]
    async fn update_mutates_and_persists() {
        let (store, _dir) = store().await;
        let session = Session::new(Domain::Movies, flow(), Utc::now());
        let id = session.id;
        store.create(session).await.unwrap();
        store
            .update(
                id,
                Box::new(|s: &mut Session| {
                    s.profile = None;
                }),
            )
            .await
            .unwrap();
        let fetched = store.get(id).await.unwrap();
        assert!(fetched.profile.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_reported_and_evicted() {
        let dir = TempDir::new().unwrap();
        let store = RedbStore::open_with_ttl(&dir.path().join("test.redb"), Duration::from_millis(1))
            .await
            .unwrap();
        let session = Session::new(Domain::Movies, flow(), Utc::now());
        let id = session.id;
        store.create(session).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(matches!(store.get(id).await, Err(Error::SessionExpired(_))));
    }
}
