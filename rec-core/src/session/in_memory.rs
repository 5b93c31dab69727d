use super::SessionStore;
use crate::error::{Error, Result};
use crate::types::Session;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

/// Default, in-process [`SessionStore`]. Not durable across restarts; see
/// `rec-storage-redb` for a persistent implementation.
pub struct InMemorySessionStore {
    sessions: DashMap<Uuid, Arc<Mutex<Session>>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    fn is_expired(&self, session: &Session) -> bool {
        let age = Utc::now().signed_duration_since(session.last_touched_at);
        age.to_std().map(|age| age >= self.ttl).unwrap_or(false)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create(&self, session: Session) -> Result<Session> {
        let id = session.id;
        self.sessions.insert(id, Arc::new(Mutex::new(session.clone())));
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Session> {
        let entry = self
            .sessions
            .get(&id)
            .ok_or(Error::SessionExpired(id))?
            .clone();
        let session = entry.lock().await;
        if self.is_expired(&session) {
            drop(session);
            self.sessions.remove(&id);
            return Err(Error::SessionExpired(id));
        }
        Ok(session.clone())
    }

    #[instrument(skip(self, mutator))]
    async fn update(
        &self,
        id: Uuid,
        mutator: Box<dyn FnOnce(&mut Session) + Send>,
    ) -> Result<Session> {
        let entry = self
            .sessions
            .get(&id)
            .ok_or(Error::SessionExpired(id))?
            .clone();
        let mut session = entry.lock().await;
        if self.is_expired(&session) {
            drop(session);
            self.sessions.remove(&id);
            return Err(Error::SessionExpired(id));
        }
        mutator(&mut session);
        session.last_touched_at = Utc::now();
        Ok(session.clone())
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Uuid) -> Result<()> {
        let entry = self
            .sessions
            .get(&id)
            .ok_or(Error::SessionExpired(id))?
            .clone();
        let mut session = entry.lock().await;
        if self.is_expired(&session) {
            drop(session);
            self.sessions.remove(&id);
            return Err(Error::SessionExpired(id));
        }
        session.last_touched_at = Utc::now();
        Ok(())
    }
}
