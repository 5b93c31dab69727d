//! Session Store (C3, §4.3).
//!
//! The default in-process implementation shards sessions behind a
//! [`DashMap`], one [`tokio::sync::Mutex`] per session so concurrent answers
//! on the same session serialize while unrelated sessions proceed in
//! parallel — the same sharded-map shape the teacher uses for its
//! concurrent session/connection tables, generalized here to hold a
//! `Mutex` (rather than a plain `RwLock`) because `update` holds the lock
//! across an `.await` point.

mod in_memory;

pub use in_memory::InMemorySessionStore;

use crate::error::Result;
use crate::types::Session;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence contract for sessions (§4.3).
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: Session) -> Result<Session>;

    /// `SessionExpired` if missing or past TTL.
    async fn get(&self, id: Uuid) -> Result<Session>;

    /// Applies `mutator` to the session under its per-session lock and
    /// persists the result. `SessionExpired` if missing or past TTL.
    async fn update(
        &self,
        id: Uuid,
        mutator: Box<dyn FnOnce(&mut Session) + Send>,
    ) -> Result<Session>;

    /// Resets TTL without otherwise mutating the session.
    async fn touch(&self, id: Uuid) -> Result<()>;
}
