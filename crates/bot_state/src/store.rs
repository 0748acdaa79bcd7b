//! Session store - per-conversation session snapshots
//!
//! The store is injected rather than being a module-level global. The
//! in-memory implementation matches the bot's persistence contract: sessions
//! are lost on restart, all committed data lives in the record store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::session::Session;

/// Keeps one `Session` per conversation id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The session for a conversation; the idle session if none exists.
    async fn get(&self, conversation_id: &str) -> Session;

    /// Replace the full session snapshot.
    async fn set(&self, conversation_id: &str, session: Session);

    /// Reset to idle, discarding fields and cursor.
    async fn clear(&self, conversation_id: &str);
}

/// In-memory session store for a single-process deployment.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, conversation_id: &str) -> Session {
        self.sessions
            .get(conversation_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(Session::idle)
    }

    async fn set(&self, conversation_id: &str, session: Session) {
        tracing::debug!(
            conversation_id,
            step = ?session.current_step,
            "session updated"
        );
        self.sessions.insert(conversation_id.to_string(), session);
    }

    async fn clear(&self, conversation_id: &str) {
        tracing::debug!(conversation_id, "session cleared");
        self.sessions.remove(conversation_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{FlowStep, ScheduleRegistrationStep};
    use bot_core::schema::FieldId;

    #[tokio::test]
    async fn test_get_returns_idle_for_unknown_conversation() {
        let store = InMemorySessionStore::new();
        let session = store.get("nobody").await;
        assert!(session.is_idle());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        let mut session = Session::start(FlowStep::ScheduleRegistration(
            ScheduleRegistrationStep::AskTitle,
        ));
        session.put_field(FieldId::Date, "2025/06/15".to_string());
        store.set("conv-1", session.clone()).await;
        assert_eq!(store.get("conv-1").await, session);
    }

    #[tokio::test]
    async fn test_clear_resets_to_idle_and_discards_fields() {
        let store = InMemorySessionStore::new();
        let mut session = Session::start(FlowStep::ScheduleRegistration(
            ScheduleRegistrationStep::AskTitle,
        ));
        session.put_field(FieldId::Date, "2025/06/15".to_string());
        store.set("conv-1", session).await;

        store.clear("conv-1").await;
        let after = store.get("conv-1").await;
        assert!(after.is_idle());
        assert!(after.fields.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_conversation() {
        let store = InMemorySessionStore::new();
        store
            .set(
                "conv-1",
                Session::start(FlowStep::ScheduleRegistration(
                    ScheduleRegistrationStep::AskDate,
                )),
            )
            .await;
        assert!(store.get("conv-2").await.is_idle());
    }
}
