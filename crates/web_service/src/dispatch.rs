//! Per-conversation dispatch
//!
//! One bounded mpsc queue and one worker task per conversation id. Messages
//! for the same conversation are handled strictly in arrival order, each to
//! completion before the next starts; different conversations proceed in
//! parallel. A failed display-name lookup falls back to the raw user id so a
//! profile outage never blocks the conversation.

use std::sync::Arc;

use dashmap::DashMap;
use flow_engine::{InboundMessage, Router};
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::models::InboundEvent;
use crate::transport::TransportAdapter;

const QUEUE_CAPACITY: usize = 32;

pub struct ConversationDispatcher {
    router: Arc<Router>,
    transport: Arc<dyn TransportAdapter>,
    workers: DashMap<String, mpsc::Sender<InboundEvent>>,
}

impl ConversationDispatcher {
    pub fn new(router: Arc<Router>, transport: Arc<dyn TransportAdapter>) -> Self {
        Self {
            router,
            transport,
            workers: DashMap::new(),
        }
    }

    /// Queue one event on its conversation's worker, spawning the worker on
    /// first contact. Applies backpressure when the queue is full.
    pub async fn dispatch(&self, event: InboundEvent) -> Result<(), AppError> {
        let sender = {
            let entry = self
                .workers
                .entry(event.conversation_id.clone())
                .or_insert_with(|| {
                    spawn_worker(
                        self.router.clone(),
                        self.transport.clone(),
                        event.conversation_id.clone(),
                    )
                });
            entry.value().clone()
        };
        sender
            .send(event)
            .await
            .map_err(|_| AppError::Dispatch("conversation worker stopped".to_string()))
    }
}

fn spawn_worker(
    router: Arc<Router>,
    transport: Arc<dyn TransportAdapter>,
    conversation_id: String,
) -> mpsc::Sender<InboundEvent> {
    let (tx, mut rx) = mpsc::channel::<InboundEvent>(QUEUE_CAPACITY);
    tokio::spawn(async move {
        tracing::debug!(conversation_id = %conversation_id, "conversation worker started");
        while let Some(event) = rx.recv().await {
            let display_name = match transport.resolve_display_name(&event.user_id).await {
                Ok(name) => name,
                Err(err) => {
                    tracing::warn!(
                        user_id = %event.user_id,
                        error = %err,
                        "display name lookup failed, using user id"
                    );
                    event.user_id.clone()
                }
            };
            let replies = router
                .route(&InboundMessage {
                    conversation_id: &event.conversation_id,
                    user_id: &event.user_id,
                    display_name: &display_name,
                    text: &event.message_text,
                })
                .await;
            if replies.is_empty() {
                continue;
            }
            if let Err(err) = transport.send_reply(&event.conversation_id, &replies).await {
                tracing::error!(
                    conversation_id = %event.conversation_id,
                    error = %err,
                    "reply delivery failed"
                );
            }
        }
        tracing::debug!(conversation_id = %conversation_id, "conversation worker stopped");
    });
    tx
}
