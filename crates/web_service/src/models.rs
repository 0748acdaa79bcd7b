//! Webhook wire types

use serde::{Deserialize, Serialize};

/// One inbound chat event as posted to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub conversation_id: String,
    pub user_id: String,
    pub message_text: String,
}
