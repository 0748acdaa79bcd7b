//! Webhook endpoint tests with a mock transport capturing deliveries.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};
use async_trait::async_trait;
use bot_state::store::InMemorySessionStore;
use flow_engine::{replies, Router};
use record_store::{InMemoryRecordStore, RetryPolicy};
use tokio::sync::Mutex;
use web_service::controllers::webhook_controller;
use web_service::dispatch::ConversationDispatcher;
use web_service::models::InboundEvent;
use web_service::transport::{TransportAdapter, TransportError};

/// Records every reply instead of sending it anywhere.
#[derive(Default)]
struct MockTransport {
    sent: Mutex<Vec<(String, Vec<String>)>>,
}

#[async_trait]
impl TransportAdapter for MockTransport {
    async fn send_reply(
        &self,
        conversation_id: &str,
        messages: &[String],
    ) -> Result<(), TransportError> {
        self.sent
            .lock()
            .await
            .push((conversation_id.to_string(), messages.to_vec()));
        Ok(())
    }

    async fn resolve_display_name(&self, user_id: &str) -> Result<String, TransportError> {
        Ok(format!("{user_id} display"))
    }
}

fn dispatcher(transport: Arc<MockTransport>) -> web::Data<ConversationDispatcher> {
    let store = Arc::new(InMemoryRecordStore::new());
    let router = Arc::new(Router::new(
        Arc::new(InMemorySessionStore::new()),
        store.clone(),
        store,
        RetryPolicy::default(),
    ));
    web::Data::new(ConversationDispatcher::new(router, transport))
}

/// Poll the mock until the expected number of deliveries arrived.
async fn wait_for_deliveries(transport: &MockTransport, count: usize) -> Vec<(String, Vec<String>)> {
    for _ in 0..100 {
        {
            let sent = transport.sent.lock().await;
            if sent.len() >= count {
                return sent.clone();
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    transport.sent.lock().await.clone()
}

#[actix_web::test]
async fn test_webhook_acknowledges_and_replies_through_the_transport() {
    let transport = Arc::new(MockTransport::default());
    let app = test::init_service(
        App::new()
            .app_data(dispatcher(transport.clone()))
            .configure(webhook_controller::config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook")
        .set_json(InboundEvent {
            conversation_id: "conv-1".to_string(),
            user_id: "alice".to_string(),
            message_text: "hello".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let sent = wait_for_deliveries(&transport, 1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "conv-1");
    assert_eq!(sent[0].1, vec![replies::help()]);
}

#[actix_web::test]
async fn test_messages_for_one_conversation_are_handled_in_order() {
    let transport = Arc::new(MockTransport::default());
    let app = test::init_service(
        App::new()
            .app_data(dispatcher(transport.clone()))
            .configure(webhook_controller::config),
    )
    .await;

    for text in ["register schedule", "2025/06/15"] {
        let req = test::TestRequest::post()
            .uri("/webhook")
            .set_json(InboundEvent {
                conversation_id: "conv-1".to_string(),
                user_id: "alice".to_string(),
                message_text: text.to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let sent = wait_for_deliveries(&transport, 2).await;
    assert_eq!(sent.len(), 2);
    // First reply starts the flow, second proves the date arrived at the
    // date step and advanced the session to the title prompt.
    assert_eq!(sent[0].1[0], replies::REGISTRATION_STARTED);
    assert!(sent[1].1[0].contains("title"));
}

#[actix_web::test]
async fn test_health_endpoint() {
    let transport = Arc::new(MockTransport::default());
    let app = test::init_service(
        App::new()
            .app_data(dispatcher(transport))
            .configure(webhook_controller::config),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
