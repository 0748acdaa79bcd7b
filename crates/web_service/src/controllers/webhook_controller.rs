//! Webhook endpoint
//!
//! The chat platform posts one `InboundEvent` per user message. The event is
//! queued on its conversation's worker and the request is acknowledged right
//! away; replies travel back through the transport adapter, not this response.

use actix_web::{web, HttpResponse, Responder};

use crate::dispatch::ConversationDispatcher;
use crate::error::Result;
use crate::models::InboundEvent;

async fn webhook(
    dispatcher: web::Data<ConversationDispatcher>,
    event: web::Json<InboundEvent>,
) -> Result<HttpResponse> {
    let event = event.into_inner();
    tracing::info!(
        conversation_id = %event.conversation_id,
        user_id = %event.user_id,
        "inbound event"
    );
    dispatcher.dispatch(event).await?;
    Ok(HttpResponse::Ok().body("OK"))
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/webhook").route(web::post().to(webhook)))
        .service(web::resource("/health").route(web::get().to(health_check)));
}
