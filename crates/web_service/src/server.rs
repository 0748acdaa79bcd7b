//! Server assembly
//!
//! Builds the stores chosen by the configuration, wires the router, the
//! transport and the dispatcher together and runs the actix server.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use bot_state::store::InMemorySessionStore;
use flow_engine::Router;
use record_store::{AttendanceStore, InMemoryRecordStore, JsonFileRecordStore, ScheduleStore};

use crate::config::{AppConfig, StoreBackend};
use crate::controllers;
use crate::dispatch::ConversationDispatcher;
use crate::error::AppError;
use crate::transport::{HttpTransport, TransportAdapter};

const DEFAULT_WORKER_COUNT: usize = 4;

async fn build_record_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn ScheduleStore>, Arc<dyn AttendanceStore>), AppError> {
    match config.store_backend {
        StoreBackend::Memory => {
            let store = Arc::new(InMemoryRecordStore::new());
            Ok((store.clone(), store))
        }
        StoreBackend::Json => {
            let store = Arc::new(JsonFileRecordStore::open(&config.data_dir).await?);
            Ok((store.clone(), store))
        }
    }
}

pub async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(port = config.port, backend = ?config.store_backend, "starting webhook service");

    let (schedules, attendance) = build_record_stores(&config).await?;
    let router = Arc::new(Router::new(
        Arc::new(InMemorySessionStore::new()),
        schedules,
        attendance,
        config.retry,
    ));
    let transport: Arc<dyn TransportAdapter> = Arc::new(HttpTransport::new(&config));
    let dispatcher = web::Data::new(ConversationDispatcher::new(router, transport));

    HttpServer::new(move || {
        App::new()
            .app_data(dispatcher.clone())
            .configure(controllers::webhook_controller::config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;
    Ok(())
}
