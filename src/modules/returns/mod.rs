//! Order returns: validation and restocking on create, net refund amounts on read.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Module};

use crate::store::{BookstoreDb, ReturnStore};
use service::ReturnService;

pub struct ReturnsModule {
    db: BookstoreDb,
    service: ReturnService,
}

impl ReturnsModule {
    pub fn new(db: BookstoreDb, maintenance_enabled: bool) -> Self {
        let service = ReturnService::new(db.clone(), maintenance_enabled);
        Self { db, service }
    }
}

#[async_trait]
impl Module for ReturnsModule {
    fn name(&self) -> &'static str {
        "returns"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let existing = self
            .db
            .read(|tables| tables.list_return_items().map(|items| items.len()))?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            maintenance_enabled = ctx.settings.returns.maintenance_enabled,
            return_items = existing,
            "returns module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(routes::openapi())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "returns module stopped");
        Ok(())
    }
}

/// Create a new instance of the returns module
pub fn create_module(db: BookstoreDb, maintenance_enabled: bool) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ReturnsModule::new(db, maintenance_enabled))
}
