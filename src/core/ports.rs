// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the event-reporting service and the delivery channel as traits.
//
// Responsibilities
// - Keep the registry independent of the platform service by coding against traits.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
//
// Testing guidance
// - Use the in memory service and the collecting sink for tests and local development.

use crate::core::watcher::descriptor::WatcherDescriptor;
use crate::core::watcher::event::AppEvent;
use crate::core::watcher::filter::EventFilter;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("watcher {name} is already registered")]
    DuplicateName { name: String },

    #[error("watcher {name} is not registered")]
    NotFound { name: String },

    #[error("event service unavailable: {0}")]
    Unavailable(String),
}

/// Delivery channel of a watcher. Called synchronously for every matching event.
pub trait WatcherSink: Send + Sync {
    fn deliver(&self, watcher: &str, event: &AppEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherInfo {
    pub name: String,
    pub filters: Vec<EventFilter>,
    pub registration_id: Uuid,
    pub registered_at: i64,
}

#[async_trait]
pub trait EventReportingService: Send + Sync {
    async fn add_watcher(
        &self,
        descriptor: WatcherDescriptor,
        sink: Arc<dyn WatcherSink>,
    ) -> Result<(), ServiceError>;
    async fn remove_watcher(&self, name: &str) -> Result<(), ServiceError>;
    async fn watchers(&self) -> Result<Vec<WatcherInfo>, ServiceError>;
}
