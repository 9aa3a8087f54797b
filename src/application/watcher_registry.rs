// Watcher registry orchestrates the registration flow.
//
// Responsibilities
// - Validate the descriptor before anything reaches the service.
// - Submit it to the event-reporting service with its delivery sink.
// - Surface every failure to the caller. No retry, no fallback.

use crate::application::errors::RegistrationError;
use crate::core::ports::{EventReportingService, WatcherInfo, WatcherSink};
use crate::core::watcher::descriptor::{WatcherConfig, WatcherDescriptor};
use std::sync::Arc;
use tracing::{info, warn};

pub struct WatcherRegistry<TService>
where
    TService: EventReportingService + 'static,
{
    service: Arc<TService>,
}

impl<TService> Clone for WatcherRegistry<TService>
where
    TService: EventReportingService + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<TService> WatcherRegistry<TService>
where
    TService: EventReportingService + 'static,
{
    pub fn new(service: Arc<TService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<TService> {
        &self.service
    }

    pub async fn register(
        &self,
        descriptor: WatcherDescriptor,
        sink: Arc<dyn WatcherSink>,
    ) -> Result<(), RegistrationError> {
        if let Err(error) = descriptor.validate() {
            warn!(watcher = %descriptor.name, %error, "watcher descriptor rejected");
            return Err(error.into());
        }
        let name = descriptor.name.clone();
        let filters = descriptor.filters.len();
        self.service
            .add_watcher(descriptor, sink)
            .await
            .inspect_err(|error| warn!(watcher = %name, %error, "watcher registration failed"))?;
        info!(watcher = %name, filters, "watcher registered");
        Ok(())
    }

    /// Converts a configuration entry into a descriptor, then registers it.
    pub async fn register_config(
        &self,
        config: WatcherConfig,
        sink: Arc<dyn WatcherSink>,
    ) -> Result<(), RegistrationError> {
        let descriptor = WatcherDescriptor::try_from(config)?;
        self.register(descriptor, sink).await
    }

    pub async fn unregister(&self, name: &str) -> Result<(), RegistrationError> {
        self.service.remove_watcher(name).await?;
        info!(watcher = %name, "watcher unregistered");
        Ok(())
    }

    pub async fn active_watchers(&self) -> Result<Vec<WatcherInfo>, RegistrationError> {
        Ok(self.service.watchers().await?)
    }

    pub async fn is_active(&self, name: &str) -> Result<bool, RegistrationError> {
        Ok(self
            .active_watchers()
            .await?
            .iter()
            .any(|w| w.name == name))
    }
}
