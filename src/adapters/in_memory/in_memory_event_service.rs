// In memory implementation of the EventReportingService port.
//
// Purpose
// - Stand in for the platform event-reporting service in tests and in the shell.
//
// Responsibilities
// - Hold the watcher table as an explicit object that can be cleared between runs.
// - Apply the duplicate name policy chosen at construction.
// - Publish events: match them against every active watcher and deliver to its sink.
// - Report which OS events are listened to as a bit mask.

use crate::core::ports::{EventReportingService, ServiceError, WatcherInfo, WatcherSink};
use crate::core::watcher::descriptor::WatcherDescriptor;
use crate::core::watcher::event::AppEvent;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// A second registration under an active name fails; the first one stays.
    #[default]
    Reject,
    /// A second registration under an active name takes its place.
    Replace,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "replace" => Ok(DuplicatePolicy::Replace),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

struct ActiveWatcher {
    descriptor: WatcherDescriptor,
    sink: Arc<dyn WatcherSink>,
    registration_id: Uuid,
    registered_at: i64,
}

impl ActiveWatcher {
    fn info(&self) -> WatcherInfo {
        WatcherInfo {
            name: self.descriptor.name.clone(),
            filters: self.descriptor.filters.clone(),
            registration_id: self.registration_id,
            registered_at: self.registered_at,
        }
    }
}

#[derive(Default)]
pub struct InMemoryEventService {
    inner: RwLock<HashMap<String, ActiveWatcher>>,
    policy: DuplicatePolicy,
    offline: AtomicBool,
}

impl InMemoryEventService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), ServiceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("Event service offline".into()));
        }
        Ok(())
    }

    /// Delivers `event` to every active watcher with a matching filter.
    /// Returns the names of the receiving watchers, sorted.
    pub async fn publish(&self, event: &AppEvent) -> Result<Vec<String>, ServiceError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        let mut delivered: Vec<String> = guard
            .values()
            .filter(|w| w.descriptor.matches(event))
            .map(|w| {
                w.sink.deliver(&w.descriptor.name, event);
                w.descriptor.name.clone()
            })
            .collect();
        delivered.sort();
        debug!(
            domain = %event.domain,
            event = %event.name,
            receivers = delivered.len(),
            "event published"
        );
        Ok(delivered)
    }

    /// OR of the mask bits of every OS event named by an active watcher.
    pub async fn listened_os_events_mask(&self) -> u64 {
        self.inner
            .read()
            .await
            .values()
            .fold(0, |mask, w| mask | w.descriptor.os_events_mask())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Drops every registration. Used at teardown.
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        let removed = guard.len();
        guard.clear();
        info!(removed, "watcher table cleared");
    }
}

#[async_trait::async_trait]
impl EventReportingService for InMemoryEventService {
    async fn add_watcher(
        &self,
        descriptor: WatcherDescriptor,
        sink: Arc<dyn WatcherSink>,
    ) -> Result<(), ServiceError> {
        self.ensure_online()?;
        let mut guard = self.inner.write().await;
        let name = descriptor.name.clone();
        let replacing = guard.contains_key(&name);
        if replacing && self.policy == DuplicatePolicy::Reject {
            warn!(watcher = %name, "watcher already registered");
            return Err(ServiceError::DuplicateName { name });
        }
        guard.insert(
            name.clone(),
            ActiveWatcher {
                descriptor,
                sink,
                registration_id: Uuid::now_v7(),
                registered_at: chrono::Utc::now().timestamp_millis(),
            },
        );
        if replacing {
            info!(watcher = %name, "watcher replaced");
        } else {
            info!(watcher = %name, total = guard.len(), "watcher added");
        }
        Ok(())
    }

    async fn remove_watcher(&self, name: &str) -> Result<(), ServiceError> {
        self.ensure_online()?;
        let mut guard = self.inner.write().await;
        if guard.remove(name).is_none() {
            debug!(watcher = %name, "watcher not found");
            return Err(ServiceError::NotFound {
                name: name.to_string(),
            });
        }
        info!(watcher = %name, total = guard.len(), "watcher removed");
        Ok(())
    }

    async fn watchers(&self) -> Result<Vec<WatcherInfo>, ServiceError> {
        self.ensure_online()?;
        let mut infos: Vec<WatcherInfo> =
            self.inner.read().await.values().map(ActiveWatcher::info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }
}
