// Shared test fixture for the WatcherDescriptor.
// The default descriptor is read from the JSON configuration next to this file.

use crate::core::watcher::descriptor::{WatcherConfig, WatcherDescriptor};
use crate::core::watcher::filter::EventFilter;
use std::fs;

const DEFAULT_DESCRIPTOR_JSON: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/test_support/fixtures/descriptors/json/watcher_os_event.json"
);

pub struct WatcherDescriptorBuilder {
    inner: WatcherDescriptor,
}

impl Default for WatcherDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl WatcherDescriptorBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string(DEFAULT_DESCRIPTOR_JSON).unwrap();
        let config: WatcherConfig = serde_json::from_str(&json_str).unwrap();

        Self {
            inner: WatcherDescriptor::try_from(config).unwrap(),
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn filters(mut self, v: Vec<EventFilter>) -> Self {
        self.inner.filters = v;
        self
    }

    pub fn filter(mut self, v: EventFilter) -> Self {
        self.inner.filters.push(v);
        self
    }

    pub fn build(self) -> WatcherDescriptor {
        self.inner
    }
}
