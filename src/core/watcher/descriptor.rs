// Watcher descriptor: the unit submitted to the registry.
//
// Purpose
// - Name a watcher and list the filters selecting the events it receives.
//
// Responsibilities
// - Reject a blank or whitespace-padded name and an empty filter list before anything
//   reaches the service. The name is the table key, so " W" and "W" must not coexist.
// - Convert the loosely typed configuration shape into validated filters.
// - Never perform input or output.

use crate::core::watcher::domain::EventDomain;
use crate::core::watcher::event::AppEvent;
use crate::core::watcher::filter::EventFilter;
use serde::Deserialize;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("watcher name must not be empty")]
    EmptyName,
    #[error("watcher name {name:?} has leading or trailing whitespace")]
    PaddedName { name: String },
    #[error("watcher {name} has no filters")]
    EmptyFilters { name: String },
    #[error("unknown event domain: {0}")]
    UnknownDomain(String),
    #[error("filter for domain {domain} has no event names")]
    EmptyNames { domain: EventDomain },
    #[error("filter for domain {domain} has a blank event name")]
    BlankEventName { domain: EventDomain },
    #[error("unknown OS event: {0}")]
    UnknownOsEvent(String),
}

impl DescriptorError {
    /// True for errors located in a single filter rather than in the descriptor shape.
    pub fn is_filter_error(&self) -> bool {
        !matches!(
            self,
            DescriptorError::EmptyName
                | DescriptorError::PaddedName { .. }
                | DescriptorError::EmptyFilters { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherDescriptor {
    pub name: String,
    pub filters: Vec<EventFilter>,
}

impl WatcherDescriptor {
    pub fn new(name: impl Into<String>, filters: Vec<EventFilter>) -> Self {
        Self {
            name: name.into(),
            filters,
        }
    }

    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if self.name.trim() != self.name {
            return Err(DescriptorError::PaddedName {
                name: self.name.clone(),
            });
        }
        if self.filters.is_empty() {
            return Err(DescriptorError::EmptyFilters {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn matches(&self, event: &AppEvent) -> bool {
        self.filters.iter().any(|f| f.matches(event))
    }

    pub fn os_events_mask(&self) -> u64 {
        self.filters
            .iter()
            .fold(0, |mask, f| mask | f.os_events_mask())
    }
}

// JSON -> descriptor (configuration shape)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub domain: String,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatcherConfig {
    pub name: String,
    #[serde(default)]
    pub app_event_filters: Vec<FilterConfig>,
}

impl TryFrom<WatcherConfig> for WatcherDescriptor {
    type Error = DescriptorError;

    fn try_from(config: WatcherConfig) -> Result<Self, Self::Error> {
        let filters = config
            .app_event_filters
            .into_iter()
            .map(|f| EventFilter::parse(&f.domain, f.names))
            .collect::<Result<Vec<_>, _>>()?;
        let descriptor = WatcherDescriptor::new(config.name, filters);
        descriptor.validate()?;
        Ok(descriptor)
    }
}
