// An event filter selects events by domain and by event name.
//
// Rules
// - An event matches iff its domain equals the filter domain and its name is one of `names`.
// - `names` is never empty and never holds a blank name.
// - Under the OS domain every name must belong to the OS event catalog.
// - Duplicate names collapse onto their first occurrence.

use crate::core::watcher::descriptor::DescriptorError;
use crate::core::watcher::domain::EventDomain;
use crate::core::watcher::event::AppEvent;
use crate::core::watcher::os_event::OsEvent;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    domain: EventDomain,
    names: Vec<String>,
}

impl EventFilter {
    pub fn new<I, S>(domain: EventDomain, names: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for name in names.into_iter().map(Into::<String>::into) {
            if name.trim().is_empty() {
                return Err(DescriptorError::BlankEventName { domain });
            }
            if domain == EventDomain::Os && name.parse::<OsEvent>().is_err() {
                return Err(DescriptorError::UnknownOsEvent(name));
            }
            if seen.insert(name.clone()) {
                unique.push(name);
            }
        }
        if unique.is_empty() {
            return Err(DescriptorError::EmptyNames { domain });
        }
        Ok(Self {
            domain,
            names: unique,
        })
    }

    /// Builds a filter from a raw domain string as found in configuration.
    pub fn parse<I, S>(domain: &str, names: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain = domain
            .parse::<EventDomain>()
            .map_err(|e| DescriptorError::UnknownDomain(e.0))?;
        Self::new(domain, names)
    }

    /// Every event of the OS catalog.
    pub fn all_os_events() -> Self {
        Self {
            domain: EventDomain::Os,
            names: OsEvent::names(),
        }
    }

    pub fn domain(&self) -> EventDomain {
        self.domain
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matches(&self, event: &AppEvent) -> bool {
        self.domain == event.domain && self.names.iter().any(|n| *n == event.name)
    }

    /// Listening mask bits contributed by this filter; zero outside the OS domain.
    pub fn os_events_mask(&self) -> u64 {
        if self.domain != EventDomain::Os {
            return 0;
        }
        self.names
            .iter()
            .filter_map(|n| n.parse::<OsEvent>().ok())
            .fold(0, |mask, event| mask | event.mask())
    }
}
