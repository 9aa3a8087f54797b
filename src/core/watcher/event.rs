// Application event record as published by the event-reporting service.
//
// Events arrive as JSON (one per line in the shell). `eventType`, `params` and
// `occurredAt` are optional on the wire. `params` is always a key/value object.

use crate::core::watcher::domain::EventDomain;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

pub type EventParams = Map<String, Json>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EventType {
    #[default]
    Fault,
    Statistic,
    Security,
    Behavior,
}

impl TryFrom<u8> for EventType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EventType::Fault),
            2 => Ok(EventType::Statistic),
            3 => Ok(EventType::Security),
            4 => Ok(EventType::Behavior),
            other => Err(format!("unknown event type: {other}")),
        }
    }
}

impl From<EventType> for u8 {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Fault => 1,
            EventType::Statistic => 2,
            EventType::Security => 3,
            EventType::Behavior => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEvent {
    pub domain: EventDomain,
    pub name: String,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default = "empty_params")]
    pub params: EventParams,
    #[serde(default = "now_millis")]
    pub occurred_at: i64,
}

fn empty_params() -> EventParams {
    EventParams::new()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl AppEvent {
    pub fn new(domain: EventDomain, name: impl Into<String>) -> Self {
        Self {
            domain,
            name: name.into(),
            event_type: EventType::default(),
            params: empty_params(),
            occurred_at: now_millis(),
        }
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_params(mut self, params: EventParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_occurred_at(mut self, occurred_at: i64) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}
