use crate::core::watcher::domain::EventDomain;
use crate::core::watcher::event::{AppEvent, EventParams};
use serde_json::json;

pub fn make_os_event(name: &str) -> AppEvent {
    AppEvent::new(EventDomain::Os, name)
        .with_params(EventParams::from_iter([("time".to_string(), json!(123))]))
        .with_occurred_at(1_700_000_000_000)
}
