// Sink that keeps every delivery in memory for inspection.

use crate::core::ports::WatcherSink;
use crate::core::watcher::event::AppEvent;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
pub struct CollectingSink {
    deliveries: Mutex<Vec<(String, AppEvent)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic in another holder must not lose deliveries.
    fn guard(&self) -> MutexGuard<'_, Vec<(String, AppEvent)>> {
        self.deliveries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliveries in arrival order as (watcher name, event).
    pub fn events(&self) -> Vec<(String, AppEvent)> {
        self.guard().clone()
    }

    pub fn events_for(&self, watcher: &str) -> Vec<AppEvent> {
        self.events()
            .into_iter()
            .filter(|(name, _)| name == watcher)
            .map(|(_, event)| event)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl WatcherSink for CollectingSink {
    fn deliver(&self, watcher: &str, event: &AppEvent) {
        self.guard().push((watcher.to_string(), event.clone()));
    }
}

#[cfg(test)]
mod collecting_sink_tests {
    use super::*;
    use crate::test_support::fixtures::events::app_event::make_os_event;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    #[rstest]
    fn it_should_collect_deliveries_in_order() {
        let sink = CollectingSink::new();
        sink.deliver("a", &make_os_event("APP_CRASH"));
        sink.deliver("b", &make_os_event("APP_FREEZE"));
        sink.deliver("a", &make_os_event("APP_KILLED"));

        assert_eq!(sink.len(), 3);
        let names: Vec<String> = sink.events_for("a").into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["APP_CRASH", "APP_KILLED"]);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[rstest]
    fn it_should_keep_collecting_after_a_holder_panicked() {
        let sink = Arc::new(CollectingSink::new());
        sink.deliver("a", &make_os_event("APP_CRASH"));

        let holder = sink.clone();
        let joined = thread::spawn(move || {
            let _guard = holder.deliveries.lock().unwrap();
            panic!("panicked while holding the deliveries");
        })
        .join();
        assert!(joined.is_err());
        assert!(sink.deliveries.is_poisoned());

        sink.deliver("a", &make_os_event("APP_FREEZE"));
        let names: Vec<String> = sink.events_for("a").into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["APP_CRASH", "APP_FREEZE"]);
        sink.clear();
        assert!(sink.is_empty());
    }
}
