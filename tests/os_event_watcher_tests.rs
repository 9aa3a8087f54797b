// End to end tests for the OS event watcher with the in memory service.
//
// Lifecycle
// - before_all registers "WatcherOsEvent" over the whole OS catalog on a fresh service.
// - after_all clears the watcher table and checks nothing stays listened to.

use app_event_watchers::adapters::in_memory::in_memory_event_service::{
    DuplicatePolicy, InMemoryEventService,
};
use app_event_watchers::adapters::sinks::collecting_sink::CollectingSink;
use app_event_watchers::application::errors::RegistrationError;
use app_event_watchers::application::watcher_registry::WatcherRegistry;
use app_event_watchers::core::watcher::descriptor::{WatcherConfig, WatcherDescriptor};
use app_event_watchers::core::watcher::domain::EventDomain;
use app_event_watchers::core::watcher::event::AppEvent;
use app_event_watchers::core::watcher::filter::EventFilter;
use app_event_watchers::core::watcher::os_event::OsEvent;
use rstest::{fixture, rstest};
use std::sync::Arc;
use tokio::join;

const WATCHER_NAME: &str = "WatcherOsEvent";

struct Suite {
    service: Arc<InMemoryEventService>,
    registry: WatcherRegistry<InMemoryEventService>,
    sink: Arc<CollectingSink>,
}

fn crash_and_freeze() -> WatcherDescriptor {
    WatcherDescriptor::new(
        WATCHER_NAME,
        vec![EventFilter::new(EventDomain::Os, ["APP_CRASH", "APP_FREEZE"]).unwrap()],
    )
}

#[fixture]
fn before_each() -> Suite {
    let service = Arc::new(InMemoryEventService::new());
    Suite {
        registry: WatcherRegistry::new(service.clone()),
        service,
        sink: Arc::new(CollectingSink::new()),
    }
}

#[fixture]
async fn before_all(before_each: Suite) -> Suite {
    let descriptor = WatcherDescriptor::new(WATCHER_NAME, vec![EventFilter::all_os_events()]);
    before_each
        .registry
        .register(descriptor, before_each.sink.clone())
        .await
        .expect("before_all registration failed");
    before_each
}

async fn after_all(suite: Suite) {
    suite.service.clear().await;
    assert!(suite.service.is_empty().await);
    assert_eq!(suite.service.listened_os_events_mask().await, 0);
}

#[rstest]
#[tokio::test]
async fn registering_the_os_watcher_succeeds(before_each: Suite) {
    let result = before_each
        .registry
        .register(crash_and_freeze(), before_each.sink.clone())
        .await;
    assert_eq!(result, Ok(()));
    assert!(before_each.registry.is_active(WATCHER_NAME).await.unwrap());
    after_all(before_each).await;
}

#[rstest]
#[tokio::test]
async fn registering_the_same_descriptor_twice_is_rejected(before_each: Suite) {
    let first = before_each
        .registry
        .register(crash_and_freeze(), before_each.sink.clone())
        .await;
    let second = before_each
        .registry
        .register(crash_and_freeze(), before_each.sink.clone())
        .await;
    assert_eq!(first, Ok(()));
    assert_eq!(
        second,
        Err(RegistrationError::DuplicateName {
            name: WATCHER_NAME.into()
        })
    );
    after_all(before_each).await;
}

#[rstest]
#[tokio::test]
async fn registering_the_same_descriptor_twice_replaces_under_the_replace_policy() {
    let service = Arc::new(InMemoryEventService::with_policy(DuplicatePolicy::Replace));
    let registry = WatcherRegistry::new(service.clone());
    let sink = Arc::new(CollectingSink::new());
    registry.register(crash_and_freeze(), sink.clone()).await.unwrap();
    registry.register(crash_and_freeze(), sink.clone()).await.unwrap();
    assert_eq!(registry.active_watchers().await.unwrap().len(), 1);

    service
        .publish(&AppEvent::new(EventDomain::Os, "APP_CRASH"))
        .await
        .unwrap();
    assert_eq!(sink.len(), 1);
}

#[rstest]
#[tokio::test]
async fn registering_an_unnamed_watcher_is_rejected(before_each: Suite) {
    let descriptor = WatcherDescriptor::new("", crash_and_freeze().filters);
    let result = before_each
        .registry
        .register(descriptor, before_each.sink.clone())
        .await;
    assert!(matches!(result, Err(RegistrationError::InvalidDescriptor(_))));
    after_all(before_each).await;
}

#[rstest]
#[tokio::test]
async fn a_padded_name_cannot_shadow_a_registered_watcher(before_each: Suite) {
    let padded = WatcherDescriptor::new(format!(" {WATCHER_NAME}"), crash_and_freeze().filters);
    before_each
        .registry
        .register(crash_and_freeze(), before_each.sink.clone())
        .await
        .unwrap();
    let result = before_each
        .registry
        .register(padded, before_each.sink.clone())
        .await;
    assert!(matches!(result, Err(RegistrationError::InvalidDescriptor(_))));

    let delivered = before_each
        .service
        .publish(&AppEvent::new(EventDomain::Os, "APP_CRASH"))
        .await
        .unwrap();
    assert_eq!(delivered, vec![WATCHER_NAME.to_string()]);
    after_all(before_each).await;
}

#[rstest]
#[tokio::test]
async fn registering_a_watcher_without_filters_is_rejected(before_each: Suite) {
    let descriptor = WatcherDescriptor::new(WATCHER_NAME, vec![]);
    let result = before_each
        .registry
        .register(descriptor, before_each.sink.clone())
        .await;
    assert!(matches!(result, Err(RegistrationError::InvalidDescriptor(_))));
    assert!(before_each.registry.active_watchers().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn the_os_watcher_receives_launch_but_not_unrelated_events(#[future] before_all: Suite) {
    let suite = before_all.await;
    let launch = AppEvent::new(EventDomain::Os, "APP_LAUNCH");
    let unrelated = AppEvent::new(EventDomain::Os, "UNRELATED");

    assert_eq!(
        suite.service.publish(&launch).await.unwrap(),
        vec![WATCHER_NAME.to_string()]
    );
    assert!(suite.service.publish(&unrelated).await.unwrap().is_empty());

    let received = suite.sink.events_for(WATCHER_NAME);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name, "APP_LAUNCH");
    after_all(suite).await;
}

#[rstest]
#[tokio::test]
async fn the_os_watcher_receives_exactly_the_catalog_events(#[future] before_all: Suite) {
    let suite = before_all.await;
    for domain in EventDomain::ALL {
        for event in OsEvent::ALL {
            let delivered = suite
                .service
                .publish(&AppEvent::new(domain, event.name()))
                .await
                .unwrap();
            assert_eq!(delivered.is_empty(), domain != EventDomain::Os);
        }
    }
    assert_eq!(suite.sink.len(), OsEvent::ALL.len());
    assert_eq!(suite.service.listened_os_events_mask().await, 0xFFF);
    after_all(suite).await;
}

#[rstest]
#[tokio::test]
async fn the_os_watcher_stops_receiving_after_unregistration(#[future] before_all: Suite) {
    let suite = before_all.await;
    suite.registry.unregister(WATCHER_NAME).await.unwrap();
    suite
        .service
        .publish(&AppEvent::new(EventDomain::Os, "APP_CRASH"))
        .await
        .unwrap();
    assert!(suite.sink.is_empty());
    assert_eq!(
        suite.registry.unregister(WATCHER_NAME).await,
        Err(RegistrationError::NotFound {
            name: WATCHER_NAME.into()
        })
    );
}

#[rstest]
#[tokio::test]
async fn registration_fails_while_the_service_is_unreachable(before_each: Suite) {
    before_each.service.toggle_offline();
    let result = before_each
        .registry
        .register(crash_and_freeze(), before_each.sink.clone())
        .await;
    assert!(matches!(
        result,
        Err(RegistrationError::ExternalUnavailable(_))
    ));
}

#[rstest]
#[tokio::test]
async fn concurrent_registrations_under_one_name_admit_exactly_one(before_each: Suite) {
    let (first, second) = join!(
        before_each
            .registry
            .register(crash_and_freeze(), before_each.sink.clone()),
        before_each
            .registry
            .register(crash_and_freeze(), before_each.sink.clone())
    );
    assert!(first.is_ok() ^ second.is_ok(), "exactly one should succeed");
    let error = first.err().or(second.err()).unwrap();
    assert_eq!(
        error,
        RegistrationError::DuplicateName {
            name: WATCHER_NAME.into()
        }
    );
    after_all(before_each).await;
}

#[rstest]
#[tokio::test]
async fn a_watcher_config_from_json_is_registered(before_each: Suite) {
    let config: WatcherConfig = serde_json::from_str(
        r#"{
            "name": "WatcherOsEvent",
            "appEventFilters": [
                { "domain": "OS", "names": ["APP_CRASH", "APP_FREEZE", "APP_LAUNCH"] }
            ]
        }"#,
    )
    .unwrap();
    before_each
        .registry
        .register_config(config, before_each.sink.clone())
        .await
        .unwrap();
    let event: AppEvent =
        serde_json::from_str(r#"{"domain":"OS","name":"APP_LAUNCH","params":{"time":123}}"#)
            .unwrap();
    before_each.service.publish(&event).await.unwrap();
    assert_eq!(before_each.sink.events_for(WATCHER_NAME)[0].params["time"], 123);
    after_all(before_each).await;
}
