use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use app_event_watchers::adapters::in_memory::in_memory_event_service::InMemoryEventService;
use app_event_watchers::adapters::sinks::channel_sink::ChannelSink;
use app_event_watchers::application::watcher_registry::WatcherRegistry;
use app_event_watchers::core::watcher::event::AppEvent;
use app_event_watchers::core::watcher::os_event::OsEvent;
use app_event_watchers::shell::config::AppConfig;
use app_event_watchers::shell::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!(
        watchers = config.watchers.len(),
        policy = ?config.duplicate_policy,
        "configuration loaded"
    );

    let service = Arc::new(InMemoryEventService::with_policy(config.duplicate_policy));
    let registry = WatcherRegistry::new(service.clone());
    let (sink, mut deliveries) = ChannelSink::new();
    let sink = Arc::new(sink);

    for watcher in config.watchers {
        let name = watcher.name.clone();
        registry
            .register_config(watcher, sink.clone())
            .await
            .with_context(|| format!("failed to register watcher {name}"))?;
    }
    let mask = service.listened_os_events_mask().await;
    info!(
        mask = %format!("{mask:#x}"),
        events = ?OsEvent::from_mask(mask),
        "listening to OS events"
    );

    let reporter = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(delivery) = deliveries.recv().await {
            count += 1;
            info!(
                watcher = %delivery.watcher,
                domain = %delivery.event.domain,
                event = %delivery.event.name,
                params = %serde_json::Value::Object(delivery.event.params.clone()),
                "event delivered"
            );
        }
        count
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: AppEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(error) => {
                warn!(%error, "skipping malformed event");
                continue;
            }
        };
        let receivers = service.publish(&event).await?;
        if receivers.is_empty() {
            info!(domain = %event.domain, event = %event.name, "event has no watcher");
        }
    }

    service.clear().await;
    drop(sink);
    let delivered = reporter.await.context("delivery reporter panicked")?;
    info!(delivered, "shutting down");
    Ok(())
}
