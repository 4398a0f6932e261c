use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_notifier::config::AppConfig;
use order_notifier::domain::order::InboundEvent;
use order_notifier::messaging::{LoggingSender, NotificationDispatcher};
use order_notifier::metrics::{self, Metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_notifier=debug"))
        )
        .init();

    tracing::info!("🚀 Starting order notifier");

    // === 1. Shipping engine from the configured lead-time table ===
    let engine = Arc::new(config.shipping_engine()?);
    tracing::info!(
        weekly_dispatch_supplier = ?engine.table().weekly_dispatch_supplier(),
        precedence = ?engine.precedence(),
        "Shipping engine ready"
    );

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(Metrics::new()?);

    // Metrics server runs on its own thread and runtime
    let metrics_registry = Arc::new(metrics.registry().clone());
    let metrics_port = config.metrics_port;
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Metrics runtime error: {}", e);
                return;
            }
        };
        rt.block_on(async {
            if let Err(e) = metrics::start_metrics_server(metrics_registry, metrics_port).await {
                tracing::error!("Metrics server error: {}", e);
            }
        });
    });

    // === 3. Dispatcher ===
    let sender = Arc::new(LoggingSender::new(config.sender_address.clone()));
    let dispatcher = NotificationDispatcher::new(sender, engine, config.templates.clone(), metrics);

    // === 4. Process newline-delimited events from stdin ===
    tracing::info!("📝 Reading events from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (mut sent, mut failed) = (0u64, 0u64);

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let event: InboundEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed event");
                continue;
            }
        };

        // Failures are already logged and counted by the dispatcher
        let result = match &event {
            InboundEvent::Order { kind, payload } => {
                dispatcher.dispatch_order_event(*kind, payload).await
            }
            InboundEvent::InboundMessage(message) => dispatcher.auto_reply(message).await,
        };
        match result {
            Ok(_) => sent += 1,
            Err(_) => failed += 1,
        }
    }

    tracing::info!(sent = sent, failed = failed, "🎉 Input exhausted, shutting down");

    Ok(())
}
