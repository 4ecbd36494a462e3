//! `meye-worker` - consumes the event queue and credits awarded XP to PJs.
//!
//! Configuration comes from `MEYE__*` environment variables (see
//! [`meye_core::config::AppConfig`]). PJs live in Redis under
//! `MEYE__REDIS__KEY_PREFIX`; the events a PJ write produces are pushed onto
//! the worker's own queue in the same atomic write. The process runs until
//! Ctrl+C, then finishes the envelope in hand and exits.

use std::error::Error;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meye_core::adapters::{
    EventWorker, EventWorkerConfig, IdempotentHandler, InMemoryProcessedEventStore,
    RedisEventQueue, RedisPjRepository, RetentionSweeper,
};
use meye_core::application::XpAssignedHandler;
use meye_core::config::{AppConfig, LoggingConfig};
use meye_core::ports::{EventHandler, EventSource, PjRepository};

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_new(&logging.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    tracing::info!(
        queue = %config.worker.queue_name,
        key_prefix = %config.redis.key_prefix,
        idempotent = config.worker.idempotent,
        "Starting meye worker"
    );

    let conn = redis::Client::open(config.redis.url.as_str())?
        .get_multiplexed_tokio_connection()
        .await?;

    let queue_name = config.worker.queue_name.as_str();
    let source: Arc<dyn EventSource> = Arc::new(RedisEventQueue::new(conn.clone(), queue_name));
    let pjs: Arc<dyn PjRepository> = Arc::new(RedisPjRepository::new(
        conn,
        config.redis.key_prefix.as_str(),
        queue_name,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let xp_assigned = XpAssignedHandler::new(pjs);
    let handler: Arc<dyn EventHandler> = if config.worker.idempotent {
        let processed = Arc::new(InMemoryProcessedEventStore::new());
        let sweeper = RetentionSweeper::new(
            processed.clone(),
            config.worker.processed_retention(),
            config.worker.cleanup_interval(),
        );
        let sweeper_shutdown = shutdown_rx.clone();
        tokio::spawn(async move { sweeper.run(sweeper_shutdown).await });

        Arc::new(IdempotentHandler::new(xp_assigned, processed))
    } else {
        Arc::new(xp_assigned)
    };

    let worker = EventWorker::with_config(
        source,
        handler,
        EventWorkerConfig::default()
            .with_receive_timeout(config.worker.receive_timeout())
            .with_error_backoff(config.worker.error_backoff()),
    );

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
        let _ = shutdown_tx.send(true);
    });

    worker.run(shutdown_rx).await?;

    tracing::info!("Worker stopped");
    Ok(())
}
