//! Idlemine engine binary.
//!
//! Headless idle-mining simulation: automatic accrual keeps running,
//! progress autosaves, and a front end (or just the log) observes the
//! event stream. This binary wires the pieces together; every game rule
//! lives in the library crates.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `idlemine-config.yaml`
//! 3. Connect the save backend and build the persistence gateway
//! 4. Load the saved state (defaults when absent or corrupt)
//! 5. Assemble the engine actor and attach the event logger
//! 6. Run until ctrl-c, then save and report the final balances

mod error;
mod event_log;

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use idlemine_core::config::BackendKind;
use idlemine_core::{Engine, EngineConfig};
use idlemine_store::{FileStore, Gateway, MemoryStore, RedisStore, SaveBackend};
use idlemine_types::EngineCommand;

use crate::error::EngineError;

/// Application entry point for the Idlemine engine.
///
/// Initializes all subsystems and runs the engine loop until a shutdown
/// signal arrives.
///
/// # Errors
///
/// Returns an error if a startup step fails; once the loop is running,
/// failures are absorbed and logged instead.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("idlemine-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        backend = ?config.storage.backend,
        tick_interval_ms = config.accrual.tick_interval_ms,
        autosave_interval_secs = config.accrual.autosave_interval_secs,
        "Configuration loaded"
    );

    // 3. Connect the save backend and build the persistence gateway.
    let backend = connect_backend(&config).await?;
    let gateway = Gateway::new(backend);

    // 4. Load the saved state. Absent or corrupt records degrade to a
    //    fresh game; offline earnings are reconciled inside the engine.
    let state = gateway.load_or_default().await;
    info!(balance = %state.balance, hashrate = state.hashrate, "Game loaded");

    // 5. Assemble the engine actor and attach the event logger.
    let engine = Engine::new(state, gateway, config);
    let handle = engine.handle();
    let logger = event_log::spawn_event_logger(handle.subscribe());

    let engine_task = tokio::spawn(engine.run());
    info!("Engine running; press ctrl-c to save and exit");

    // 6. Wait for the shutdown signal, then save and stop.
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }

    let _ = handle.send(EngineCommand::Shutdown).await;
    drop(handle);

    let final_state = engine_task.await?;
    let _ = logger.await;

    info!(
        balance = %final_state.balance,
        mined = %final_state.mined,
        hashrate = final_state.hashrate,
        "idlemine-engine shutdown complete"
    );

    Ok(())
}

/// Load the engine configuration from `idlemine-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// a missing file means stock rules.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path = Path::new("idlemine-config.yaml");
    if config_path.exists() {
        let config = EngineConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(EngineConfig::default())
    }
}

/// Build the configured save backend.
async fn connect_backend(config: &EngineConfig) -> Result<SaveBackend, EngineError> {
    match config.storage.backend {
        BackendKind::Redis => {
            let store = RedisStore::connect(
                &config.storage.redis_url,
                config.storage.redis_key.clone(),
            )
            .await?;
            Ok(SaveBackend::Redis(store))
        }
        BackendKind::File => Ok(SaveBackend::File(FileStore::new(&config.storage.save_path))),
        BackendKind::Memory => {
            warn!("memory backend selected: progress will not survive restarts");
            Ok(SaveBackend::Memory(MemoryStore::new()))
        }
    }
}
