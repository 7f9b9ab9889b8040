//! Error types for the engine binary.
//!
//! Only startup can fail hard: once the engine loop is running, every
//! failure is absorbed and logged per the engine's propagation policy.

/// Errors that can occur while bringing the engine up.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(#[from] idlemine_core::ConfigError),

    /// The save backend could not be initialized.
    #[error("store error: {0}")]
    Store(#[from] idlemine_store::StoreError),
}
