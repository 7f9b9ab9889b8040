//! Engine orchestration for Idlemine: configuration, the accrual
//! scheduler, manual mining, and the engine actor.
//!
//! # Modules
//!
//! - [`config`] -- Typed YAML configuration with stock-rule defaults
//! - [`scheduler`] -- The fixed-period accrual tick task
//! - [`tick`] -- Pure tick application and the autosave cadence
//! - [`mining`] -- The manual mining state machine
//! - [`engine`] -- The single-task actor that owns the game state
//!
//! # Concurrency model
//!
//! One logical task owns the [`GameState`]; timers and front ends reach
//! it only through channels. The scheduler and an in-flight manual
//! mining action overlap in wall-clock time, but their effects are
//! applied strictly one message at a time, so no locking exists anywhere
//! in the engine.
//!
//! [`GameState`]: idlemine_types::GameState

pub mod config;
pub mod engine;
pub mod mining;
pub mod scheduler;
pub mod tick;

// Re-export primary types at crate root.
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineClosed, EngineHandle};
pub use mining::{ManualMiningAction, MiningStep};
pub use scheduler::{AccrualScheduler, AccrualTick};
