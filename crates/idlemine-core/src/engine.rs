//! The engine actor: single-task ownership of the game state.
//!
//! All mutation happens on one logical task. Timers and front ends talk
//! to it through channels: the accrual scheduler sends tick messages,
//! front ends send [`EngineCommand`] values, and every observable state
//! change goes out as an [`EngineEvent`] on a broadcast channel. Because
//! each message is handled to completion before the next, a scheduler
//! tick and a mining completion can never interleave mid-mutation -- the
//! single-threaded discipline of the original, made structural.
//!
//! # Startup sequence
//!
//! `run()` performs the offline reconciliation (emitting its event to
//! already-attached subscribers), starts the scheduler, then enters the
//! message loop. Shutdown -- via command, dropping the last handle, or
//! the binary's signal handler -- always ends with a final save.

use std::path::Path;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use idlemine_economy::{offline, purchase, rate, withdraw, EconomyError};
use idlemine_store::Gateway;
use idlemine_types::{EngineCommand, EngineEvent, GameState};

use crate::config::EngineConfig;
use crate::mining::{ManualMiningAction, MiningStep};
use crate::scheduler::{AccrualScheduler, AccrualTick};
use crate::tick;

/// Capacity of the command channel.
const COMMAND_CAPACITY: usize = 32;

/// Capacity of the scheduler tick channel.
const TICK_CAPACITY: usize = 8;

/// Capacity of the event broadcast channel.
const EVENT_CAPACITY: usize = 256;

/// The engine stopped and can no longer accept commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine is no longer running")]
pub struct EngineClosed;

/// Cloneable handle for submitting commands and subscribing to events.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::Sender<EngineCommand>,
    events: broadcast::Sender<EngineEvent>,
}

impl EngineHandle {
    /// Submit a command to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineClosed`] once the engine has stopped.
    pub async fn send(&self, command: EngineCommand) -> Result<(), EngineClosed> {
        self.commands
            .send(command)
            .await
            .map_err(|_err| EngineClosed)
    }

    /// Subscribe to engine events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}

/// What the message loop should do after a command was handled.
enum Directive {
    /// Keep looping.
    Continue,
    /// A mining attempt just began: restart the step timer so the first
    /// step lands one full step interval from now.
    ArmMiningTimer,
    /// Save and stop.
    Shutdown,
}

/// State and collaborators shared by the tick and command handlers.
struct EngineCtx {
    state: GameState,
    gateway: Gateway,
    config: EngineConfig,
    mining: ManualMiningAction,
    events: broadcast::Sender<EngineEvent>,
}

impl EngineCtx {
    fn emit(&self, event: EngineEvent) {
        // A send error only means no subscriber is attached right now.
        let _ = self.events.send(event);
    }

    fn emit_balance(&self) {
        self.emit(EngineEvent::BalanceChanged {
            balance: self.state.balance,
            mined: self.state.mined,
            hashrate: self.state.hashrate,
        });
    }

    fn emit_economy_error(&self, error: &EconomyError) {
        debug!(%error, "command rejected");
        self.emit(EngineEvent::Error {
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    /// Persist, absorbing failures: the state stays valid in memory and
    /// the next save retries.
    async fn save_quiet(&mut self) {
        if let Err(e) = self.gateway.save(&mut self.state).await {
            warn!(error = %e, "save failed, state retained in memory");
        }
    }

    async fn on_accrual_tick(&mut self) {
        if tick::apply_accrual(&mut self.state).is_none() {
            return;
        }
        self.emit_balance();

        if tick::autosave_due(
            &self.state,
            Utc::now(),
            self.config.accrual.autosave_interval(),
        ) {
            self.save_quiet().await;
        }
    }

    async fn on_mining_step(&mut self) {
        if self.mining.advance() == MiningStep::Completed {
            let amount = rate::manual_mine_payout(self.state.hashrate);
            self.state.balance = self.state.balance.saturating_add(amount);
            self.state.mined = self.state.mined.saturating_add(amount);

            info!(%amount, "manual mining completed");
            self.emit(EngineEvent::MiningCompleted { amount });
            self.emit_balance();
            self.save_quiet().await;
        }
    }

    async fn handle_command(&mut self, command: EngineCommand) -> Directive {
        match command {
            EngineCommand::StartManualMine => {
                if self.mining.begin() {
                    Directive::ArmMiningTimer
                } else {
                    Directive::Continue
                }
            }

            EngineCommand::BuyUpgrade { upgrade } => {
                match purchase::buy(&mut self.state, upgrade) {
                    Ok(receipt) => {
                        self.emit(EngineEvent::UpgradePurchased {
                            upgrade: receipt.upgrade,
                            hashrate_increment: receipt.hashrate_increment,
                        });
                        self.emit_balance();
                        self.save_quiet().await;
                    }
                    Err(e) => self.emit_economy_error(&e),
                }
                Directive::Continue
            }

            EngineCommand::Withdraw {
                amount,
                destination,
            } => {
                match withdraw::withdraw(&mut self.state, amount, &destination) {
                    Ok(receipt) => {
                        self.emit(EngineEvent::WithdrawalAccepted {
                            id: receipt.id,
                            amount: receipt.amount,
                            destination: receipt.destination,
                        });
                        self.emit_balance();
                        self.save_quiet().await;
                    }
                    Err(e) => self.emit_economy_error(&e),
                }
                Directive::Continue
            }

            EngineCommand::ExportSnapshot => {
                let dir = Path::new(&self.config.storage.export_dir);
                match self.gateway.export_snapshot(&self.state, dir).await {
                    Ok(path) => {
                        info!(path = %path.display(), "snapshot exported");
                        self.emit(EngineEvent::SnapshotExported {
                            path: path.display().to_string(),
                        });
                    }
                    Err(e) => warn!(error = %e, "snapshot export failed"),
                }
                Directive::Continue
            }

            EngineCommand::Save => {
                self.save_quiet().await;
                Directive::Continue
            }

            EngineCommand::Shutdown => Directive::Shutdown,
        }
    }
}

/// The engine actor. Owns the [`GameState`] for its whole life.
pub struct Engine {
    ctx: EngineCtx,
    scheduler: AccrualScheduler,
    ticks_tx: mpsc::Sender<AccrualTick>,
    ticks_rx: mpsc::Receiver<AccrualTick>,
    commands_tx: mpsc::Sender<EngineCommand>,
    commands_rx: mpsc::Receiver<EngineCommand>,
}

impl Engine {
    /// Create an engine over a loaded (or default) state.
    pub fn new(state: GameState, gateway: Gateway, config: EngineConfig) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (ticks_tx, ticks_rx) = mpsc::channel(TICK_CAPACITY);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let scheduler = AccrualScheduler::new(config.accrual.tick_interval());
        let mining = ManualMiningAction::new(config.mining.step_percent);

        Self {
            ctx: EngineCtx {
                state,
                gateway,
                config,
                mining,
                events,
            },
            scheduler,
            ticks_tx,
            ticks_rx,
            commands_tx,
            commands_rx,
        }
    }

    /// A handle for submitting commands and subscribing to events.
    ///
    /// Subscribe before spawning [`run`] to observe the startup events
    /// (offline earnings in particular).
    ///
    /// [`run`]: Engine::run
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            commands: self.commands_tx.clone(),
            events: self.ctx.events.clone(),
        }
    }

    /// Run the engine until shutdown; returns the final state.
    ///
    /// The loop ends on a [`EngineCommand::Shutdown`] or when the last
    /// [`EngineHandle`] is dropped. Either way the state is saved one
    /// final time before it is returned.
    pub async fn run(self) -> GameState {
        let Self {
            mut ctx,
            mut scheduler,
            ticks_tx,
            mut ticks_rx,
            commands_tx,
            mut commands_rx,
        } = self;
        // The actor's own sender must go away so the loop ends when the
        // last external handle is dropped.
        drop(commands_tx);

        info!("engine starting");

        if let Some(report) =
            offline::reconcile(&mut ctx.state, Utc::now(), ctx.config.offline.cap_secs)
        {
            ctx.emit(EngineEvent::OfflineEarnings {
                amount: report.earnings,
                elapsed_seconds: report.elapsed_seconds,
            });
            ctx.emit_balance();
        }

        scheduler.start(ticks_tx.clone());

        let mut mining_timer = tokio::time::interval(ctx.config.mining.step_interval());

        loop {
            tokio::select! {
                Some(AccrualTick) = ticks_rx.recv() => ctx.on_accrual_tick().await,

                _ = mining_timer.tick(), if ctx.mining.in_progress() => {
                    ctx.on_mining_step().await;
                }

                command = commands_rx.recv() => {
                    let Some(command) = command else { break };
                    match ctx.handle_command(command).await {
                        Directive::Continue => {}
                        Directive::ArmMiningTimer => mining_timer.reset(),
                        Directive::Shutdown => break,
                    }
                }
            }
        }

        scheduler.stop();
        ctx.save_quiet().await;
        info!(balance = %ctx.state.balance, mined = %ctx.state.mined, "engine stopped");
        ctx.state
    }
}
