//! Start/stop lifecycle supervisor driving the scheduler engine.
//!
//! A single task owns the transport, the tick source, and the engine, and
//! loops over two states:
//!
//! * `Stopped`: only the command channel is polled; the bus is closed and
//!   no ticks arrive.
//! * `Running`: the loop selects between the next tick and the next
//!   command; each tick locks the shared message table and runs one
//!   engine pass to completion before anything else happens, so tick
//!   handling is serialized by construction.
//!
//! Commands arrive over a pre-allocated [`embassy_sync::channel::Channel`]
//! (the external command surface); status is published through an optional
//! [`embassy_sync::watch::Watch`]. No allocation is performed by the
//! library and there is no dependency on a particular BSP.

use core::fmt::Debug;

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, mutex::Mutex, watch::Watch,
};
use futures_util::{future::select, future::Either, pin_mut};

use crate::scheduler::engine::SchedulerEngine;
use crate::scheduler::message::MessageTable;
use crate::transport::traits::{can_bus::CanTransport, tick_source::TickSource};
use crate::transport::BusConfig;

/// Commands queued by the external command surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerCommand {
    /// Open the bus and begin ticking. No-op while already running.
    Start,
    /// Halt ticking, then release the bus. No-op while already stopped.
    Stop,
}

/// Lifecycle state of the supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    Stopped,
    Running,
}

/// Observable snapshot published after every transition and tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerStatus {
    pub state: RunState,
    /// Frames handed to the transport since the supervisor was built.
    pub frames_sent: u64,
    /// Transmissions the transport refused. Failures never halt the loop.
    pub send_failures: u64,
    /// `Start` attempts that failed to open the bus (the supervisor stayed
    /// stopped each time).
    pub start_failures: u32,
}

impl SchedulerStatus {
    const fn initial() -> Self {
        Self {
            state: RunState::Stopped,
            frames_sent: 0,
            send_failures: 0,
            start_failures: 0,
        }
    }
}

impl Default for SchedulerStatus {
    fn default() -> Self {
        Self::initial()
    }
}

/// Command channel type the supervisor consumes.
pub type CommandChannel<const CAP: usize> =
    Channel<CriticalSectionRawMutex, SchedulerCommand, CAP>;

/// Status watch type the supervisor publishes to; `OBS` is the maximum
/// number of concurrent status receivers.
pub type StatusWatch<const OBS: usize> = Watch<CriticalSectionRawMutex, SchedulerStatus, OBS>;

/// Message table behind the lock shared between the engine (one tick at a
/// time) and the editing collaborator (one edit at a time).
pub type SharedMessageTable<const N: usize> = Mutex<CriticalSectionRawMutex, MessageTable<N>>;

/// Supervisor task state. Construct with [`SchedulerService::new`], then
/// run [`drive`](SchedulerService::drive) on the executor of your choice.
pub struct SchedulerService<'a, C, T, const N: usize, const CMD_CAP: usize, const OBS: usize>
where
    C: CanTransport,
    T: TickSource,
{
    bus: C,
    ticks: T,
    config: BusConfig,
    engine: SchedulerEngine,
    state: RunState,
    start_failures: u32,
    table: &'a SharedMessageTable<N>,
    commands: &'a CommandChannel<CMD_CAP>,
    status: Option<&'a StatusWatch<OBS>>,
}

impl<'a, C, T, const N: usize, const CMD_CAP: usize, const OBS: usize>
    SchedulerService<'a, C, T, N, CMD_CAP, OBS>
where
    C: CanTransport,
    C::Error: Debug,
    T: TickSource,
{
    /// Assemble a supervisor around a closed bus and a stopped tick
    /// source. Nothing runs until a [`SchedulerCommand::Start`] arrives.
    pub fn new(
        bus: C,
        ticks: T,
        config: BusConfig,
        table: &'a SharedMessageTable<N>,
        commands: &'a CommandChannel<CMD_CAP>,
        status: Option<&'a StatusWatch<OBS>>,
    ) -> Self {
        Self {
            bus,
            ticks,
            config,
            engine: SchedulerEngine::new(),
            state: RunState::Stopped,
            start_failures: 0,
            table,
            commands,
            status,
        }
    }

    /// Run the supervisor loop. Never returns; the task lives as long as
    /// the system schedules frames.
    pub async fn drive(mut self) -> ! {
        self.publish_status();

        loop {
            match self.state {
                RunState::Stopped => {
                    let command = self.commands.receive().await;
                    self.handle_command(command).await;
                }
                RunState::Running => {
                    let mut due_tick = None;
                    let mut pending_command = None;

                    {
                        let tick = self.ticks.next_tick();
                        let command = self.commands.receive();
                        pin_mut!(tick);
                        pin_mut!(command);

                        match select(tick, command).await {
                            Either::Left((now_ms, pending)) => {
                                due_tick = Some(now_ms);
                                drop(pending);
                            }
                            Either::Right((command, pending)) => {
                                pending_command = Some(command);
                                drop(pending);
                            }
                        }
                    }

                    if let Some(now_ms) = due_tick {
                        let table = self.table;
                        let mut table = table.lock().await;
                        self.engine.on_tick(&mut table, now_ms, &mut self.bus).await;
                        drop(table);
                        self.publish_status();
                    }

                    if let Some(command) = pending_command {
                        self.handle_command(command).await;
                    }
                }
            }
        }
    }

    /// Apply one command. Duplicate commands (already in the target state)
    /// are no-ops: the command surface gates availability on the current
    /// state, but the supervisor must not fail when it does not.
    async fn handle_command(&mut self, command: SchedulerCommand) {
        match (command, self.state) {
            (SchedulerCommand::Start, RunState::Stopped) => self.start().await,
            (SchedulerCommand::Stop, RunState::Running) => self.stop().await,
            _ => {}
        }
    }

    /// Acquire the bus, then start ticking. On open failure the supervisor
    /// reports through the status watch and stays stopped; the tick
    /// source is never started without a bus.
    async fn start(&mut self) {
        match self.bus.open(&self.config).await {
            Ok(()) => {
                self.ticks.start();
                self.state = RunState::Running;
                #[cfg(feature = "defmt")]
                defmt::info!("scheduler running @ {} bps", self.config.bitrate_bps);
            }
            Err(_err) => {
                self.start_failures += 1;
                #[cfg(feature = "defmt")]
                defmt::warn!("bus open failed: {}", defmt::Debug2Format(&_err));
            }
        }
        self.publish_status();
    }

    /// Halt ticking first (no further engine pass can begin once
    /// `TickSource::stop` returns), then release the bus. Teardown is
    /// best-effort: `close()` is infallible and idempotent, so the
    /// transition to `Stopped` always completes.
    async fn stop(&mut self) {
        self.ticks.stop();
        self.bus.close().await;
        self.state = RunState::Stopped;
        #[cfg(feature = "defmt")]
        defmt::info!("scheduler stopped");
        self.publish_status();
    }

    fn publish_status(&self) {
        if let Some(watch) = self.status {
            watch.sender().send(SchedulerStatus {
                state: self.state,
                frames_sent: self.engine.frames_sent(),
                send_failures: self.engine.send_failures(),
                start_failures: self.start_failures,
            });
        }
    }
}
