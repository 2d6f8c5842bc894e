//! Tick source abstraction: the periodic driver behind the scheduler's
//! due-time evaluation.
use core::future::Future;

/// Best-effort periodic callback mechanism at a configurable target
/// period.
///
/// Ticks arrive approximately at the configured period; jitter and
/// occasional late ticks are tolerated by the scheduler's additive
/// catch-up rescheduling, so implementations need no hard real-time
/// guarantees, only a stable monotonic time base.
pub trait TickSource {
    /// Begin ticking. Starting an already started source is a no-op.
    fn start(&mut self);

    /// Halt ticking. Stopping an already stopped source is a no-op.
    /// After `stop()` returns, [`next_tick`](TickSource::next_tick) must
    /// not resolve until the source is started again.
    fn stop(&mut self);

    /// Wait for the next tick. Resolves with the current monotonic time in
    /// milliseconds. Pends forever while the source is stopped.
    fn next_tick(&mut self) -> impl Future<Output = u64> + '_;
}
