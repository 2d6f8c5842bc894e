//! Per-tick due-time evaluation: decides which messages are due, transmits
//! them, and advances their schedules additively so long-run cadence does
//! not drift under tick jitter.
use crate::scheduler::message::MessageTable;
use crate::transport::can_frame::CanFrame;
use crate::transport::traits::can_bus::CanTransport;

/// Upper bound on catch-up transmissions per message per tick.
///
/// Rescheduling is purely additive (`next_due += cycle_time`), so a stalled
/// scheduler catches up by transmitting every missed occurrence on the next
/// tick. With a degenerate cycle time (zero or negative, meaning "as fast
/// as the tick allows") the catch-up condition never clears; this bound
/// caps the burst so one message can never spin the tick handler. A
/// degenerate message therefore bursts at most this many frames per tick.
pub const MAX_CATCHUP_PER_TICK: u32 = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Transmission tally of a single tick.
pub struct TickOutcome {
    /// Frames handed to the transport successfully.
    pub sent: u32,
    /// Frames the transport refused; the affected messages keep their
    /// normal cadence.
    pub failed: u32,
}

#[derive(Debug, Default)]
/// Owns the running transmission totals and applies the scheduling rules
/// to a message table on every tick.
pub struct SchedulerEngine {
    frames_sent: u64,
    send_failures: u64,
}

impl SchedulerEngine {
    pub const fn new() -> Self {
        Self {
            frames_sent: 0,
            send_failures: 0,
        }
    }

    /// Total frames handed to the transport since construction.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Total transmissions the transport refused since construction.
    pub fn send_failures(&self) -> u64 {
        self.send_failures
    }

    /// Evaluate one tick at monotonic time `now_ms`.
    ///
    /// For each enabled message, in table order:
    /// - unarmed messages arm at `now_ms` and transmit once immediately
    ///   (no backlog of "missed" sends from before they were enabled);
    /// - armed messages catch up every occurrence with `next_due < now`,
    ///   bounded by [`MAX_CATCHUP_PER_TICK`], advancing the schedule by
    ///   exactly `cycle_time_ms` per transmission, never re-sampled from
    ///   "now", so systematic tick latency does not accumulate into
    ///   long-run period drift.
    ///
    /// Transmission is fire-and-forget: a refused frame is counted, the
    /// schedule still advances, and evaluation moves on to the next
    /// message. This method cannot fail; a failing tick would stall every
    /// other message's due-time evaluation.
    pub async fn on_tick<C: CanTransport, const N: usize>(
        &mut self,
        table: &mut MessageTable<N>,
        now_ms: u64,
        bus: &mut C,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for message in table.iter_mut() {
            // Disabled: skipped entirely, bookkeeping frozen.
            if !message.is_enabled() {
                continue;
            }

            let step = if message.cycle_time_ms > 0 {
                message.cycle_time_ms as u64
            } else {
                0
            };

            if !message.is_armed() {
                // First tick after enabling: arm at "now" and fire once.
                let sent = Self::transmit_one(
                    bus,
                    message.can_id,
                    message.extended,
                    message.payload(),
                    &mut outcome,
                )
                .await;
                message.next_due_ms = now_ms + step;
                self.tally(sent);
                continue;
            }

            let mut burst = 0;
            while now_ms > message.next_due_ms && burst < MAX_CATCHUP_PER_TICK {
                let sent = Self::transmit_one(
                    bus,
                    message.can_id,
                    message.extended,
                    message.payload(),
                    &mut outcome,
                )
                .await;
                message.next_due_ms += step;
                burst += 1;
                self.tally(sent);
                if !sent {
                    // Keep cadence, but end this message's burst and move
                    // on to the next message.
                    break;
                }
            }
        }

        outcome
    }

    async fn transmit_one<C: CanTransport>(
        bus: &mut C,
        can_id: u32,
        extended: bool,
        payload: &[u8; 8],
        outcome: &mut TickOutcome,
    ) -> bool {
        let frame = CanFrame::new(can_id, extended, *payload);
        match bus.transmit(&frame).await {
            Ok(()) => {
                outcome.sent += 1;
                true
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "TX refused for id {=u32:#x}: {}",
                    can_id,
                    defmt::Debug2Format(&_err)
                );
                outcome.failed += 1;
                false
            }
        }
    }

    fn tally(&mut self, sent: bool) {
        if sent {
            self.frames_sent += 1;
        } else {
            self.send_failures += 1;
        }
    }
}
