//! Transport layer: in-memory frame representation, the bus and
//! tick-source traits implemented by the host firmware, and the provided
//! periodic ticker.
//!
//! ## Timing constants
//!
//! These constants define the defaults and recommended bounds for reliable
//! cyclic transmission.

pub mod can_frame;
pub mod tick;
pub mod traits;

/// Default bus bit rate, in bits per second.
///
/// The scheduler opens its channel at one fixed rate for the whole session;
/// 500 kbit/s is the common default for high-speed CAN test setups.
pub const DEFAULT_BITRATE_BPS: u32 = 500_000;

/// Recommended timeout for a single `transmit()` call (ms).
///
/// Prevents a faulty, disconnected, or saturated bus from stalling the tick
/// loop: while one message's transmission is pending, no other message's
/// due time is evaluated.
///
/// # Timeout rationale
///
/// On a bus @ 500 kbps with CAN arbitration:
/// - Maximum time for one frame (8 bytes): ~0.25 ms (no contention)
/// - With arbitration and retransmissions: ~10–20 ms
/// - Safety margin ×5 → 100 ms
///
/// # Implementation notes
///
/// [`CanTransport`](traits::can_bus::CanTransport) implementations
/// **SHOULD** enforce a timeout on `transmit()` and report expiry through
/// their error type; the scheduler counts the failure and keeps the
/// message at its normal cadence.
///
/// # Example
///
/// ```rust,ignore
/// use embassy_time::{with_timeout, Duration};
/// use cycletx::transport::TRANSMIT_TIMEOUT_MS;
///
/// async fn transmit(&mut self, frame: &CanFrame) -> Result<(), Error> {
///     with_timeout(
///         Duration::from_millis(TRANSMIT_TIMEOUT_MS as u64),
///         self.can.transmit_async(&twai_frame)
///     )
///     .await
///     .map_err(|_| Error::Timeout)?
/// }
/// ```
pub const TRANSMIT_TIMEOUT_MS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Fixed bus channel configuration handed to
/// [`CanTransport::open`](traits::can_bus::CanTransport::open).
pub struct BusConfig {
    /// Bit rate the channel is opened at, in bits per second.
    pub bitrate_bps: u32,
}

impl BusConfig {
    /// Configuration at an explicit bit rate.
    pub const fn new(bitrate_bps: u32) -> Self {
        Self { bitrate_bps }
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BITRATE_BPS)
    }
}
