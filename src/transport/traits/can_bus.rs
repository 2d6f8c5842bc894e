//! Minimal abstraction for a transmit-capable CAN bus channel. Allows the
//! scheduler to plug into various implementations (embedded HAL, desktop
//! driver, etc.).
use core::future::Future;

use crate::transport::can_frame::CanFrame;
use crate::transport::BusConfig;

/// Contract to acquire a bus channel and emit frames on it.
///
/// The channel handle is part of the implementor's own state: after a
/// successful [`open`](CanTransport::open) the instance is the handle, and
/// [`close`](CanTransport::close) releases it again.
pub trait CanTransport {
    type Error: core::fmt::Debug;

    /// Acquire exclusive access to the bus channel at the fixed
    /// configuration. Must leave the implementor unchanged on failure.
    fn open<'a>(
        &'a mut self,
        config: &'a BusConfig,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;

    /// Emit one frame on the bus. Asynchronous to accommodate non-blocking
    /// drivers; implementations should bound the wait (see
    /// [`TRANSMIT_TIMEOUT_MS`](crate::transport::TRANSMIT_TIMEOUT_MS)).
    fn transmit<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;

    /// Release the channel. Best-effort and idempotent: closing an already
    /// closed channel is a no-op, never an error.
    fn close<'a>(&'a mut self) -> impl Future<Output = ()> + 'a;
}
