//! `cycletx` library: cyclic transmission of fixed-format CAN frames for
//! `no_std` environments. The crate exposes the infrastructure modules
//! (hex codec), the scheduling core (message table, tick engine, lifecycle
//! supervisor), and the seams the host firmware implements (CAN transport,
//! tick source, message store).
#![no_std]
//==================================================================================
/// Domain errors (message table capacity and related issues).
pub mod error;
/// Total text/byte conversions for payloads and identifiers.
pub mod infra;
/// Scheduling core: message definitions, due-time evaluation, and the
/// start/stop lifecycle supervisor.
pub mod scheduler;
/// Persistence seam used to round-trip message definitions against an
/// external store.
pub mod store;
/// Transport layer: frame representation, bus and tick-source traits, and
/// the provided periodic ticker.
pub mod transport;
//==================================================================================
