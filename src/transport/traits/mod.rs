//! Abstraction traits implemented by the host firmware (CAN bus and tick
//! source).
pub mod can_bus;
pub mod tick_source;
