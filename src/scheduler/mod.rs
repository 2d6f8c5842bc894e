//! Scheduling core: the schedulable message definition and its
//! fixed-capacity table, the per-tick due-time engine, and the start/stop
//! lifecycle supervisor that drives it.
pub mod engine;
pub mod message;
pub mod supervisor;
