//! Error definitions shared across library modules.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur while editing the fixed-capacity message table.
pub enum TableError {
    /// No free slot left for another message definition.
    #[error("Message table full: capacity {capacity}")]
    Full { capacity: usize },
}
