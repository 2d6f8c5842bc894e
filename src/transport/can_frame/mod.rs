//! In-memory representation of one classic CAN frame as the scheduler
//! hands it to the transport.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::infra::codec::hex::PAYLOAD_LEN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One frame on the bus: identifier plus a full 8-byte payload.
/// The scheduler never sends variable-length payloads.
pub struct CanFrame {
    /// Standard (11-bit) or extended (29-bit) identifier.
    pub id: Id,
    /// Payload buffer, always exactly eight bytes.
    pub data: [u8; PAYLOAD_LEN],
}

impl CanFrame {
    /// Build a frame from a raw identifier and the format flag.
    ///
    /// The raw value is masked into the selected identifier range
    /// (11 or 29 bits), so construction is total.
    pub fn new(raw_id: u32, extended: bool, data: [u8; PAYLOAD_LEN]) -> Self {
        let id = if extended {
            let masked = raw_id & ExtendedId::MAX.as_raw();
            Id::Extended(ExtendedId::new(masked).unwrap_or(ExtendedId::ZERO))
        } else {
            let masked = (raw_id as u16) & StandardId::MAX.as_raw();
            Id::Standard(StandardId::new(masked).unwrap_or(StandardId::ZERO))
        };
        Self { id, data }
    }

    /// Raw identifier value without the format distinction.
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        }
    }

    /// Whether the frame uses the extended (29-bit) format.
    pub fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }
}
