//! Codec modules. `hex` covers the human-readable text forms used by the
//! editing surface and the persistence layer.
pub mod hex;
