//! Persistence seam: round-trips message definitions against an external
//! store (relational, flash, in-memory…). The scheduler core never touches
//! storage itself; it only defines the contract the storing collaborator
//! implements.
use core::future::Future;

use crate::scheduler::message::MessageTable;

/// Contract for loading and replacing the full persisted message set.
///
/// Stores typically persist the payload as hex text; implementations are
/// expected to normalize it through
/// [`payload_from_hex`](crate::infra::codec::hex::payload_from_hex) (or the
/// message setters, which do the same) on load, so a corrupt stored string
/// can never violate the 8-byte payload invariant or abort the load.
pub trait MessageStore {
    type Error: core::fmt::Debug;

    /// Replace the contents of `into` with every persisted message, in
    /// stored order, and return how many were loaded. An empty store
    /// yields an empty table; seeding defaults in that case is the
    /// caller's concern, not the store's.
    fn load_all<'a, const N: usize>(
        &'a mut self,
        into: &'a mut MessageTable<N>,
    ) -> impl Future<Output = Result<usize, Self::Error>> + 'a;

    /// Replace the full persisted set with the table's contents.
    /// All-or-nothing: implementations must not leave a partial set behind
    /// on failure (a transaction, a staged file rename, …).
    fn save_all<'a, const N: usize>(
        &'a mut self,
        table: &'a MessageTable<N>,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
