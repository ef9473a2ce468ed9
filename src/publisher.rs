use crate::response::Outcome;

/// Output boundary for dispatch results.
///
/// A publisher receives each successful [`Outcome`] exactly once, after the
/// middleware chain and controller have finished. Failed dispatches never
/// reach it; the error goes back to the caller instead. Transports implement
/// this to write wire responses, tests implement it to capture output.
pub trait Publisher: Send + Sync {
    fn publish(&self, outcome: &Outcome);
}
