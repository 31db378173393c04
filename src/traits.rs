//! The seam between an algorithm and the playback machinery.
//!
//! To play an algorithm back, implement [`Algorithm`] for a struct that
//! knows how to:
//! - run the algorithm once and record its steps ([`Algorithm::generate`]),
//! - build the visible state before any step has run ([`Algorithm::seed`]),
//! - apply one recorded step to that state ([`Algorithm::interpret`]).
//!
//! The controller never stores undo information. Stepping backward and
//! seeking rebuild the state by folding `interpret` over a prefix of the
//! trace, so `interpret` must depend only on the state it is given and the
//! step itself.

use std::fmt;

use crate::step::Step;
use crate::trace::Trace;

/// An algorithm that can be traced and replayed.
///
/// Contract:
/// - `generate` is deterministic: the same input always yields an identical
///   trace (same steps, same order, same result).
/// - `generate` is total over inputs that passed validation.
/// - Folding `interpret` over `trace.steps()[..k]` starting from `seed(input)`
///   yields the true state of the algorithm's data after its first `k`
///   operations.
pub trait Algorithm {
    /// Validated input the algorithm runs on.
    type Input: Clone;

    /// Final result declared by the trace (sorted array, distance, matches...).
    type Output: Clone + PartialEq + fmt::Debug;

    /// Render state derived from a prefix of the trace.
    type State: Clone + PartialEq + fmt::Debug;

    /// Run the algorithm to completion and record every visible operation.
    fn generate(&self, input: &Self::Input) -> Trace<Self::Output>;

    /// Visible state before the first step.
    fn seed(&self, input: &Self::Input) -> Self::State;

    /// Apply one step to `state`.
    fn interpret(&self, state: &mut Self::State, step: &Step);
}
