//! Periodic render-state snapshots for long traces.
//!
//! Full replay from step zero is the baseline for every backward step and
//! seek. A [`Checkpoints`] table keeps the state after every `interval`-th
//! step so that rendering prefix `k` only replays the tail
//! `trace[k - k % interval .. k]`. The result must be identical to a full
//! replay; the table is purely an optimisation.

use crate::step::Step;
use crate::trace::Trace;
use crate::traits::Algorithm;
use crate::utils::default_checkpoint_interval;

/// State captured after exactly `index` steps.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub index: usize,
    pub state: S,
}

/// Snapshots at indices `0, interval, 2 * interval, ...` (all `<= len`).
#[derive(Debug, Clone)]
pub struct Checkpoints<S> {
    interval: usize,
    snapshots: Vec<Checkpoint<S>>,
}

impl<S: Clone> Checkpoints<S> {
    /// Snapshot a trace, using ⌈√len⌉ when `interval` is `None`.
    ///
    /// # Panics
    /// Panics if `interval == Some(0)`.
    pub fn build<A>(
        algorithm: &A,
        input: &A::Input,
        trace: &Trace<A::Output>,
        interval: Option<usize>,
    ) -> Self
    where
        A: Algorithm<State = S>,
    {
        let interval = interval.unwrap_or_else(|| default_checkpoint_interval(trace.len()));
        assert!(interval > 0, "checkpoint interval must be positive");

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("build_checkpoints", steps = trace.len(), interval);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut state = algorithm.seed(input);
        let mut snapshots = Vec::with_capacity(trace.len() / interval + 1);
        snapshots.push(Checkpoint {
            index: 0,
            state: state.clone(),
        });
        for (k, step) in trace.iter().enumerate() {
            algorithm.interpret(&mut state, step);
            let index = k + 1;
            if index % interval == 0 {
                snapshots.push(Checkpoint {
                    index,
                    state: state.clone(),
                });
            }
        }
        Self {
            interval,
            snapshots,
        }
    }

    #[inline]
    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Nearest checkpoint at or before `k`.
    pub fn nearest(&self, k: usize) -> Option<&Checkpoint<S>> {
        let slot = (k / self.interval).min(self.snapshots.len().saturating_sub(1));
        self.snapshots.get(slot)
    }

    /// State after `k` steps: nearest snapshot plus a replay of the tail.
    ///
    /// `k` is clamped to `steps.len()`. `steps` must be the trace the table
    /// was built from.
    pub fn render<A>(&self, algorithm: &A, input: &A::Input, steps: &[Step], k: usize) -> S
    where
        A: Algorithm<State = S>,
    {
        let k = k.min(steps.len());
        let Some(base) = self.nearest(k) else {
            return crate::render::render(algorithm, input, &steps[..k]);
        };
        let mut state = base.state.clone();
        for step in &steps[base.index..k] {
            algorithm.interpret(&mut state, step);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::SortAlgorithm;
    use crate::catalog::{Catalog, Problem};
    use crate::render::render;

    #[test]
    fn checkpoint_render_matches_full_replay() {
        let problem = Problem::Sort {
            algorithm: SortAlgorithm::Bubble,
            values: vec![9, 4, 7, 1, 8, 2, 6],
        };
        let trace = Catalog.generate(&problem);
        for interval in [1, 3, 5, 1000] {
            let cps = Checkpoints::build(&Catalog, &problem, &trace, Some(interval));
            for k in 0..=trace.len() {
                assert_eq!(
                    cps.render(&Catalog, &problem, trace.steps(), k),
                    render(&Catalog, &problem, trace.prefix(k)),
                    "interval={interval} k={k}"
                );
            }
        }
    }

    #[test]
    fn default_interval_is_sqrt_of_length() {
        let problem = Problem::Sort {
            algorithm: SortAlgorithm::Insertion,
            values: vec![5, 4, 3, 2, 1],
        };
        let trace = Catalog.generate(&problem);
        let cps = Checkpoints::build(&Catalog, &problem, &trace, None);
        assert_eq!(cps.interval(), default_checkpoint_interval(trace.len()));
        assert_eq!(cps.len(), trace.len() / cps.interval() + 1);
    }

    #[test]
    fn empty_trace_has_only_the_seed() {
        let problem = Problem::Sort {
            algorithm: SortAlgorithm::Merge,
            values: vec![],
        };
        let trace = Catalog.generate(&problem);
        let cps = Checkpoints::build(&Catalog, &problem, &trace, None);
        assert_eq!(cps.len(), 1);
        assert_eq!(cps.nearest(10).map(|c| c.index), Some(0));
    }
}
