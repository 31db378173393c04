//! The render-state reducer.
//!
//! [`apply`] is the interpreter for every built-in step kind; [`render`]
//! folds any [`Algorithm`]'s interpreter over a trace prefix. Backward steps
//! and seeks are nothing more than a call to [`render`] with a shorter
//! prefix, so `apply` must be a pure function of the frame and the step.

use crate::frame::Frame;
use crate::step::{DequeEnd, Op, Step};
use crate::trace::Trace;
use crate::traits::Algorithm;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Apply one built-in step to a frame.
///
/// Transient highlights (`active`, `comparing`, `cell`) describe only the
/// latest step and are cleared first. Out-of-range positions are ignored
/// rather than panicking; a well-formed trace never produces them.
pub fn apply(frame: &mut Frame, step: &Step) {
    frame.active.clear();
    frame.comparing.clear();
    frame.cell = None;

    match &step.op {
        Op::Compare { i, j, .. } => {
            frame.comparing.extend([*i, *j]);
        }
        Op::CompareValue { index, .. } => {
            frame.comparing.push(*index);
        }
        Op::Swap { i, j } => {
            if *i < frame.values.len() && *j < frame.values.len() {
                frame.values.swap(*i, *j);
            }
            // the pivot marker follows its value
            if frame.pivot == Some(*i) {
                frame.pivot = Some(*j);
            } else if frame.pivot == Some(*j) {
                frame.pivot = Some(*i);
            }
            frame.active.extend([*i, *j]);
        }
        Op::Shift { from, to } => {
            if let Some(&v) = frame.values.get(*from) {
                write(&mut frame.values, *to, v);
            }
            frame.active.push(*to);
        }
        Op::Insert { index, value } | Op::Place { index, value } => {
            write(&mut frame.values, *index, *value);
            frame.active.push(*index);
        }
        Op::MarkActive { indices } => {
            frame.active.extend_from_slice(indices);
        }
        Op::Pivot { index } => {
            frame.pivot = Some(*index);
            frame.active.push(*index);
        }
        Op::MarkSorted { index } => {
            // a placed element always closes the current partition
            frame.mark_done(*index);
            frame.pivot = None;
        }
        Op::Count { index, slot, .. } => {
            if frame.counts.len() <= *slot {
                frame.counts.resize(*slot + 1, 0);
            }
            frame.counts[*slot] += 1;
            frame.active.push(*index);
        }
        Op::BucketAssign {
            index,
            bucket,
            value,
            ..
        } => {
            if frame.buckets.len() <= *bucket {
                frame.buckets.resize_with(*bucket + 1, Default::default);
            }
            frame.buckets[*bucket].push_back(*value);
            frame.active.push(*index);
        }
        Op::Collect {
            bucket,
            index,
            value,
        } => {
            if let Some(b) = frame.buckets.get_mut(*bucket) {
                b.pop_front();
            }
            write(&mut frame.values, *index, *value);
            frame.active.push(*index);
        }
        Op::TableWrite {
            row,
            col,
            value,
            choice,
        } => {
            frame.table.set(*row, *col, *value, *choice);
            frame.cell = Some((*row, *col));
        }
        Op::Backtrack { row, col, .. } => {
            frame.path.push((*row, *col));
            frame.cell = Some((*row, *col));
        }
        Op::CharCompare { text, pattern, .. } => {
            frame.comparing.push(*text);
            frame.alignment = text.checked_sub(*pattern);
        }
        Op::LpsCompare { i, len, .. } => {
            frame.comparing.extend([*i, *len]);
        }
        Op::LpsWrite { index, value } => {
            if frame.lps.len() <= *index {
                frame.lps.resize(*index + 1, None);
            }
            frame.lps[*index] = Some(*value);
        }
        Op::LpsFallback { from, to } => {
            frame.comparing.extend([*from, *to]);
        }
        Op::LpsShift { to, text, .. } => {
            frame.alignment = text.checked_sub(*to);
            frame.active.push(*text);
        }
        Op::MatchFound { start, resume } => {
            frame.matches.push(*start);
            let end = *start + frame.pattern.len();
            for index in *start..end {
                frame.mark_done(index);
            }
            frame.alignment = end.checked_sub(*resume);
        }
        Op::DequePush { end, index } => {
            match end {
                DequeEnd::Front => frame.deque.push_front(*index),
                DequeEnd::Back => frame.deque.push_back(*index),
            }
            frame.active.push(*index);
        }
        Op::DequePop { end, index } => {
            match end {
                DequeEnd::Front => frame.deque.pop_front(),
                DequeEnd::Back => frame.deque.pop_back(),
            };
            frame.active.push(*index);
        }
        Op::WindowMax { start, end, value } => {
            frame.output.push(*value);
            frame.range = Some((*start, *end));
        }
        Op::Accumulate { index, sum, .. } => {
            frame.sum = Some(*sum);
            frame.active.push(*index);
        }
        Op::Best { start, end, sum } => {
            frame.best = Some(*sum);
            frame.range = Some((*start, *end));
        }
        Op::Reorder { order } => {
            let reordered: Vec<_> = order
                .iter()
                .filter_map(|&k| frame.intervals.get(k).copied())
                .collect();
            if reordered.len() == frame.intervals.len() {
                frame.intervals = reordered;
            }
        }
        Op::Overlap { next, .. } => {
            frame.comparing.push(*next);
        }
        Op::Extend { merged, index, end } => {
            if let Some(iv) = frame.merged.get_mut(*merged) {
                iv.end = iv.end.max(*end);
            }
            frame.mark_done(*index);
            frame.active.push(*index);
        }
        Op::Emit { index } => {
            if let Some(&iv) = frame.intervals.get(*index) {
                frame.merged.push(iv);
            }
            frame.mark_done(*index);
            frame.active.push(*index);
        }
        Op::Highlight { start, end } => {
            frame.range = Some((*start, *end));
        }
    }
}

#[inline]
fn write(values: &mut [i64], index: usize, value: i64) {
    if let Some(slot) = values.get_mut(index) {
        *slot = value;
    }
}

/// Rebuild the state after `prefix` by folding from the seed.
///
/// Cost is O(`prefix.len()`); nothing from earlier calls is reused.
pub fn render<A: Algorithm>(algorithm: &A, input: &A::Input, prefix: &[Step]) -> A::State {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("render", steps = prefix.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut state = algorithm.seed(input);
    for step in prefix {
        algorithm.interpret(&mut state, step);
    }
    state
}

/// State after every prefix `0..=trace.len()` (serial execution).
///
/// Folds incrementally; element `k` equals `render(algorithm, input, trace.prefix(k))`.
#[cfg(not(feature = "parallel"))]
pub fn render_all<A: Algorithm>(
    algorithm: &A,
    input: &A::Input,
    trace: &Trace<A::Output>,
) -> Vec<A::State> {
    let mut out = Vec::with_capacity(trace.len() + 1);
    let mut state = algorithm.seed(input);
    out.push(state.clone());
    for step in trace {
        algorithm.interpret(&mut state, step);
        out.push(state.clone());
    }
    out
}

/// State after every prefix `0..=trace.len()`.
///
/// Each prefix is replayed independently on rayon's pool; `interpret` must
/// carry no hidden state between calls.
#[cfg(feature = "parallel")]
pub fn render_all<A>(algorithm: &A, input: &A::Input, trace: &Trace<A::Output>) -> Vec<A::State>
where
    A: Algorithm + Sync,
    A::Input: Sync,
    A::Output: Sync,
    A::State: Send,
{
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("render_all", steps = trace.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    (0..=trace.len())
        .into_par_iter()
        .map(|k| render(algorithm, input, trace.prefix(k)))
        .collect()
}
