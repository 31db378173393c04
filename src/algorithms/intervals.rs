//! Merging overlapping intervals.
//!
//! Intervals are closed, so `[1, 2]` and `[2, 3]` touch and merge.

use std::fmt;

use crate::step::Op;
use crate::trace::{Recorder, Trace};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Whether `next`, which starts no earlier than `self`, overlaps it.
    #[inline]
    pub fn reaches(&self, next: &Interval) -> bool {
        next.start <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl From<(i64, i64)> for Interval {
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}

/// Sort by `(start, end)`, then sweep once, either extending the last merged
/// interval or emitting a new one.
///
/// The sort is reported as a single `Reorder` step, and only when it
/// actually moves something. Indices in later steps refer to the sorted
/// list.
pub fn merge_intervals(intervals: &[Interval]) -> Trace<Vec<Interval>> {
    let mut rec = Recorder::new();
    if intervals.is_empty() {
        return rec.finish(Vec::new());
    }

    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&k| (intervals[k].start, intervals[k].end));
    if order.iter().enumerate().any(|(p, &k)| p != k) {
        rec.push(
            Op::Reorder {
                order: order.clone(),
            },
            "Sort intervals by start",
        );
    }
    let sorted: Vec<Interval> = order.iter().map(|&k| intervals[k]).collect();

    let mut merged = vec![sorted[0]];
    rec.push(Op::Emit { index: 0 }, format!("Start with {}", sorted[0]));
    for (index, next) in sorted.iter().enumerate().skip(1) {
        let last = merged.len() - 1;
        let overlaps = merged[last].reaches(next);
        rec.push(
            Op::Overlap {
                last,
                next: index,
                overlaps,
            },
            format!(
                "{} {} {}",
                merged[last],
                if overlaps { "overlaps" } else { "is disjoint from" },
                next
            ),
        );
        if overlaps {
            merged[last].end = merged[last].end.max(next.end);
            rec.push(
                Op::Extend {
                    merged: last,
                    index,
                    end: next.end,
                },
                format!("Merge {next} into {}", merged[last]),
            );
        } else {
            merged.push(*next);
            rec.push(Op::Emit { index }, format!("Emit {next}"));
        }
    }
    rec.finish(merged)
}
