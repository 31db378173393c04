//! The built-in algorithm catalog.
//!
//! [`Problem`] pairs an algorithm with its typed input, so an algorithm can
//! never be handed the wrong input family. [`Catalog`] implements
//! [`Algorithm`] for all of them at once, using [`Frame`] as the render
//! state and [`render::apply`] as the interpreter.

use std::collections::VecDeque;
use std::fmt;

use crate::algorithms::edit_distance::{self, EditOp};
use crate::algorithms::intervals::{self, Interval};
use crate::algorithms::{
    distribution, kmp, lcs, max_subarray, palindrome, sliding_window, sorting, AlgorithmId,
    SortAlgorithm,
};
use crate::frame::{Frame, Table};
use crate::render;
use crate::step::Step;
use crate::trace::Trace;
use crate::traits::Algorithm;

/// An algorithm together with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Problem {
    Sort {
        algorithm: SortAlgorithm,
        values: Vec<i64>,
    },
    EditDistance {
        source: String,
        target: String,
    },
    Lcs {
        left: String,
        right: String,
    },
    LongestPalindrome {
        text: String,
    },
    Kmp {
        text: String,
        pattern: String,
    },
    MaxSubarray {
        values: Vec<i64>,
    },
    SlidingWindowMax {
        values: Vec<i64>,
        window: usize,
    },
    MergeIntervals {
        intervals: Vec<Interval>,
    },
}

impl Problem {
    pub fn id(&self) -> AlgorithmId {
        match self {
            Problem::Sort { algorithm, .. } => AlgorithmId::Sort(*algorithm),
            Problem::EditDistance { .. } => AlgorithmId::EditDistance,
            Problem::Lcs { .. } => AlgorithmId::LongestCommonSubsequence,
            Problem::LongestPalindrome { .. } => AlgorithmId::LongestPalindrome,
            Problem::Kmp { .. } => AlgorithmId::Kmp,
            Problem::MaxSubarray { .. } => AlgorithmId::MaxSubarray,
            Problem::SlidingWindowMax { .. } => AlgorithmId::SlidingWindowMax,
            Problem::MergeIntervals { .. } => AlgorithmId::MergeIntervals,
        }
    }
}

/// Declared final result of a catalog trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Sorted(Vec<i64>),
    EditDistance {
        distance: usize,
        script: Vec<EditOp>,
    },
    Lcs {
        length: usize,
        subsequence: String,
    },
    Palindrome {
        start: usize,
        text: String,
    },
    /// Start offsets of every pattern occurrence, overlaps included.
    Matches(Vec<usize>),
    MaxSubarray {
        sum: i64,
        range: Option<(usize, usize)>,
    },
    WindowMaxima(Vec<i64>),
    Merged(Vec<Interval>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Sorted(values) => write!(f, "sorted {values:?}"),
            Outcome::EditDistance { distance, script } => {
                write!(f, "distance {distance} via {} edits", script.len())
            }
            Outcome::Lcs {
                length,
                subsequence,
            } => write!(f, "lcs \"{subsequence}\" (length {length})"),
            Outcome::Palindrome { start, text } => {
                write!(f, "palindrome \"{text}\" at {start}")
            }
            Outcome::Matches(starts) => write!(f, "matches at {starts:?}"),
            Outcome::MaxSubarray { sum, range } => match range {
                Some((a, b)) => write!(f, "max sum {sum} over [{a}..={b}]"),
                None => write!(f, "max sum {sum} (empty input)"),
            },
            Outcome::WindowMaxima(values) => write!(f, "window maxima {values:?}"),
            Outcome::Merged(list) => {
                f.write_str("merged")?;
                for iv in list {
                    write!(f, " {iv}")?;
                }
                Ok(())
            }
        }
    }
}

/// Run the algorithm named by `problem` and return its trace.
pub fn generate(problem: &Problem) -> Trace<Outcome> {
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("generate", algorithm = %problem.id());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let trace = match problem {
        Problem::Sort { algorithm, values } => {
            let sorter: fn(&[i64]) -> Trace<Vec<i64>> = match algorithm {
                SortAlgorithm::Bubble => sorting::bubble,
                SortAlgorithm::Insertion => sorting::insertion,
                SortAlgorithm::Selection => sorting::selection,
                SortAlgorithm::Merge => sorting::merge,
                SortAlgorithm::Quick => sorting::quick,
                SortAlgorithm::Heap => sorting::heap,
                SortAlgorithm::Counting => distribution::counting,
                SortAlgorithm::Radix => distribution::radix,
            };
            sorter(values).map_result(Outcome::Sorted)
        }
        Problem::EditDistance { source, target } => edit_distance::edit_distance(source, target)
            .map_result(|r| Outcome::EditDistance {
                distance: r.distance,
                script: r.script,
            }),
        Problem::Lcs { left, right } => lcs::lcs(left, right).map_result(|r| Outcome::Lcs {
            length: r.length,
            subsequence: r.subsequence,
        }),
        Problem::LongestPalindrome { text } => palindrome::longest_palindrome(text)
            .map_result(|r| Outcome::Palindrome {
                start: r.start,
                text: r.text,
            }),
        Problem::Kmp { text, pattern } => kmp::kmp(text, pattern).map_result(Outcome::Matches),
        Problem::MaxSubarray { values } => {
            max_subarray::max_subarray(values).map_result(|r| Outcome::MaxSubarray {
                sum: r.sum,
                range: r.range,
            })
        }
        Problem::SlidingWindowMax { values, window } => {
            sliding_window::sliding_window_max(values, *window).map_result(Outcome::WindowMaxima)
        }
        Problem::MergeIntervals { intervals } => {
            intervals::merge_intervals(intervals).map_result(Outcome::Merged)
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(steps = trace.len(), "trace generated");
    trace
}

/// Seed frame for `problem`: the untouched input plus empty auxiliary
/// structures of the right shape.
pub fn seed(problem: &Problem) -> Frame {
    match problem {
        Problem::Sort { algorithm, values } => {
            let mut frame = Frame::with_values(values);
            match algorithm {
                SortAlgorithm::Counting => {
                    frame.counts = vec![0; distribution::counting_slots(values)];
                }
                SortAlgorithm::Radix => {
                    frame.buckets = vec![VecDeque::new(); distribution::radix_buckets()];
                }
                _ => {}
            }
            frame
        }
        Problem::EditDistance { source, target } => string_table(source, target),
        Problem::Lcs { left, right } => string_table(left, right),
        Problem::LongestPalindrome { text } => {
            let mut frame = Frame::with_strings(text, "");
            let n = frame.text.len();
            frame.table = Table::new(n, n);
            frame
        }
        Problem::Kmp { text, pattern } => {
            let mut frame = Frame::with_strings(text, pattern);
            frame.lps = vec![None; frame.pattern.len()];
            frame
        }
        Problem::MaxSubarray { values } | Problem::SlidingWindowMax { values, .. } => {
            Frame::with_values(values)
        }
        Problem::MergeIntervals { intervals } => Frame::with_intervals(intervals),
    }
}

fn string_table(rows: &str, cols: &str) -> Frame {
    let mut frame = Frame::with_strings(rows, cols);
    frame.table = Table::new(frame.text.len() + 1, frame.pattern.len() + 1);
    frame
}

/// Every built-in algorithm behind one [`Algorithm`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Catalog;

impl Algorithm for Catalog {
    type Input = Problem;
    type Output = Outcome;
    type State = Frame;

    fn generate(&self, input: &Problem) -> Trace<Outcome> {
        generate(input)
    }

    fn seed(&self, input: &Problem) -> Frame {
        seed(input)
    }

    fn interpret(&self, state: &mut Frame, step: &Step) {
        render::apply(state, step);
    }
}
