//! Render state for the built-in algorithms.
//!
//! A [`Frame`] is what a renderer reads: the primary data (array, strings or
//! interval list), classification sets for highlighting, and the auxiliary
//! structures specific to each algorithm family. Fields an algorithm does not
//! use stay empty.

use std::collections::VecDeque;

use crate::algorithms::intervals::Interval;
use crate::step::Choice;

/// Dense DP table of optional cells (unwritten cells are `None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    rows: usize,
    cols: usize,
    cells: Vec<Option<i64>>,
    choices: Vec<Option<Choice>>,
}

impl Table {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            choices: vec![None; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    pub fn choice(&self, row: usize, col: usize) -> Option<Choice> {
        if row < self.rows && col < self.cols {
            self.choices[row * self.cols + col]
        } else {
            None
        }
    }

    /// Writes outside the table are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: i64, choice: Choice) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = Some(value);
            self.choices[row * self.cols + col] = Some(choice);
        }
    }

    /// Number of cells written so far.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Snapshot of everything visible after a prefix of a trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Primary array for sorting and array problems.
    pub values: Vec<i64>,
    /// First (or only) string for string problems.
    pub text: Vec<char>,
    /// Second string: the pattern for KMP, the target for edit distance / LCS.
    pub pattern: Vec<char>,
    pub intervals: Vec<Interval>,

    /// Positions touched by the latest step. Cleared before every step.
    pub active: Vec<usize>,
    /// Positions compared by the latest step. Cleared before every step.
    pub comparing: Vec<usize>,
    /// DP cell addressed by the latest step. Cleared before every step.
    pub cell: Option<(usize, usize)>,
    /// Positions known to be finished (sorted / matched / emitted), in the
    /// order they were reported, without duplicates.
    pub done: Vec<usize>,
    pub pivot: Option<usize>,

    pub counts: Vec<usize>,
    pub buckets: Vec<VecDeque<i64>>,
    pub table: Table,
    /// Backtracked DP cells, from the final cell towards the origin.
    pub path: Vec<(usize, usize)>,
    /// Indices into `values` currently held by the monotonic deque.
    pub deque: VecDeque<usize>,
    pub lps: Vec<Option<usize>>,
    /// Text offset of the pattern's first character (KMP).
    pub alignment: Option<usize>,
    pub matches: Vec<usize>,
    /// Values emitted so far (window maxima).
    pub output: Vec<i64>,
    pub merged: Vec<Interval>,
    /// Highlighted inclusive range (best subarray, current window, palindrome).
    pub range: Option<(usize, usize)>,
    pub sum: Option<i64>,
    pub best: Option<i64>,
}

impl Frame {
    pub fn with_values(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_strings(text: &str, pattern: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pattern: pattern.chars().collect(),
            ..Self::default()
        }
    }

    pub fn with_intervals(intervals: &[Interval]) -> Self {
        Self {
            intervals: intervals.to_vec(),
            ..Self::default()
        }
    }

    /// Append to `done` unless already present.
    pub(crate) fn mark_done(&mut self, index: usize) {
        if !self.done.contains(&index) {
            self.done.push(index);
        }
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.done.contains(&index)
    }
}
