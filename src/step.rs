//! The step vocabulary shared by every algorithm.
//!
//! A [`Step`] is one atomic, already-happened event: the operation together
//! with every index and value needed to reproduce it, plus a sentence for the
//! viewer. Steps never point back into mutable state, so a prefix of a trace
//! is enough to rebuild what the algorithm's data structures looked like.

use std::fmt;

/// Comparison operator recorded by a `Compare` step.
///
/// The operator matters: a stable merge uses `<=`, an unstable one would use
/// `<`, and the viewer shows which one actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Evaluate `lhs <op> rhs`.
    #[inline]
    pub fn eval(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Recurrence branch chosen for a DP cell (or followed while backtracking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Choice {
    /// Boundary cell fixed by the recurrence's base case.
    Base,
    /// Characters equal; diagonal taken at no cost (edit distance) or +1 (LCS).
    Match,
    Substitute,
    /// Consume a character of the target (edit distance: column - 1).
    Insert,
    /// Consume a character of the source (edit distance: row - 1).
    Delete,
    /// LCS: value inherited from the cell above.
    SkipUp,
    /// LCS: value inherited from the cell to the left.
    SkipLeft,
    Palindrome,
    NotPalindrome,
}

/// Which end of the deque an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DequeEnd {
    Front,
    Back,
}

/// A single recorded operation.
///
/// Array positions are indices into the primary array; `text`/`pattern`
/// positions index the respective strings; `row`/`col` address the DP table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    Compare {
        i: usize,
        j: usize,
        cmp: CmpOp,
        outcome: bool,
    },
    /// `values[index] <cmp> value` against a key held outside the array.
    CompareValue {
        index: usize,
        value: i64,
        cmp: CmpOp,
        outcome: bool,
    },
    Swap {
        i: usize,
        j: usize,
    },
    /// `values[to] = values[from]`; the slot at `from` keeps its old value.
    Shift {
        from: usize,
        to: usize,
    },
    /// Drop a held key into its final slot (insertion sort).
    Insert {
        index: usize,
        value: i64,
    },
    /// Overwrite a slot from auxiliary storage (merge / counting sort).
    Place {
        index: usize,
        value: i64,
    },
    MarkActive {
        indices: Vec<usize>,
    },
    Pivot {
        index: usize,
    },
    MarkSorted {
        index: usize,
    },
    /// Increment `counts[slot]` for `values[index]`.
    Count {
        index: usize,
        slot: usize,
        value: i64,
    },
    /// Append `values[index]` to `buckets[bucket]` during radix pass `pass`
    /// (0 = ones digit).
    BucketAssign {
        index: usize,
        bucket: usize,
        value: i64,
        pass: u32,
    },
    /// Pop the front of `buckets[bucket]` into `values[index]`.
    Collect {
        bucket: usize,
        index: usize,
        value: i64,
    },
    TableWrite {
        row: usize,
        col: usize,
        value: i64,
        choice: Choice,
    },
    Backtrack {
        row: usize,
        col: usize,
        choice: Choice,
    },
    CharCompare {
        text: usize,
        pattern: usize,
        equal: bool,
    },
    /// Pattern-against-itself comparison while building the LPS array.
    LpsCompare {
        i: usize,
        len: usize,
        equal: bool,
    },
    LpsWrite {
        index: usize,
        value: usize,
    },
    /// While building the LPS array, the candidate prefix length falls back
    /// from `from` to `to`.
    LpsFallback {
        from: usize,
        to: usize,
    },
    /// Failure function consulted: pattern index falls back from `from` to
    /// `to` while the text cursor stays at `text`.
    LpsShift {
        from: usize,
        to: usize,
        text: usize,
    },
    /// Full match starting at `start`; matching resumes with pattern index
    /// `resume` against the next text character.
    MatchFound {
        start: usize,
        resume: usize,
    },
    DequePush {
        end: DequeEnd,
        index: usize,
    },
    DequePop {
        end: DequeEnd,
        index: usize,
    },
    /// Maximum of the window `start..=end` appended to the output.
    WindowMax {
        start: usize,
        end: usize,
        value: i64,
    },
    Accumulate {
        index: usize,
        sum: i64,
        restarted: bool,
    },
    Best {
        start: usize,
        end: usize,
        sum: i64,
    },
    /// Permute the interval list: position `p` receives old entry `order[p]`.
    Reorder {
        order: Vec<usize>,
    },
    Overlap {
        last: usize,
        next: usize,
        overlaps: bool,
    },
    /// Interval `index` overlaps `merged[merged]`, whose end becomes
    /// `max(end, current end)`.
    Extend {
        merged: usize,
        index: usize,
        end: i64,
    },
    Emit {
        index: usize,
    },
    /// Best range found so far (inclusive bounds).
    Highlight {
        start: usize,
        end: usize,
    },
}

/// Coarse classification of an [`Op`], handy for filtering and counting.
///
/// Both array comparisons and comparisons against a held key are `Compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    Compare,
    Swap,
    Shift,
    Insert,
    Place,
    MarkActive,
    Pivot,
    MarkSorted,
    Count,
    BucketAssign,
    Collect,
    TableWrite,
    Backtrack,
    CharCompare,
    LpsCompare,
    LpsWrite,
    LpsFallback,
    LpsShift,
    MatchFound,
    DequePush,
    DequePop,
    WindowMax,
    Accumulate,
    Best,
    Reorder,
    Overlap,
    Extend,
    Emit,
    Highlight,
}

impl Op {
    pub fn kind(&self) -> StepKind {
        match self {
            Op::Compare { .. } | Op::CompareValue { .. } => StepKind::Compare,
            Op::Swap { .. } => StepKind::Swap,
            Op::Shift { .. } => StepKind::Shift,
            Op::Insert { .. } => StepKind::Insert,
            Op::Place { .. } => StepKind::Place,
            Op::MarkActive { .. } => StepKind::MarkActive,
            Op::Pivot { .. } => StepKind::Pivot,
            Op::MarkSorted { .. } => StepKind::MarkSorted,
            Op::Count { .. } => StepKind::Count,
            Op::BucketAssign { .. } => StepKind::BucketAssign,
            Op::Collect { .. } => StepKind::Collect,
            Op::TableWrite { .. } => StepKind::TableWrite,
            Op::Backtrack { .. } => StepKind::Backtrack,
            Op::CharCompare { .. } => StepKind::CharCompare,
            Op::LpsCompare { .. } => StepKind::LpsCompare,
            Op::LpsWrite { .. } => StepKind::LpsWrite,
            Op::LpsFallback { .. } => StepKind::LpsFallback,
            Op::LpsShift { .. } => StepKind::LpsShift,
            Op::MatchFound { .. } => StepKind::MatchFound,
            Op::DequePush { .. } => StepKind::DequePush,
            Op::DequePop { .. } => StepKind::DequePop,
            Op::WindowMax { .. } => StepKind::WindowMax,
            Op::Accumulate { .. } => StepKind::Accumulate,
            Op::Best { .. } => StepKind::Best,
            Op::Reorder { .. } => StepKind::Reorder,
            Op::Overlap { .. } => StepKind::Overlap,
            Op::Extend { .. } => StepKind::Extend,
            Op::Emit { .. } => StepKind::Emit,
            Op::Highlight { .. } => StepKind::Highlight,
        }
    }

    /// Ordered list of positions this operation touches.
    ///
    /// Table operations report `[row, col]`; KMP comparisons report
    /// `[text, pattern]`.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Op::Compare { i, j, .. } | Op::Swap { i, j } => vec![*i, *j],
            Op::Shift { from, to } => vec![*from, *to],
            Op::Insert { index, .. }
            | Op::Place { index, .. }
            | Op::Pivot { index }
            | Op::MarkSorted { index }
            | Op::CompareValue { index, .. }
            | Op::Count { index, .. }
            | Op::BucketAssign { index, .. }
            | Op::Collect { index, .. }
            | Op::LpsWrite { index, .. }
            | Op::DequePush { index, .. }
            | Op::DequePop { index, .. }
            | Op::Accumulate { index, .. }
            | Op::Emit { index } => vec![*index],
            Op::MarkActive { indices } => indices.clone(),
            Op::TableWrite { row, col, .. } | Op::Backtrack { row, col, .. } => vec![*row, *col],
            Op::CharCompare { text, pattern, .. } => vec![*text, *pattern],
            Op::LpsCompare { i, len, .. } => vec![*i, *len],
            Op::LpsFallback { from, to } => vec![*from, *to],
            Op::LpsShift { from, to, text } => vec![*text, *from, *to],
            Op::MatchFound { start, .. } => vec![*start],
            Op::WindowMax { start, end, .. }
            | Op::Best { start, end, .. }
            | Op::Highlight { start, end } => vec![*start, *end],
            Op::Reorder { order } => order.clone(),
            Op::Overlap { last, next, .. } => vec![*last, *next],
            Op::Extend { merged, index, .. } => vec![*merged, *index],
        }
    }
}

/// One recorded event of a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub op: Op,
    pub description: String,
}

impl Step {
    pub fn new(op: Op, description: impl Into<String>) -> Self {
        Self {
            op,
            description: description.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> StepKind {
        self.op.kind()
    }

    #[inline]
    pub fn indices(&self) -> Vec<usize> {
        self.op.indices()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmp_op_evaluates_like_rust_operators() {
        assert!(CmpOp::Lt.eval(1, 2));
        assert!(!CmpOp::Lt.eval(2, 2));
        assert!(CmpOp::Le.eval(2, 2));
        assert!(CmpOp::Gt.eval(3, 2));
        assert!(!CmpOp::Gt.eval(2, 2));
        assert!(CmpOp::Ge.eval(2, 2));
        assert_eq!(CmpOp::Le.to_string(), "<=");
    }

    #[test]
    fn indices_follow_operand_order() {
        let shift = Op::Shift { from: 4, to: 5 };
        assert_eq!(shift.indices(), vec![4, 5]);
        assert_eq!(shift.kind(), StepKind::Shift);

        let cell = Op::TableWrite {
            row: 2,
            col: 3,
            value: 1,
            choice: Choice::Match,
        };
        assert_eq!(cell.indices(), vec![2, 3]);
    }

    #[test]
    fn step_displays_its_description() {
        let step = Step::new(Op::MarkSorted { index: 0 }, "a[0] is in place");
        assert_eq!(step.to_string(), "a[0] is in place");
        assert_eq!(step.kind(), StepKind::MarkSorted);
    }
}
