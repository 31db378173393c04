//! Traces and the shared recording driver.
//!
//! Every built-in algorithm runs against a [`Recorder`] (or an
//! [`ArrayRecorder`] for algorithms over an integer array). The recorder is
//! the only thing that mutates the working data, and it records a [`Step`]
//! for each mutation as it happens, so the algorithm and its trace cannot
//! drift apart.

use crate::step::{CmpOp, Op, Step, StepKind};

/// Ordered, immutable log of steps plus the algorithm's final result.
///
/// A trace is only built through [`Recorder::finish`]; nothing can append to
/// or edit it afterward, so it can be shared freely between readers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace<O> {
    steps: Vec<Step>,
    result: O,
}

impl<O> Trace<O> {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The first `k` steps, with `k` clamped to the trace length.
    pub fn prefix(&self, k: usize) -> &[Step] {
        &self.steps[..k.min(self.steps.len())]
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Declared final result of the run.
    pub fn result(&self) -> &O {
        &self.result
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Number of steps of the given kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind() == kind).count()
    }

    pub fn into_parts(self) -> (Vec<Step>, O) {
        (self.steps, self.result)
    }

    /// Convert the declared result, keeping the steps untouched.
    pub fn map_result<T>(self, f: impl FnOnce(O) -> T) -> Trace<T> {
        Trace {
            steps: self.steps,
            result: f(self.result),
        }
    }
}

impl<'a, O> IntoIterator for &'a Trace<O> {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only step buffer used while an algorithm runs.
#[derive(Debug, Default)]
pub struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Op, description: impl Into<String>) {
        self.steps.push(Step::new(op, description));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the buffer into an immutable trace.
    pub fn finish<O>(self, result: O) -> Trace<O> {
        Trace {
            steps: self.steps,
            result,
        }
    }
}

/// Recorder that owns the working copy of an integer array.
///
/// Sorting routines only touch their data through these methods, which keeps
/// `render(input, trace[..k])` equal to the array after `k` operations.
#[derive(Debug)]
pub struct ArrayRecorder {
    values: Vec<i64>,
    rec: Recorder,
}

impl ArrayRecorder {
    pub fn new(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
            rec: Recorder::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> i64 {
        self.values[index]
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Record `values[i] <cmp> values[j]` and return its outcome.
    pub fn compare(&mut self, i: usize, j: usize, cmp: CmpOp) -> bool {
        let (a, b) = (self.values[i], self.values[j]);
        let outcome = cmp.eval(a, b);
        self.rec.push(
            Op::Compare { i, j, cmp, outcome },
            format!("Compare a[{i}]={a} {cmp} a[{j}]={b}: {outcome}"),
        );
        outcome
    }

    /// Record `values[index] <cmp> value` for a key held outside the array.
    pub fn compare_value(&mut self, index: usize, value: i64, cmp: CmpOp) -> bool {
        let a = self.values[index];
        let outcome = cmp.eval(a, value);
        self.rec.push(
            Op::CompareValue {
                index,
                value,
                cmp,
                outcome,
            },
            format!("Compare a[{index}]={a} {cmp} key {value}: {outcome}"),
        );
        outcome
    }

    /// Swap two slots. Swapping a slot with itself, or two equal values, is an
    /// identity and is not recorded; returns whether a step was emitted.
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        if i == j || self.values[i] == self.values[j] {
            return false;
        }
        let (a, b) = (self.values[i], self.values[j]);
        self.values.swap(i, j);
        self.rec
            .push(Op::Swap { i, j }, format!("Swap a[{i}]={a} and a[{j}]={b}"));
        true
    }

    pub fn shift(&mut self, from: usize, to: usize) {
        let v = self.values[from];
        self.values[to] = v;
        self.rec.push(
            Op::Shift { from, to },
            format!("Shift {v} from index {from} to {to}"),
        );
    }

    pub fn insert(&mut self, index: usize, value: i64) {
        self.values[index] = value;
        self.rec.push(
            Op::Insert { index, value },
            format!("Insert key {value} at index {index}"),
        );
    }

    pub fn place(&mut self, index: usize, value: i64) {
        self.values[index] = value;
        self.rec.push(
            Op::Place { index, value },
            format!("Write {value} into index {index}"),
        );
    }

    pub fn mark_active(&mut self, indices: Vec<usize>, description: impl Into<String>) {
        self.rec.push(Op::MarkActive { indices }, description);
    }

    pub fn pivot(&mut self, index: usize) {
        let v = self.values[index];
        self.rec.push(
            Op::Pivot { index },
            format!("Choose pivot a[{index}]={v}"),
        );
    }

    pub fn mark_sorted(&mut self, index: usize) {
        let v = self.values[index];
        self.rec.push(
            Op::MarkSorted { index },
            format!("a[{index}]={v} is in its final position"),
        );
    }

    pub fn count(&mut self, index: usize, slot: usize) {
        let value = self.values[index];
        self.rec.push(
            Op::Count { index, slot, value },
            format!("Count a[{index}]={value} in slot {slot}"),
        );
    }

    pub fn bucket_assign(&mut self, index: usize, bucket: usize, pass: u32) {
        let value = self.values[index];
        self.rec.push(
            Op::BucketAssign {
                index,
                bucket,
                value,
                pass,
            },
            format!("Pass {pass}: a[{index}]={value} goes to bucket {bucket}"),
        );
    }

    pub fn collect(&mut self, bucket: usize, index: usize, value: i64) {
        self.values[index] = value;
        self.rec.push(
            Op::Collect {
                bucket,
                index,
                value,
            },
            format!("Take {value} from bucket {bucket} into index {index}"),
        );
    }

    /// Record an operation that does not mutate the array (deque moves,
    /// window results, running sums).
    pub fn record(&mut self, op: Op, description: impl Into<String>) {
        self.rec.push(op, description);
    }

    /// Mark every index not yet reported as sorted, in ascending order.
    pub fn mark_all_sorted(&mut self, already: &[bool]) {
        for index in 0..self.values.len() {
            if !already.get(index).copied().unwrap_or(false) {
                self.mark_sorted(index);
            }
        }
    }

    /// Hand back the step buffer and the final array.
    pub fn into_parts(self) -> (Recorder, Vec<i64>) {
        (self.rec, self.values)
    }
}
