//! Comparison sorts.
//!
//! All six routines work on an [`ArrayRecorder`] and only touch the array
//! through it. Positions are reported as sorted the moment the algorithm
//! knows they are final; whatever is left is reported in ascending order
//! once the sort finishes.

use crate::step::CmpOp;
use crate::trace::{ArrayRecorder, Trace};

/// Handle the `n <= 1` cases: nothing to do for an empty array, a lone
/// `MarkSorted` for a single element.
fn trivial(values: &[i64]) -> Option<Trace<Vec<i64>>> {
    if values.len() > 1 {
        return None;
    }
    let mut rec = ArrayRecorder::new(values);
    if values.len() == 1 {
        rec.mark_sorted(0);
    }
    let (rec, out) = rec.into_parts();
    Some(rec.finish(out))
}

fn finish(rec: ArrayRecorder, sorted: &[bool]) -> Trace<Vec<i64>> {
    let mut rec = rec;
    rec.mark_all_sorted(sorted);
    let (rec, out) = rec.into_parts();
    rec.finish(out)
}

/// Bubble sort with early exit. Adjacent pairs are swapped only on `>`, so
/// equal elements never cross.
pub fn bubble(values: &[i64]) -> Trace<Vec<i64>> {
    if let Some(trace) = trivial(values) {
        return trace;
    }
    let n = values.len();
    let mut rec = ArrayRecorder::new(values);
    let mut sorted = vec![false; n];

    for pass in 0..n - 1 {
        let last = n - 1 - pass;
        let mut swapped = false;
        for j in 0..last {
            if rec.compare(j, j + 1, CmpOp::Gt) {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        rec.mark_sorted(last);
        sorted[last] = true;
        if !swapped {
            break;
        }
    }
    finish(rec, &sorted)
}

/// Insertion sort: the key is lifted out, larger elements shift right, and
/// the key drops into the gap.
pub fn insertion(values: &[i64]) -> Trace<Vec<i64>> {
    if let Some(trace) = trivial(values) {
        return trace;
    }
    let n = values.len();
    let mut rec = ArrayRecorder::new(values);

    for i in 1..n {
        let key = rec.get(i);
        rec.mark_active(vec![i], format!("Take key {key} from index {i}"));
        let mut j = i;
        while j > 0 && rec.compare_value(j - 1, key, CmpOp::Gt) {
            rec.shift(j - 1, j);
            j -= 1;
        }
        if j != i {
            rec.insert(j, key);
        }
    }
    finish(rec, &[])
}

pub fn selection(values: &[i64]) -> Trace<Vec<i64>> {
    if let Some(trace) = trivial(values) {
        return trace;
    }
    let n = values.len();
    let mut rec = ArrayRecorder::new(values);
    let mut sorted = vec![false; n];

    for i in 0..n - 1 {
        let mut min = i;
        for j in i + 1..n {
            if rec.compare(j, min, CmpOp::Lt) {
                min = j;
            }
        }
        rec.swap(i, min);
        rec.mark_sorted(i);
        sorted[i] = true;
    }
    finish(rec, &sorted)
}

/// Top-down merge sort.
///
/// The left run is copied aside; the right run is read in place, which is
/// safe because the write cursor never passes the right cursor. Each merge
/// decision is recorded as `right >= left`, the mirror of `left <= right`,
/// so ties take the left element and the sort is stable.
pub fn merge(values: &[i64]) -> Trace<Vec<i64>> {
    if let Some(trace) = trivial(values) {
        return trace;
    }
    let mut rec = ArrayRecorder::new(values);
    let n = rec.len();
    merge_range(&mut rec, 0, n);
    finish(rec, &[])
}

fn merge_range(rec: &mut ArrayRecorder, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_range(rec, lo, mid);
    merge_range(rec, mid, hi);

    rec.mark_active(
        (lo..hi).collect(),
        format!("Merge runs [{lo}..{mid}) and [{mid}..{hi})"),
    );
    let left = rec.values()[lo..mid].to_vec();
    let (mut i, mut j, mut k) = (0, mid, lo);
    while i < left.len() && j < hi {
        if rec.compare_value(j, left[i], CmpOp::Ge) {
            rec.place(k, left[i]);
            i += 1;
        } else {
            let v = rec.get(j);
            rec.place(k, v);
            j += 1;
        }
        k += 1;
    }
    for &v in &left[i..] {
        rec.place(k, v);
        k += 1;
    }
}

/// Quick sort with the Lomuto partition (last element as pivot, `<=`).
///
/// Ranges are processed from an explicit stack, left range first, so the
/// recursion depth of adversarial inputs does not matter.
pub fn quick(values: &[i64]) -> Trace<Vec<i64>> {
    if let Some(trace) = trivial(values) {
        return trace;
    }
    let n = values.len();
    let mut rec = ArrayRecorder::new(values);
    let mut sorted = vec![false; n];
    let mut stack = vec![(0, n)];

    while let Some((lo, hi)) = stack.pop() {
        match hi - lo {
            0 => continue,
            1 => {
                rec.mark_sorted(lo);
                sorted[lo] = true;
                continue;
            }
            _ => {}
        }
        let p = hi - 1;
        rec.pivot(p);
        let mut store = lo;
        for j in lo..p {
            if rec.compare(j, p, CmpOp::Le) {
                rec.swap(store, j);
                store += 1;
            }
        }
        rec.swap(store, p);
        rec.mark_sorted(store);
        sorted[store] = true;

        stack.push((store + 1, hi));
        stack.push((lo, store));
    }
    finish(rec, &sorted)
}

/// Heap sort over a max-heap.
pub fn heap(values: &[i64]) -> Trace<Vec<i64>> {
    if let Some(trace) = trivial(values) {
        return trace;
    }
    let n = values.len();
    let mut rec = ArrayRecorder::new(values);

    for root in (0..n / 2).rev() {
        sift_down(&mut rec, root, n);
    }
    for end in (1..n).rev() {
        rec.swap(0, end);
        rec.mark_sorted(end);
        sift_down(&mut rec, 0, end);
    }
    rec.mark_sorted(0);
    let (rec, out) = rec.into_parts();
    rec.finish(out)
}

fn sift_down(rec: &mut ArrayRecorder, mut root: usize, end: usize) {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return;
        }
        let mut child = left;
        if left + 1 < end && rec.compare(left + 1, left, CmpOp::Gt) {
            child = left + 1;
        }
        if !rec.compare(child, root, CmpOp::Gt) {
            return;
        }
        rec.swap(root, child);
        root = child;
    }
}
