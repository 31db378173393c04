//! Distribution sorts: counting sort and LSD radix sort.
//!
//! Both work on offset keys `value - min`, so negative inputs need no special
//! casing. Counting sort switches to one slot per distinct value when the
//! range is too wide for a dense histogram. The histogram and the buckets
//! live in the render frame as well; [`counting_slots`] tells the seed how
//! many histogram slots to allocate.

use std::collections::VecDeque;

use crate::trace::{ArrayRecorder, Trace};
use crate::utils::decimal_digits;

const RADIX: usize = 10;

/// Offset key of `value` relative to `min`, saturating on absurd ranges.
#[inline]
fn key(value: i64, min: i64) -> u64 {
    u64::try_from(i128::from(value) - i128::from(min)).unwrap_or(u64::MAX)
}

/// Widest value range that gets one histogram slot per possible value.
pub const MAX_OFFSET_SLOTS: usize = 1 << 16;

/// How values map to histogram slots.
enum Slots {
    /// Slot `value - min`; every value in `min..=max` has a slot.
    Offset { min: i64, len: usize },
    /// Slot = rank among the distinct values; used when the range is too
    /// wide to allocate.
    Ranked(Vec<i64>),
}

impl Slots {
    fn plan(values: &[i64]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        match usize::try_from(key(max, min)) {
            Ok(span) if span < MAX_OFFSET_SLOTS => Some(Slots::Offset { min, len: span + 1 }),
            _ => {
                let mut distinct = values.to_vec();
                distinct.sort_unstable();
                distinct.dedup();
                Some(Slots::Ranked(distinct))
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Slots::Offset { len, .. } => *len,
            Slots::Ranked(distinct) => distinct.len(),
        }
    }

    fn slot(&self, value: i64) -> usize {
        match self {
            Slots::Offset { min, .. } => key(value, *min) as usize,
            Slots::Ranked(distinct) => distinct.partition_point(|&d| d < value),
        }
    }

    fn value(&self, slot: usize) -> i64 {
        match self {
            Slots::Offset { min, .. } => min + slot as i64,
            Slots::Ranked(distinct) => distinct[slot],
        }
    }
}

/// Number of histogram slots counting sort needs for `values`.
///
/// One per value in `min..=max`, or one per distinct value once that range
/// reaches [`MAX_OFFSET_SLOTS`].
pub fn counting_slots(values: &[i64]) -> usize {
    Slots::plan(values).map_or(0, |slots| slots.len())
}

/// Number of radix buckets (one per decimal digit).
pub fn radix_buckets() -> usize {
    RADIX
}

/// Counting sort: one `Count` per element, then one `Place` per output slot
/// in ascending key order.
pub fn counting(values: &[i64]) -> Trace<Vec<i64>> {
    let mut rec = ArrayRecorder::new(values);
    let Some(slots) = Slots::plan(values) else {
        let (rec, out) = rec.into_parts();
        return rec.finish(out);
    };
    if values.len() == 1 {
        rec.mark_sorted(0);
        let (rec, out) = rec.into_parts();
        return rec.finish(out);
    }

    let mut counts = vec![0usize; slots.len()];
    for index in 0..rec.len() {
        let slot = slots.slot(rec.get(index));
        rec.count(index, slot);
        counts[slot] += 1;
    }

    let mut k = 0;
    for (slot, &count) in counts.iter().enumerate() {
        let value = slots.value(slot);
        for _ in 0..count {
            rec.place(k, value);
            k += 1;
        }
    }
    rec.mark_all_sorted(&[]);
    let (rec, out) = rec.into_parts();
    rec.finish(out)
}

/// LSD radix sort in base 10. Each pass deals every element into the bucket
/// of its current digit, then collects the buckets front to back, which
/// keeps equal digits in arrival order.
pub fn radix(values: &[i64]) -> Trace<Vec<i64>> {
    let mut rec = ArrayRecorder::new(values);
    let Some(&min) = values.iter().min() else {
        let (rec, out) = rec.into_parts();
        return rec.finish(out);
    };
    if values.len() == 1 {
        rec.mark_sorted(0);
        let (rec, out) = rec.into_parts();
        return rec.finish(out);
    }

    let max_key = values.iter().map(|&v| key(v, min)).max().unwrap_or(0);
    let passes = decimal_digits(max_key);
    let mut buckets: Vec<VecDeque<i64>> = vec![VecDeque::new(); RADIX];

    for pass in 0..passes {
        let divisor = 10u64.pow(pass);
        for index in 0..rec.len() {
            let value = rec.get(index);
            let bucket = ((key(value, min) / divisor) % RADIX as u64) as usize;
            rec.bucket_assign(index, bucket, pass);
            buckets[bucket].push_back(value);
        }
        let mut k = 0;
        for (bucket, queue) in buckets.iter_mut().enumerate() {
            while let Some(value) = queue.pop_front() {
                rec.collect(bucket, k, value);
                k += 1;
            }
        }
    }
    rec.mark_all_sorted(&[]);
    let (rec, out) = rec.into_parts();
    rec.finish(out)
}
