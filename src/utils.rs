//! Assorted helpers.

/// Checkpoint spacing for a trace of `len` steps: ⌈√len⌉.
///
/// Used by [`crate::checkpoints::Checkpoints::build`] when no explicit
/// interval is configured; it balances snapshot memory (≈ √len frames)
/// against the replay tail of a seek (< √len steps).
#[inline]
pub fn default_checkpoint_interval(len: usize) -> usize {
    if len <= 1 {
        1
    } else {
        (len as f64).sqrt().ceil() as usize
    }
}

/// Number of decimal digits of `n` (at least 1).
#[inline]
pub fn decimal_digits(mut n: u64) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::{decimal_digits, default_checkpoint_interval};

    #[test]
    fn returns_one_for_short_traces() {
        assert_eq!(default_checkpoint_interval(0), 1);
        assert_eq!(default_checkpoint_interval(1), 1);
    }

    #[test]
    fn sqrt_ceiling_behavior() {
        assert_eq!(default_checkpoint_interval(2), 2);
        assert_eq!(default_checkpoint_interval(4), 2);
        assert_eq!(default_checkpoint_interval(5), 3);
        assert_eq!(default_checkpoint_interval(100), 10);
        assert_eq!(default_checkpoint_interval(101), 11);
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut prev = 0;
        for len in 0..500 {
            let n = default_checkpoint_interval(len);
            assert!(n >= prev, "interval decreased at len={len}: {n} < {prev}");
            prev = n;
        }
    }

    #[test]
    fn digit_counts() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(1998), 4);
    }
}
