//! Kadane's maximum-subarray scan.

use crate::step::Op;
use crate::trace::{Recorder, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubarrayResult {
    pub sum: i64,
    /// Inclusive bounds of the best run; `None` for an empty input.
    pub range: Option<(usize, usize)>,
}

/// The running sum restarts at the current element whenever the carried
/// sum is negative. The first strictly better sum wins, so ties keep the
/// earliest run.
pub fn max_subarray(values: &[i64]) -> Trace<SubarrayResult> {
    let mut rec = Recorder::new();
    let mut best: Option<(usize, usize, i64)> = None;
    let (mut sum, mut start) = (0i64, 0usize);

    for (i, &v) in values.iter().enumerate() {
        let restarted = i == 0 || sum < 0;
        if restarted {
            sum = v;
            start = i;
        } else {
            sum = sum.saturating_add(v);
        }
        rec.push(
            Op::Accumulate {
                index: i,
                sum,
                restarted,
            },
            if restarted {
                format!("Start a new run at a[{i}]={v}: sum {sum}")
            } else {
                format!("Extend the run with a[{i}]={v}: sum {sum}")
            },
        );
        if best.map_or(true, |(_, _, b)| sum > b) {
            best = Some((start, i, sum));
            rec.push(
                Op::Best {
                    start,
                    end: i,
                    sum,
                },
                format!("New best sum {sum} over a[{start}..={i}]"),
            );
        }
    }

    rec.finish(match best {
        Some((start, end, sum)) => SubarrayResult {
            sum,
            range: Some((start, end)),
        },
        None => SubarrayResult { sum: 0, range: None },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn classic_input() {
        let trace = max_subarray(&[-2, 1, -3, 4, -1, 2, 1, -5, 4]);
        assert_eq!(
            trace.result(),
            &SubarrayResult {
                sum: 6,
                range: Some((3, 6))
            }
        );
        assert_eq!(trace.count(StepKind::Accumulate), 9);
    }

    #[test]
    fn all_negative_picks_the_largest_element() {
        let trace = max_subarray(&[-8, -3, -6, -2, -5, -4]);
        assert_eq!(trace.result().sum, -2);
        assert_eq!(trace.result().range, Some((3, 3)));
    }

    #[test]
    fn empty_input() {
        let trace = max_subarray(&[]);
        assert!(trace.is_empty());
        assert_eq!(trace.result().range, None);
    }
}
