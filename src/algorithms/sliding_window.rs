//! Sliding-window maximum over a monotonic deque.
//!
//! The deque holds indices whose values decrease from front to back. Each
//! push and each pop, at either end, is recorded as its own step.

use std::collections::VecDeque;

use crate::step::{CmpOp, DequeEnd, Op};
use crate::trace::{ArrayRecorder, Trace};

/// Maxima of every window of `window` consecutive values.
///
/// A zero window or one longer than the input has no windows and yields an
/// empty trace.
pub fn sliding_window_max(values: &[i64], window: usize) -> Trace<Vec<i64>> {
    let n = values.len();
    let mut rec = ArrayRecorder::new(values);
    let mut maxima = Vec::new();
    if window == 0 || window > n {
        let (rec, _) = rec.into_parts();
        return rec.finish(maxima);
    }

    let mut deque: VecDeque<usize> = VecDeque::with_capacity(window);
    for i in 0..n {
        while let Some(&front) = deque.front() {
            if front + window > i {
                break;
            }
            deque.pop_front();
            rec.record(
                Op::DequePop {
                    end: DequeEnd::Front,
                    index: front,
                },
                format!("Index {front} left the window; pop it from the front"),
            );
        }
        while let Some(&back) = deque.back() {
            if !rec.compare(back, i, CmpOp::Le) {
                break;
            }
            deque.pop_back();
            rec.record(
                Op::DequePop {
                    end: DequeEnd::Back,
                    index: back,
                },
                format!("a[{back}] can never be a maximum again; pop it from the back"),
            );
        }
        deque.push_back(i);
        rec.record(
            Op::DequePush {
                end: DequeEnd::Back,
                index: i,
            },
            format!("Push index {i} (value {}) to the back", values[i]),
        );

        if i + 1 >= window {
            if let Some(&front) = deque.front() {
                let start = i + 1 - window;
                let value = values[front];
                maxima.push(value);
                rec.record(
                    Op::WindowMax {
                        start,
                        end: i,
                        value,
                    },
                    format!("Max of a[{start}..={i}] is {value}"),
                );
            }
        }
    }
    let (rec, _) = rec.into_parts();
    rec.finish(maxima)
}
