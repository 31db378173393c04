//! Longest common subsequence.
//!
//! Same table layout as edit distance: rows follow `left`, columns follow
//! `right`, borders are the empty-prefix base case. The backtrack phase
//! runs from `(n, m)` to `(0, 0)`, following the border once it reaches it.

use crate::step::{Choice, Op};
use crate::trace::{Recorder, Trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsResult {
    pub length: usize,
    pub subsequence: String,
}

pub fn lcs(left: &str, right: &str) -> Trace<LcsResult> {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    let (n, m) = (a.len(), b.len());
    let mut rec = Recorder::new();
    if n == 0 && m == 0 {
        return rec.finish(LcsResult {
            length: 0,
            subsequence: String::new(),
        });
    }

    let mut len = vec![vec![0i64; m + 1]; n + 1];
    let mut from = vec![vec![Choice::Base; m + 1]; n + 1];

    for j in 0..=m {
        rec.push(
            Op::TableWrite {
                row: 0,
                col: j,
                value: 0,
                choice: Choice::Base,
            },
            format!("L[0][{j}] = 0: empty prefix"),
        );
    }
    for i in 1..=n {
        rec.push(
            Op::TableWrite {
                row: i,
                col: 0,
                value: 0,
                choice: Choice::Base,
            },
            format!("L[{i}][0] = 0: empty prefix"),
        );
        for j in 1..=m {
            let (value, choice, why) = if a[i - 1] == b[j - 1] {
                (
                    len[i - 1][j - 1] + 1,
                    Choice::Match,
                    format!("'{}' matches, extend the diagonal", a[i - 1]),
                )
            } else if len[i - 1][j] >= len[i][j - 1] {
                (len[i - 1][j], Choice::SkipUp, "take the cell above".to_string())
            } else {
                (len[i][j - 1], Choice::SkipLeft, "take the cell to the left".to_string())
            };
            len[i][j] = value;
            from[i][j] = choice;
            rec.push(
                Op::TableWrite {
                    row: i,
                    col: j,
                    value,
                    choice,
                },
                format!("L[{i}][{j}] = {value}: {why}"),
            );
        }
    }

    let mut picked = Vec::new();
    let (mut i, mut j) = (n, m);
    loop {
        let choice = from[i][j];
        rec.push(
            Op::Backtrack {
                row: i,
                col: j,
                choice,
            },
            format!("Backtrack through ({i}, {j}): {choice:?}"),
        );
        match choice {
            Choice::Match => {
                picked.push(a[i - 1]);
                i -= 1;
                j -= 1;
            }
            Choice::SkipUp => i -= 1,
            Choice::SkipLeft => j -= 1,
            // border cells walk straight to the origin
            _ if i > 0 => i -= 1,
            _ if j > 0 => j -= 1,
            _ => break,
        }
    }
    picked.reverse();
    rec.finish(LcsResult {
        length: len[n][m] as usize,
        subsequence: picked.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn classic_pair() {
        let trace = lcs("ABCBDAB", "BDCABA");
        assert_eq!(trace.result().length, 4);
        assert_eq!(trace.result().subsequence.len(), 4);
        assert_eq!(trace.count(StepKind::TableWrite), 8 * 7);
    }

    #[test]
    fn subsequence_is_common() {
        let trace = lcs("AGGTAB", "GXTXAYB");
        let sub = &trace.result().subsequence;
        assert_eq!(sub, "GTAB");
        for text in ["AGGTAB", "GXTXAYB"] {
            let mut it = text.chars();
            assert!(sub.chars().all(|c| it.any(|x| x == c)), "{sub} in {text}");
        }
    }

    #[test]
    fn disjoint_alphabets() {
        let trace = lcs("abc", "xyz");
        assert_eq!(trace.result().length, 0);
        assert!(trace.result().subsequence.is_empty());
        assert_eq!(
            trace.steps().last().map(|s| s.kind()),
            Some(StepKind::Backtrack)
        );
    }

    #[test]
    fn backtrack_follows_the_border_to_origin() {
        let trace = lcs("XAB", "AB");
        let path: Vec<(usize, usize, Choice)> = trace
            .iter()
            .filter_map(|s| match s.op {
                Op::Backtrack { row, col, choice } => Some((row, col, choice)),
                _ => None,
            })
            .collect();
        assert_eq!(
            path,
            vec![
                (3, 2, Choice::Match),
                (2, 1, Choice::Match),
                (1, 0, Choice::Base),
                (0, 0, Choice::Base),
            ]
        );
        assert_eq!(trace.result().subsequence, "AB");
    }

    #[test]
    fn one_sided_input_walks_the_top_row() {
        let trace = lcs("", "ab");
        let last = trace.steps().last().map(|s| s.op.clone());
        assert_eq!(
            last,
            Some(Op::Backtrack {
                row: 0,
                col: 0,
                choice: Choice::Base
            })
        );
        assert_eq!(trace.count(StepKind::Backtrack), 3);
    }
}
