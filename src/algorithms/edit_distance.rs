//! Levenshtein distance with an edit script.
//!
//! Rows index the source string, columns the target. Cell `(i, j)` holds the
//! distance between `source[..i]` and `target[..j]`. Every cell, including
//! the base row and column, is written by its own step in row-major order;
//! a backtrack phase then walks the chosen branches from `(n, m)` to the
//! origin.

use crate::step::{Choice, Op};
use crate::trace::{Recorder, Trace};

/// One operation of an edit script. Matches are not part of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditOp {
    Insert(char),
    Delete(char),
    Substitute { from: char, to: char },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub distance: usize,
    /// Operations turning the source into the target, left to right.
    pub script: Vec<EditOp>,
}

pub fn edit_distance(source: &str, target: &str) -> Trace<EditResult> {
    let s: Vec<char> = source.chars().collect();
    let t: Vec<char> = target.chars().collect();
    let (n, m) = (s.len(), t.len());
    let mut rec = Recorder::new();
    if n == 0 && m == 0 {
        return rec.finish(EditResult {
            distance: 0,
            script: Vec::new(),
        });
    }

    let mut grid = Grid::new(n, m);
    for j in 0..=m {
        let c = if j == 0 { Choice::Base } else { Choice::Insert };
        grid.write(&mut rec, &s, &t, (0, j), j as i64, c);
    }
    for i in 1..=n {
        grid.write(&mut rec, &s, &t, (i, 0), i as i64, Choice::Delete);
        for j in 1..=m {
            let (value, c) = if s[i - 1] == t[j - 1] {
                (grid.dist[i - 1][j - 1], Choice::Match)
            } else {
                // ties prefer substitute, then delete, then insert
                [
                    (grid.dist[i - 1][j - 1] + 1, Choice::Substitute),
                    (grid.dist[i - 1][j] + 1, Choice::Delete),
                    (grid.dist[i][j - 1] + 1, Choice::Insert),
                ]
                .into_iter()
                .min_by_key(|&(v, _)| v)
                .unwrap_or((0, Choice::Base))
            };
            grid.write(&mut rec, &s, &t, (i, j), value, c);
        }
    }

    let distance = grid.dist[n][m] as usize;
    let mut script = Vec::new();
    let (mut i, mut j) = (n, m);
    loop {
        let c = grid.choice[i][j];
        rec.push(
            Op::Backtrack {
                row: i,
                col: j,
                choice: c,
            },
            format!("Backtrack through ({i}, {j}): {c:?}"),
        );
        match c {
            Choice::Base => break,
            Choice::Match => {
                i -= 1;
                j -= 1;
            }
            Choice::Substitute => {
                script.push(EditOp::Substitute {
                    from: s[i - 1],
                    to: t[j - 1],
                });
                i -= 1;
                j -= 1;
            }
            Choice::Delete => {
                script.push(EditOp::Delete(s[i - 1]));
                i -= 1;
            }
            Choice::Insert => {
                script.push(EditOp::Insert(t[j - 1]));
                j -= 1;
            }
            _ => break,
        }
    }
    script.reverse();
    rec.finish(EditResult { distance, script })
}

struct Grid {
    dist: Vec<Vec<i64>>,
    choice: Vec<Vec<Choice>>,
}

impl Grid {
    fn new(n: usize, m: usize) -> Self {
        Self {
            dist: vec![vec![0; m + 1]; n + 1],
            choice: vec![vec![Choice::Base; m + 1]; n + 1],
        }
    }

    fn write(
        &mut self,
        rec: &mut Recorder,
        s: &[char],
        t: &[char],
        (row, col): (usize, usize),
        value: i64,
        choice: Choice,
    ) {
        self.dist[row][col] = value;
        self.choice[row][col] = choice;
        rec.push(
            Op::TableWrite {
                row,
                col,
                value,
                choice,
            },
            describe(s, t, row, col, value, choice),
        );
    }
}

fn describe(s: &[char], t: &[char], row: usize, col: usize, value: i64, c: Choice) -> String {
    match c {
        Choice::Base => "dp[0][0] = 0".to_string(),
        Choice::Match => format!(
            "dp[{row}][{col}] = {value}: '{}' matches, take the diagonal",
            s[row - 1]
        ),
        Choice::Substitute => format!(
            "dp[{row}][{col}] = {value}: substitute '{}' with '{}'",
            s[row - 1],
            t[col - 1]
        ),
        Choice::Delete if col == 0 => format!("dp[{row}][0] = {value}: delete {row} characters"),
        Choice::Delete => format!("dp[{row}][{col}] = {value}: delete '{}'", s[row - 1]),
        Choice::Insert if row == 0 => format!("dp[0][{col}] = {value}: insert {col} characters"),
        Choice::Insert => format!("dp[{row}][{col}] = {value}: insert '{}'", t[col - 1]),
        _ => format!("dp[{row}][{col}] = {value}"),
    }
}
