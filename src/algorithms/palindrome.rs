//! Longest palindromic substring by interval DP.
//!
//! Cell `(i, j)` is 1 when `text[i..=j]` reads the same both ways. Cells are
//! filled by increasing substring length, so both inner neighbours are known
//! before a cell is written. Only the upper triangle is ever touched.

use crate::step::{Choice, Op};
use crate::trace::{Recorder, Trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalindromeResult {
    /// Char offset of the first longest palindrome.
    pub start: usize,
    pub text: String,
}

pub fn longest_palindrome(text: &str) -> Trace<PalindromeResult> {
    let s: Vec<char> = text.chars().collect();
    let n = s.len();
    let mut rec = Recorder::new();
    let mut is_pal = vec![vec![false; n]; n];
    let mut best: Option<(usize, usize)> = None;

    for width in 1..=n {
        for i in 0..=n - width {
            let j = i + width - 1;
            let pal = match width {
                1 => true,
                2 => s[i] == s[j],
                _ => s[i] == s[j] && is_pal[i + 1][j - 1],
            };
            is_pal[i][j] = pal;
            let (value, choice) = if pal {
                (1, Choice::Palindrome)
            } else {
                (0, Choice::NotPalindrome)
            };
            let shown: String = s[i..=j].iter().collect();
            rec.push(
                Op::TableWrite {
                    row: i,
                    col: j,
                    value,
                    choice,
                },
                if pal {
                    format!("\"{shown}\" is a palindrome")
                } else {
                    format!("\"{shown}\" is not a palindrome")
                },
            );
            if pal && best.map_or(true, |(a, b)| width > b - a + 1) {
                best = Some((i, j));
                rec.push(
                    Op::Highlight { start: i, end: j },
                    format!("New longest palindrome \"{shown}\" (length {width})"),
                );
            }
        }
    }

    let result = match best {
        Some((start, end)) => PalindromeResult {
            start,
            text: s[start..=end].iter().collect(),
        },
        None => PalindromeResult {
            start: 0,
            text: String::new(),
        },
    };
    rec.finish(result)
}
