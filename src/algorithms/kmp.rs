//! Knuth–Morris–Pratt substring search.
//!
//! Phase one builds the LPS (longest proper prefix that is also a suffix)
//! table of the pattern, phase two scans the text. Every character
//! comparison is its own step, and so is every consultation of the failure
//! function. Overlapping matches are reported.

use crate::step::Op;
use crate::trace::{Recorder, Trace};

/// LPS table of `pattern`, without recording anything.
pub fn lps_table(pattern: &[char]) -> Vec<usize> {
    let m = pattern.len();
    let mut lps = vec![0; m];
    let (mut len, mut i) = (0, 1);
    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len > 0 {
            len = lps[len - 1];
        } else {
            i += 1;
        }
    }
    lps
}

/// Start offsets (in chars) of every occurrence of `pattern` in `text`.
pub fn kmp(text: &str, pattern: &str) -> Trace<Vec<usize>> {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    let (n, m) = (t.len(), p.len());
    let mut rec = Recorder::new();
    if n == 0 || m == 0 {
        return rec.finish(Vec::new());
    }

    let lps = build_lps(&mut rec, &p);

    let mut matches = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n {
        let equal = t[i] == p[j];
        rec.push(
            Op::CharCompare {
                text: i,
                pattern: j,
                equal,
            },
            format!(
                "text[{i}]='{}' {} pattern[{j}]='{}'",
                t[i],
                if equal { "==" } else { "!=" },
                p[j]
            ),
        );
        if equal {
            i += 1;
            j += 1;
            if j == m {
                let start = i - m;
                let resume = lps[m - 1];
                rec.push(
                    Op::MatchFound { start, resume },
                    format!("Match at {start}; continue from pattern[{resume}]"),
                );
                matches.push(start);
                j = resume;
            }
        } else if j > 0 {
            let to = lps[j - 1];
            rec.push(
                Op::LpsShift { from: j, to, text: i },
                format!("Mismatch: fall back from pattern[{j}] to pattern[{to}] using lps[{}]", j - 1),
            );
            j = to;
        } else {
            i += 1;
        }
    }
    rec.finish(matches)
}

fn build_lps(rec: &mut Recorder, p: &[char]) -> Vec<usize> {
    let m = p.len();
    let mut lps = vec![0; m];
    rec.push(Op::LpsWrite { index: 0, value: 0 }, "lps[0] = 0");
    let (mut len, mut i) = (0, 1);
    while i < m {
        let equal = p[i] == p[len];
        rec.push(
            Op::LpsCompare { i, len, equal },
            format!(
                "pattern[{i}]='{}' {} pattern[{len}]='{}'",
                p[i],
                if equal { "==" } else { "!=" },
                p[len]
            ),
        );
        if equal {
            len += 1;
            lps[i] = len;
            rec.push(
                Op::LpsWrite {
                    index: i,
                    value: len,
                },
                format!("lps[{i}] = {len}"),
            );
            i += 1;
        } else if len > 0 {
            let to = lps[len - 1];
            rec.push(
                Op::LpsFallback { from: len, to },
                format!("Prefix length falls back from {len} to {to}"),
            );
            len = to;
        } else {
            rec.push(Op::LpsWrite { index: i, value: 0 }, format!("lps[{i}] = 0"));
            i += 1;
        }
    }
    lps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn overlapping_matches() {
        let trace = kmp("AAAA", "AA");
        assert_eq!(trace.result(), &vec![0, 1, 2]);
        assert_eq!(trace.count(StepKind::MatchFound), 3);
    }

    #[test]
    fn lps_of_a_classic_pattern() {
        let p: Vec<char> = "ABABCABAB".chars().collect();
        assert_eq!(lps_table(&p), vec![0, 0, 1, 2, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn recorded_lps_matches_the_plain_table() {
        let pattern = "AABAACAABAA";
        let trace = kmp("AABAACAADAABAABA", pattern);
        let mut recorded = vec![None; pattern.len()];
        for step in &trace {
            if let Op::LpsWrite { index, value } = step.op {
                recorded[index] = Some(value);
            }
        }
        let p: Vec<char> = pattern.chars().collect();
        let expected: Vec<_> = lps_table(&p).into_iter().map(Some).collect();
        assert_eq!(recorded, expected);
    }

    #[test]
    fn failure_function_consults_are_recorded() {
        let trace = kmp("ABABDABACDABABCABAB", "ABABCABAB");
        assert_eq!(trace.result(), &vec![10]);
        assert!(trace.count(StepKind::LpsShift) > 0);
    }

    #[test]
    fn empty_pattern_or_text() {
        assert!(kmp("", "a").is_empty());
        assert!(kmp("abc", "").is_empty());
        assert!(kmp("abc", "").result().is_empty());
    }
}
