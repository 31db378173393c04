//! Input validation at the boundary.
//!
//! Raw user text goes in, a typed [`Problem`] or an [`InputError`] comes
//! out. Nothing past this module can fail: the generators and the
//! controller are total over whatever `prepare` accepts.

use crate::algorithms::intervals::Interval;
use crate::algorithms::AlgorithmId;
use crate::catalog::Problem;
use crate::error::InputError;

/// Documented input bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Fewest elements an array (or interval list) may have.
    pub min_len: usize,
    pub max_len: usize,
    pub min_value: i64,
    pub max_value: i64,
    /// Longest accepted string, in characters.
    pub max_text_len: usize,
    pub max_intervals: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_len: 1,
            max_len: 64,
            min_value: -999,
            max_value: 999,
            max_text_len: 64,
            max_intervals: 32,
        }
    }
}

impl Limits {
    pub fn check_values(&self, values: &[i64]) -> Result<(), InputError> {
        if values.len() < self.min_len || values.len() > self.max_len {
            return Err(InputError::Length {
                what: "values",
                min: self.min_len,
                max: self.max_len,
                got: values.len(),
            });
        }
        for (index, &value) in values.iter().enumerate() {
            if value < self.min_value || value > self.max_value {
                return Err(InputError::ValueOutOfRange {
                    index,
                    value,
                    min: self.min_value,
                    max: self.max_value,
                });
            }
        }
        Ok(())
    }

    pub fn check_text(
        &self,
        field: &'static str,
        text: &str,
        allow_empty: bool,
    ) -> Result<(), InputError> {
        let len = text.chars().count();
        if len == 0 && !allow_empty {
            return Err(InputError::EmptyText { field });
        }
        if len > self.max_text_len {
            return Err(InputError::TextTooLong {
                field,
                len,
                max: self.max_text_len,
            });
        }
        Ok(())
    }

    pub fn check_window(&self, window: i64, len: usize) -> Result<usize, InputError> {
        match usize::try_from(window) {
            Ok(w) if (1..=len).contains(&w) => Ok(w),
            _ => Err(InputError::Window { window, len }),
        }
    }

    pub fn check_intervals(&self, intervals: &[Interval]) -> Result<(), InputError> {
        if intervals.len() < self.min_len || intervals.len() > self.max_intervals {
            return Err(InputError::Length {
                what: "intervals",
                min: self.min_len,
                max: self.max_intervals,
                got: intervals.len(),
            });
        }
        for (index, iv) in intervals.iter().enumerate() {
            if iv.start > iv.end {
                return Err(InputError::IntervalOrder {
                    index,
                    start: iv.start,
                    end: iv.end,
                });
            }
            for value in [iv.start, iv.end] {
                if value < self.min_value || value > self.max_value {
                    return Err(InputError::ValueOutOfRange {
                        index,
                        value,
                        min: self.min_value,
                        max: self.max_value,
                    });
                }
            }
        }
        Ok(())
    }
}

fn parse_int(token: &str) -> Result<i64, InputError> {
    token.parse::<i64>().map_err(|_| InputError::NotANumber {
        token: token.to_string(),
    })
}

/// Parse a free-text list of integers separated by commas and/or
/// whitespace. Empty tokens are skipped, so `"1, 2,,3"` is `[1, 2, 3]`.
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(parse_int)
        .collect()
}

/// Parse `start,end` pairs separated by `;`, each optionally wrapped in
/// brackets: `"[1,3]; [2,6]; 8,10"`.
pub fn parse_intervals(text: &str) -> Result<Vec<Interval>, InputError> {
    text.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|token| {
            let inner = token
                .trim_start_matches(['[', '('])
                .trim_end_matches([']', ')']);
            let malformed = || InputError::MalformedInterval {
                token: token.to_string(),
            };
            let (start, end) = inner.split_once(',').ok_or_else(malformed)?;
            let start = start.trim().parse::<i64>().map_err(|_| malformed())?;
            let end = end.trim().parse::<i64>().map_err(|_| malformed())?;
            Ok(Interval::new(start, end))
        })
        .collect()
}

/// Unparsed form fields. Each algorithm reads only the fields its input
/// family needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub values: String,
    pub window: String,
    /// Text, source string, or left string depending on the algorithm.
    pub text: String,
    /// Pattern, target string, or right string depending on the algorithm.
    pub pattern: String,
    pub intervals: String,
}

impl AlgorithmId {
    /// Validate `raw` for this algorithm and build the typed problem.
    pub fn prepare(self, raw: &RawInput, limits: &Limits) -> Result<Problem, InputError> {
        let problem = match self {
            AlgorithmId::Sort(algorithm) => Problem::Sort {
                algorithm,
                values: checked_values(raw, limits)?,
            },
            AlgorithmId::MaxSubarray => Problem::MaxSubarray {
                values: checked_values(raw, limits)?,
            },
            AlgorithmId::SlidingWindowMax => {
                let values = checked_values(raw, limits)?;
                let window = parse_int(raw.window.trim())?;
                let window = limits.check_window(window, values.len())?;
                Problem::SlidingWindowMax { values, window }
            }
            AlgorithmId::EditDistance => {
                limits.check_text("source", &raw.text, true)?;
                limits.check_text("target", &raw.pattern, true)?;
                Problem::EditDistance {
                    source: raw.text.clone(),
                    target: raw.pattern.clone(),
                }
            }
            AlgorithmId::LongestCommonSubsequence => {
                limits.check_text("first string", &raw.text, false)?;
                limits.check_text("second string", &raw.pattern, false)?;
                Problem::Lcs {
                    left: raw.text.clone(),
                    right: raw.pattern.clone(),
                }
            }
            AlgorithmId::LongestPalindrome => {
                limits.check_text("text", &raw.text, false)?;
                Problem::LongestPalindrome {
                    text: raw.text.clone(),
                }
            }
            AlgorithmId::Kmp => {
                limits.check_text("text", &raw.text, false)?;
                limits.check_text("pattern", &raw.pattern, false)?;
                Problem::Kmp {
                    text: raw.text.clone(),
                    pattern: raw.pattern.clone(),
                }
            }
            AlgorithmId::MergeIntervals => {
                let intervals = parse_intervals(&raw.intervals)?;
                limits.check_intervals(&intervals)?;
                Problem::MergeIntervals { intervals }
            }
        };
        Ok(problem)
    }
}

fn checked_values(raw: &RawInput, limits: &Limits) -> Result<Vec<i64>, InputError> {
    let values = parse_values(&raw.values)?;
    limits.check_values(&values)?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::SortAlgorithm;

    fn values(text: &str) -> RawInput {
        RawInput {
            values: text.into(),
            ..RawInput::default()
        }
    }

    #[test]
    fn parses_mixed_separators() {
        assert_eq!(parse_values(" 5, 3 8,,1\t9 "), Ok(vec![5, 3, 8, 1, 9]));
        assert_eq!(parse_values("-4,+2"), Ok(vec![-4, 2]));
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert_eq!(
            parse_values("1, two, 3"),
            Err(InputError::NotANumber {
                token: "two".into()
            })
        );
    }

    #[test]
    fn sort_input_is_bounded() {
        let limits = Limits::default();
        let id = AlgorithmId::Sort(SortAlgorithm::Merge);
        assert!(matches!(
            id.prepare(&values(""), &limits),
            Err(InputError::Length { got: 0, .. })
        ));
        assert!(matches!(
            id.prepare(&values("1, 1000"), &limits),
            Err(InputError::ValueOutOfRange { index: 1, .. })
        ));
        assert_eq!(
            id.prepare(&values("3 1 2"), &limits),
            Ok(Problem::Sort {
                algorithm: SortAlgorithm::Merge,
                values: vec![3, 1, 2]
            })
        );
    }

    #[test]
    fn window_must_fit_the_array() {
        let limits = Limits::default();
        let mut raw = values("1 2 3");
        raw.window = "4".into();
        assert_eq!(
            AlgorithmId::SlidingWindowMax.prepare(&raw, &limits),
            Err(InputError::Window { window: 4, len: 3 })
        );
        raw.window = "0".into();
        assert!(AlgorithmId::SlidingWindowMax.prepare(&raw, &limits).is_err());
        raw.window = "2".into();
        assert!(AlgorithmId::SlidingWindowMax.prepare(&raw, &limits).is_ok());
    }

    #[test]
    fn strings_required_except_for_edit_distance() {
        let limits = Limits::default();
        let raw = RawInput {
            pattern: "abc".into(),
            ..RawInput::default()
        };
        assert!(AlgorithmId::EditDistance.prepare(&raw, &limits).is_ok());
        assert_eq!(
            AlgorithmId::Kmp.prepare(&raw, &limits),
            Err(InputError::EmptyText { field: "text" })
        );
        let long = RawInput {
            text: "x".repeat(65),
            ..RawInput::default()
        };
        assert!(matches!(
            AlgorithmId::LongestPalindrome.prepare(&long, &limits),
            Err(InputError::TextTooLong { len: 65, .. })
        ));
    }

    #[test]
    fn intervals_parse_with_or_without_brackets() {
        assert_eq!(
            parse_intervals("[1,3]; (2, 6);8,10"),
            Ok(vec![
                Interval::new(1, 3),
                Interval::new(2, 6),
                Interval::new(8, 10)
            ])
        );
        assert_eq!(
            parse_intervals("1-3"),
            Err(InputError::MalformedInterval {
                token: "1-3".into()
            })
        );
    }

    #[test]
    fn reversed_interval_is_rejected() {
        let raw = RawInput {
            intervals: "1,3; 9,4".into(),
            ..RawInput::default()
        };
        assert_eq!(
            AlgorithmId::MergeIntervals.prepare(&raw, &Limits::default()),
            Err(InputError::IntervalOrder {
                index: 1,
                start: 9,
                end: 4
            })
        );
    }
}
