//! Errors raised at the input boundary.
//!
//! Generation and playback cannot fail; everything that can go wrong is
//! caught by [`crate::validate`] before a trace is built.

use thiserror::Error;

/// A rejected user input, with a message fit to show as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Array or interval list length outside the allowed bounds.
    #[error("expected between {min} and {max} {what}, got {got}")]
    Length {
        what: &'static str,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("value {value} at position {index} is outside {min}..={max}")]
    ValueOutOfRange {
        index: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Free-text numeric input contained something that is not an integer.
    #[error("'{token}' is not a whole number")]
    NotANumber { token: String },

    #[error("{field} must not be empty")]
    EmptyText { field: &'static str },

    #[error("{field} is {len} characters long; the limit is {max}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("window size {window} must be between 1 and the array length {len}")]
    Window { window: i64, len: usize },

    /// An interval token that is not a `start,end` pair.
    #[error("'{token}' is not an interval; write it as start,end")]
    MalformedInterval { token: String },

    #[error("interval {index} starts at {start} after it ends at {end}")]
    IntervalOrder { index: usize, start: i64, end: i64 },

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}
