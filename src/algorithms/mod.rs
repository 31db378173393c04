//! Built-in traced algorithms.
//!
//! Each module runs one textbook algorithm against a recorder and returns a
//! [`Trace`](crate::trace::Trace) with a typed result:
//! - [`sorting`]        : bubble, insertion, selection, merge, quick, heap.
//! - [`distribution`]   : counting sort and LSD radix sort.
//! - [`edit_distance`]  : Levenshtein table plus edit-script backtrack.
//! - [`lcs`]            : longest common subsequence table plus backtrack.
//! - [`palindrome`]     : longest palindromic substring by interval DP.
//! - [`kmp`]            : Knuth–Morris–Pratt with its LPS table.
//! - [`max_subarray`]   : Kadane's scan.
//! - [`sliding_window`] : sliding-window maximum over a monotonic deque.
//! - [`intervals`]      : merge overlapping intervals.
//!
//! The generators are total: they accept any input, including ones the
//! validation layer would reject (empty arrays, zero windows, values far
//! outside the default limits), and produce a short or empty trace for the
//! degenerate ones. Memory still grows with the input: a DP table is
//! quadratic in the string lengths, and counting sort's histogram drops to
//! one slot per distinct value once the value range reaches
//! [`distribution::MAX_OFFSET_SLOTS`].

use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

pub mod distribution;
pub mod edit_distance;
pub mod intervals;
pub mod kmp;
pub mod lcs;
pub mod max_subarray;
pub mod palindrome;
pub mod sliding_window;
pub mod sorting;

/// Sorting algorithms offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
    Heap,
    Counting,
    Radix,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 8] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
        SortAlgorithm::Counting,
        SortAlgorithm::Radix,
    ];

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            SortAlgorithm::Bubble
                | SortAlgorithm::Insertion
                | SortAlgorithm::Merge
                | SortAlgorithm::Counting
                | SortAlgorithm::Radix
        )
    }
}

/// Identifier of every algorithm the catalog can trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmId {
    Sort(SortAlgorithm),
    EditDistance,
    LongestCommonSubsequence,
    LongestPalindrome,
    Kmp,
    MaxSubarray,
    SlidingWindowMax,
    MergeIntervals,
}

/// Shape of input an algorithm expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFamily {
    Array,
    ArrayWithWindow,
    Text,
    TextPair,
    Intervals,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 15] = [
        AlgorithmId::Sort(SortAlgorithm::Bubble),
        AlgorithmId::Sort(SortAlgorithm::Insertion),
        AlgorithmId::Sort(SortAlgorithm::Selection),
        AlgorithmId::Sort(SortAlgorithm::Merge),
        AlgorithmId::Sort(SortAlgorithm::Quick),
        AlgorithmId::Sort(SortAlgorithm::Heap),
        AlgorithmId::Sort(SortAlgorithm::Counting),
        AlgorithmId::Sort(SortAlgorithm::Radix),
        AlgorithmId::EditDistance,
        AlgorithmId::LongestCommonSubsequence,
        AlgorithmId::LongestPalindrome,
        AlgorithmId::Kmp,
        AlgorithmId::MaxSubarray,
        AlgorithmId::SlidingWindowMax,
        AlgorithmId::MergeIntervals,
    ];

    /// Stable kebab-case name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::Sort(SortAlgorithm::Bubble) => "bubble-sort",
            AlgorithmId::Sort(SortAlgorithm::Insertion) => "insertion-sort",
            AlgorithmId::Sort(SortAlgorithm::Selection) => "selection-sort",
            AlgorithmId::Sort(SortAlgorithm::Merge) => "merge-sort",
            AlgorithmId::Sort(SortAlgorithm::Quick) => "quick-sort",
            AlgorithmId::Sort(SortAlgorithm::Heap) => "heap-sort",
            AlgorithmId::Sort(SortAlgorithm::Counting) => "counting-sort",
            AlgorithmId::Sort(SortAlgorithm::Radix) => "radix-sort",
            AlgorithmId::EditDistance => "edit-distance",
            AlgorithmId::LongestCommonSubsequence => "lcs",
            AlgorithmId::LongestPalindrome => "longest-palindrome",
            AlgorithmId::Kmp => "kmp",
            AlgorithmId::MaxSubarray => "max-subarray",
            AlgorithmId::SlidingWindowMax => "sliding-window-max",
            AlgorithmId::MergeIntervals => "merge-intervals",
        }
    }

    pub fn family(self) -> InputFamily {
        match self {
            AlgorithmId::Sort(_) | AlgorithmId::MaxSubarray => InputFamily::Array,
            AlgorithmId::SlidingWindowMax => InputFamily::ArrayWithWindow,
            AlgorithmId::LongestPalindrome => InputFamily::Text,
            AlgorithmId::EditDistance
            | AlgorithmId::LongestCommonSubsequence
            | AlgorithmId::Kmp => InputFamily::TextPair,
            AlgorithmId::MergeIntervals => InputFamily::Intervals,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmId {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownAlgorithm(wanted.to_string()))
    }
}
