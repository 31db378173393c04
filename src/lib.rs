//! Step-by-step algorithm playback.
//!
//! This crate runs textbook algorithms while recording every state-changing
//! operation as an immutable [`Step`], and lets a host scrub through the
//! recording: play at a chosen speed, pause, step forward and backward,
//! seek, reset.
//!
//! ## Core idea
//! 1. An [`Algorithm`] runs once and records a [`Trace`]: the ordered steps
//!    plus its declared result.
//! 2. The visible state after `k` steps is a pure fold of
//!    [`Algorithm::interpret`] over `trace[..k]`, starting from
//!    [`Algorithm::seed`]. Nothing is undone; going backward means replaying
//!    a shorter prefix (optionally from a [`Checkpoints`] snapshot).
//! 3. A [`PlaybackController`] owns the index, the status and a
//!    single-slot [`Scheduler`], so at most one timer ever advances it.
//!
//! ## Quick start
//! ```
//! use stepviz::{AlgorithmId, Catalog, Limits, Outcome, PlaybackController, RawInput, Status};
//!
//! let raw = RawInput { text: "AAAA".into(), pattern: "AA".into(), ..RawInput::default() };
//! let problem = AlgorithmId::Kmp.prepare(&raw, &Limits::default()).unwrap();
//!
//! let mut player = PlaybackController::new(Catalog);
//! player.generate(problem);
//! assert_eq!(player.status(), Status::Seeded);
//!
//! player.seek(usize::MAX);
//! assert_eq!(player.status(), Status::Completed);
//! assert_eq!(player.result(), Some(&Outcome::Matches(vec![0, 1, 2])));
//! assert_eq!(player.render_state().unwrap().matches, vec![0, 1, 2]);
//! ```
//!
//! ## Built-in algorithms
//! The [`Catalog`] covers:
//! - bubble, insertion, selection, merge, quick, heap, counting and radix sort
//! - edit distance, longest common subsequence, longest palindromic substring
//! - Knuth–Morris–Pratt substring search
//! - maximum subarray (Kadane), sliding-window maximum, merge intervals
//!
//! Other algorithms plug in by implementing [`Algorithm`] with their own
//! state type.
//!
//! ## Features
//! - `tracing` (default): spans around generation and replay, events on
//!   controller transitions.
//! - `parallel`: [`render::render_all`] replays every prefix on rayon's pool.
//! - `serde`: `Serialize`/`Deserialize` on steps, traces, frames and results.
//! - `probe`: builds the `trace_probe` binary.

pub mod algorithms;
pub mod builder;
pub mod catalog;
pub mod checkpoints;
pub mod controller;
pub mod driver;
pub mod error;
pub mod frame;
pub mod render;
pub mod scheduler;
pub mod step;
pub mod trace;
pub mod traits;
pub mod utils;
pub mod validate;

pub use crate::algorithms::edit_distance::EditOp;
pub use crate::algorithms::intervals::Interval;
pub use crate::algorithms::{AlgorithmId, InputFamily, SortAlgorithm};
pub use crate::builder::ControllerBuilder;
pub use crate::catalog::{Catalog, Outcome, Problem};
pub use crate::checkpoints::Checkpoints;
pub use crate::controller::{Checkpointing, PlaybackConfig, PlaybackController, Status};
pub use crate::driver::RealtimeDriver;
pub use crate::error::InputError;
pub use crate::frame::{Frame, Table};
pub use crate::scheduler::{Scheduler, Tick, TimerHandle};
pub use crate::step::{Choice, CmpOp, DequeEnd, Op, Step, StepKind};
pub use crate::trace::Trace;
pub use crate::traits::Algorithm;
pub use crate::validate::{Limits, RawInput};
