//! The playback state machine.
//!
//! [`PlaybackController`] owns one trace at a time together with the
//! current index, a status, a speed and a [`Scheduler`]. It is generic over
//! any [`Algorithm`]; the built-in catalog is one instance of it.
//!
//! Status transitions:
//!
//! | verb            | from                      | to                              |
//! |-----------------|---------------------------|---------------------------------|
//! | `generate`      | any                       | `Seeded` (`Completed` if empty) |
//! | `play`          | `Seeded`, `Paused`        | `Playing`                       |
//! | `pause`         | `Playing`                 | `Paused`                        |
//! | `step_forward`  | `Seeded`, `Paused`, `Playing` | `Paused` / `Completed`      |
//! | `step_backward` | `Paused`, `Completed`, `Playing` | `Paused`                 |
//! | `seek`          | any but `Idle`            | `Paused` / `Completed`          |
//! | `reset`         | any but `Idle`            | `Seeded` (`Completed` if empty) |
//!
//! Anything not listed is a no-op that returns `false`. In particular `play`
//! at `Completed` does nothing; call `reset` (or `seek`) first to replay.

use std::fmt;

use crate::checkpoints::Checkpoints;
use crate::render::render;
use crate::scheduler::{Scheduler, Tick};
use crate::step::Step;
use crate::trace::Trace;
use crate::traits::Algorithm;

/// Playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No trace loaded.
    #[default]
    Idle,
    /// Trace loaded, index 0, not advancing.
    Seeded,
    Playing,
    Paused,
    /// Index equals the trace length.
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Idle => "idle",
            Status::Seeded => "seeded",
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Snapshot policy for backward steps and seeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Checkpointing {
    /// Always replay from step zero.
    #[default]
    Off,
    /// Snapshot every ⌈√len⌉ steps.
    Auto,
    /// Snapshot every `n` steps (`n >= 1`).
    Every(usize),
}

/// Tunables fixed when the controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub speed_ms: u64,
    pub min_speed_ms: u64,
    pub max_speed_ms: u64,
    pub checkpoints: Checkpointing,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_ms: 300,
            min_speed_ms: 1,
            max_speed_ms: 5_000,
            checkpoints: Checkpointing::Off,
        }
    }
}

impl PlaybackConfig {
    /// Clamp a requested speed into the configured range (never below 1 ms).
    pub fn clamp_speed(&self, ms: u64) -> u64 {
        let lo = self.min_speed_ms.max(1);
        let hi = self.max_speed_ms.max(lo);
        ms.clamp(lo, hi)
    }
}

struct Session<A: Algorithm> {
    input: A::Input,
    trace: Trace<A::Output>,
    checkpoints: Option<Checkpoints<A::State>>,
    state: A::State,
}

/// Scrubbable playback of one trace.
///
/// ```
/// use stepviz::{Catalog, PlaybackController, Problem, SortAlgorithm, Status};
///
/// let mut player = PlaybackController::new(Catalog);
/// player.generate(Problem::Sort {
///     algorithm: SortAlgorithm::Bubble,
///     values: vec![5, 3, 8, 1, 9],
/// });
/// player.play();
/// while player.status() == Status::Playing {
///     player.advance(player.speed_ms());
/// }
/// assert_eq!(player.render_state().unwrap().values, vec![1, 3, 5, 8, 9]);
/// ```
pub struct PlaybackController<A: Algorithm> {
    algorithm: A,
    config: PlaybackConfig,
    session: Option<Session<A>>,
    index: usize,
    status: Status,
    speed_ms: u64,
    scheduler: Scheduler,
}

impl<A: Algorithm> PlaybackController<A> {
    pub fn new(algorithm: A) -> Self {
        Self::with_config(algorithm, PlaybackConfig::default())
    }

    pub fn with_config(algorithm: A, config: PlaybackConfig) -> Self {
        let speed_ms = config.clamp_speed(config.speed_ms);
        Self {
            algorithm,
            config,
            session: None,
            index: 0,
            status: Status::Idle,
            speed_ms,
            scheduler: Scheduler::new(),
        }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Length of the loaded trace (0 when idle).
    pub fn total_steps(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.trace.len())
    }

    #[inline]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Render state for the current index.
    pub fn render_state(&self) -> Option<&A::State> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn trace(&self) -> Option<&Trace<A::Output>> {
        self.session.as_ref().map(|s| &s.trace)
    }

    pub fn input(&self) -> Option<&A::Input> {
        self.session.as_ref().map(|s| &s.input)
    }

    /// Declared result of the loaded trace.
    pub fn result(&self) -> Option<&A::Output> {
        self.session.as_ref().map(|s| s.trace.result())
    }

    /// The step most recently applied (`trace[index - 1]`).
    pub fn current_step(&self) -> Option<&Step> {
        let session = self.session.as_ref()?;
        self.index.checked_sub(1).and_then(|k| session.trace.get(k))
    }

    /// The step the next forward move will apply.
    pub fn next_step(&self) -> Option<&Step> {
        self.session.as_ref()?.trace.get(self.index)
    }

    /// Live scheduler handles; 1 while playing, 0 otherwise.
    pub fn live_timers(&self) -> usize {
        self.scheduler.live_handles()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run the algorithm on `input` and load the new trace at index 0.
    ///
    /// Cancels any live timer and discards the previous trace and state.
    pub fn generate(&mut self, input: A::Input) -> &A::State {
        self.scheduler.cancel();

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("generate");
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let trace = self.algorithm.generate(&input);
        let checkpoints = match self.config.checkpoints {
            Checkpointing::Off => None,
            Checkpointing::Auto => Some(Checkpoints::build(&self.algorithm, &input, &trace, None)),
            Checkpointing::Every(n) => Some(Checkpoints::build(
                &self.algorithm,
                &input,
                &trace,
                Some(n.max(1)),
            )),
        };
        let state = self.algorithm.seed(&input);
        let next = if trace.is_empty() {
            Status::Completed
        } else {
            Status::Seeded
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(steps = trace.len(), status = %next, "trace loaded");

        self.index = 0;
        self.set_status(next, "generate");
        let session = self.session.insert(Session {
            input,
            trace,
            checkpoints,
            state,
        });
        &session.state
    }

    /// Start automatic advancing from `Seeded` or `Paused`.
    pub fn play(&mut self) -> bool {
        match self.status {
            Status::Seeded | Status::Paused => {
                let _handle = self.scheduler.start(self.speed_ms);
                self.set_status(Status::Playing, "play");
                true
            }
            Status::Idle | Status::Playing | Status::Completed => false,
        }
    }

    /// Stop automatic advancing. The timer is disarmed before this returns.
    pub fn pause(&mut self) -> bool {
        if self.status != Status::Playing {
            return false;
        }
        self.scheduler.cancel();
        self.set_status(Status::Paused, "pause");
        true
    }

    /// Apply the next step. Pauses first if playing.
    pub fn step_forward(&mut self) -> bool {
        match self.status {
            Status::Idle | Status::Completed => false,
            Status::Playing | Status::Seeded | Status::Paused => {
                self.pause();
                if self.forward_one() {
                    if self.status != Status::Completed {
                        self.set_status(Status::Paused, "step_forward");
                    }
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Go back one step by replaying the shorter prefix. Pauses first if playing.
    pub fn step_backward(&mut self) -> bool {
        match self.status {
            Status::Idle | Status::Seeded => false,
            Status::Playing | Status::Paused | Status::Completed => {
                if self.index == 0 {
                    return false;
                }
                self.pause();
                self.replay_to(self.index - 1);
                self.set_status(Status::Paused, "step_backward");
                true
            }
        }
    }

    /// Jump to `index` (clamped to the trace length) by replay.
    pub fn seek(&mut self, index: usize) -> bool {
        if self.status == Status::Idle {
            return false;
        }
        self.scheduler.cancel();
        let target = index.min(self.total_steps());
        self.replay_to(target);
        let next = if target == self.total_steps() {
            Status::Completed
        } else {
            Status::Paused
        };
        self.set_status(next, "seek");
        true
    }

    /// Rewind to index 0 against the same input.
    pub fn reset(&mut self) -> bool {
        self.scheduler.cancel();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.state = self.algorithm.seed(&session.input);
        self.index = 0;
        let next = if session.trace.is_empty() {
            Status::Completed
        } else {
            Status::Seeded
        };
        self.set_status(next, "reset");
        true
    }

    /// Rewind against a new input; same as [`generate`](Self::generate).
    pub fn reset_with(&mut self, input: A::Input) -> &A::State {
        self.generate(input)
    }

    /// Change the auto-advance period (clamped to the configured range).
    ///
    /// The tick already scheduled keeps its due time.
    pub fn set_speed(&mut self, ms: u64) {
        self.speed_ms = self.config.clamp_speed(ms);
        self.scheduler.set_interval(self.speed_ms);
        #[cfg(feature = "tracing")]
        tracing::debug!(speed_ms = self.speed_ms, "speed changed");
    }

    /// Report elapsed host time; applies every tick that came due.
    ///
    /// At most the remaining step count is taken from the scheduler, so a
    /// long stall costs no more than finishing the trace. Returns how many
    /// ticks advanced the index.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let remaining = self.total_steps().saturating_sub(self.index);
        let ticks = self.scheduler.advance(elapsed_ms, remaining);
        ticks.into_iter().filter(|tick| self.on_tick(*tick)).count()
    }

    /// Deliver one tick. Ticks from a cancelled handle, or delivered while
    /// not playing, are ignored.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if self.status != Status::Playing || !self.scheduler.is_current(&tick) {
            #[cfg(feature = "tracing")]
            tracing::trace!(epoch = tick.epoch(), "stale tick ignored");
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(epoch = tick.epoch(), index = self.index, "tick");
        self.forward_one()
    }

    /// Advance the index by one, applying the step incrementally.
    /// Reaching the end disarms the timer and completes playback.
    fn forward_one(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(step) = session.trace.get(self.index) else {
            return false;
        };
        self.algorithm.interpret(&mut session.state, step);
        self.index += 1;
        if self.index == session.trace.len() {
            self.scheduler.cancel();
            self.set_status(Status::Completed, "complete");
        }
        true
    }

    fn replay_to(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let index = index.min(session.trace.len());
        session.state = match &session.checkpoints {
            Some(cps) => cps.render(&self.algorithm, &session.input, session.trace.steps(), index),
            None => render(&self.algorithm, &session.input, session.trace.prefix(index)),
        };
        self.index = index;
    }

    fn set_status(&mut self, next: Status, verb: &'static str) {
        #[cfg(feature = "tracing")]
        {
            if next != self.status {
                tracing::debug!(verb, from = %self.status, to = %next, index = self.index, "transition");
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = verb;
        self.status = next;
        debug_assert_eq!(
            self.status == Status::Playing,
            self.scheduler.is_armed(),
            "a timer must be armed exactly while playing"
        );
        debug_assert!(self.scheduler.live_handles() <= 1);
    }
}

impl<A: Algorithm> fmt::Debug for PlaybackController<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("status", &self.status)
            .field("index", &self.index)
            .field("total_steps", &self.total_steps())
            .field("speed_ms", &self.speed_ms)
            .field("live_timers", &self.live_timers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Op;
    use crate::trace::Recorder;

    /// Counts up to `n`, one step per increment.
    struct Counter;

    impl Algorithm for Counter {
        type Input = usize;
        type Output = usize;
        type State = usize;

        fn generate(&self, input: &usize) -> Trace<usize> {
            let mut rec = Recorder::new();
            for index in 0..*input {
                rec.push(Op::MarkSorted { index }, format!("count {index}"));
            }
            rec.finish(*input)
        }

        fn seed(&self, _input: &usize) -> usize {
            0
        }

        fn interpret(&self, state: &mut usize, _step: &Step) {
            *state += 1;
        }
    }

    #[test]
    fn idle_controller_ignores_every_verb() {
        let mut c = PlaybackController::new(Counter);
        assert!(!c.play());
        assert!(!c.pause());
        assert!(!c.step_forward());
        assert!(!c.step_backward());
        assert!(!c.seek(3));
        assert!(!c.reset());
        assert_eq!(c.status(), Status::Idle);
        assert!(c.render_state().is_none());
    }

    #[test]
    fn step_forward_from_seeded_pauses() {
        let mut c = PlaybackController::new(Counter);
        c.generate(3);
        assert_eq!(c.status(), Status::Seeded);
        assert!(c.step_forward());
        assert_eq!(c.status(), Status::Paused);
        assert_eq!(c.render_state(), Some(&1));
        assert_eq!(c.current_step().map(|s| s.description.as_str()), Some("count 0"));
    }

    #[test]
    fn reaching_the_end_completes_and_disarms() {
        let mut c = PlaybackController::new(Counter);
        c.generate(2);
        c.play();
        assert_eq!(c.live_timers(), 1);
        assert_eq!(c.advance(c.speed_ms() * 10), 2);
        assert_eq!(c.status(), Status::Completed);
        assert_eq!(c.live_timers(), 0);
        assert!(!c.play());
        assert!(!c.step_forward());
    }

    #[test]
    fn long_stall_takes_only_the_remaining_ticks() {
        let mut c = PlaybackController::new(Counter);
        c.generate(4);
        c.set_speed(1);
        c.play();
        assert_eq!(c.advance(20_000_000), 4);
        assert_eq!(c.status(), Status::Completed);
        assert_eq!(c.current_index(), 4);
        assert_eq!(c.live_timers(), 0);
    }

    #[test]
    fn stall_mid_trace_resumes_from_the_new_clock() {
        let mut c = PlaybackController::new(Counter);
        c.generate(10);
        c.set_speed(5);
        c.play();
        assert_eq!(c.advance(5), 1);
        c.pause();
        c.play();
        assert_eq!(c.advance(u64::MAX), 9);
        assert_eq!(c.status(), Status::Completed);
    }

    #[test]
    fn speed_is_clamped_to_config() {
        let config = PlaybackConfig {
            min_speed_ms: 20,
            max_speed_ms: 200,
            ..PlaybackConfig::default()
        };
        let mut c = PlaybackController::with_config(Counter, config);
        assert_eq!(c.speed_ms(), 200);
        c.set_speed(0);
        assert_eq!(c.speed_ms(), 20);
        c.set_speed(90);
        assert_eq!(c.speed_ms(), 90);
    }

    #[test]
    fn checkpointed_seek_matches_plain_seek() {
        let mut plain = PlaybackController::new(Counter);
        let mut snap = PlaybackController::with_config(
            Counter,
            PlaybackConfig {
                checkpoints: Checkpointing::Every(4),
                ..PlaybackConfig::default()
            },
        );
        plain.generate(17);
        snap.generate(17);
        for k in [0, 3, 4, 9, 16, 17, 40] {
            plain.seek(k);
            snap.seek(k);
            assert_eq!(plain.render_state(), snap.render_state(), "k={k}");
            assert_eq!(plain.status(), snap.status());
        }
    }
}
