use crate::controller::{Checkpointing, PlaybackConfig, PlaybackController};
use crate::traits::Algorithm;

pub struct ControllerBuilder<A: Algorithm> {
    algorithm: A,
    config: PlaybackConfig,
}

impl<A: Algorithm> ControllerBuilder<A> {
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            config: PlaybackConfig::default(),
        }
    }
    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.config.speed_ms = speed_ms;
        self
    }
    /// Bounds applied to every later `set_speed` call.
    pub fn with_speed_range(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.config.min_speed_ms = min_ms;
        self.config.max_speed_ms = max_ms;
        self
    }
    pub fn with_checkpoints(mut self, checkpoints: Checkpointing) -> Self {
        self.config.checkpoints = checkpoints;
        self
    }
    pub fn with_checkpoint_interval(self, every: usize) -> Self {
        self.with_checkpoints(Checkpointing::Every(every.max(1)))
    }
    pub fn build(self) -> PlaybackController<A> {
        PlaybackController::with_config(self.algorithm, self.config)
    }
}
