//! Wall-clock host for a shared controller.
//!
//! The controller itself runs on a virtual clock and never sleeps. A
//! [`RealtimeDriver`] owns one background thread that wakes every
//! `resolution`, measures how much real time passed, and feeds it to
//! [`PlaybackController::advance`] under the controller's mutex. Every
//! other caller goes through the same mutex, so transitions stay
//! serialised and a `pause` issued from another thread cancels the timer
//! before the driver can observe a stale tick.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::controller::PlaybackController;
use crate::traits::Algorithm;

type Signal = Arc<(Mutex<bool>, Condvar)>;

/// Block for up to `timeout`; returns `true` once the stop flag is set.
fn wait_for_stop(signal: &Signal, timeout: Duration) -> bool {
    let (lock, cvar) = &**signal;
    let stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
    let (stopped, _) = cvar
        .wait_timeout_while(stopped, timeout, |stopped| !*stopped)
        .unwrap_or_else(PoisonError::into_inner);
    *stopped
}

/// Background thread advancing a shared [`PlaybackController`] in real time.
///
/// Dropping the driver stops and joins the thread.
pub struct RealtimeDriver {
    signal: Signal,
    thread: Option<JoinHandle<()>>,
}

impl RealtimeDriver {
    /// Start driving `controller`, waking every `resolution`.
    ///
    /// The thread exits on [`stop`](Self::stop), on drop, or if the
    /// controller's mutex is poisoned.
    pub fn spawn<A>(controller: Arc<Mutex<PlaybackController<A>>>, resolution: Duration) -> Self
    where
        A: Algorithm,
        PlaybackController<A>: Send + 'static,
    {
        let signal: Signal = Arc::new((Mutex::new(false), Condvar::new()));
        let thread_signal = Arc::clone(&signal);
        let resolution = resolution.max(Duration::from_millis(1));

        let thread = thread::spawn(move || {
            let mut last = Instant::now();
            let mut pending = Duration::ZERO;
            while !wait_for_stop(&thread_signal, resolution) {
                let now = Instant::now();
                pending += now - last;
                last = now;

                let whole_ms = pending.as_millis() as u64;
                if whole_ms == 0 {
                    continue;
                }
                pending -= Duration::from_millis(whole_ms);

                let Ok(mut controller) = controller.lock() else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("controller mutex poisoned; driver exiting");
                    break;
                };
                let fired = controller.advance(whole_ms);
                #[cfg(feature = "tracing")]
                {
                    if fired > 0 {
                        tracing::trace!(elapsed_ms = whole_ms, fired, "driver advanced");
                    }
                }
                #[cfg(not(feature = "tracing"))]
                let _ = fired;
            }
        });

        Self {
            signal,
            thread: Some(thread),
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signal the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        {
            let (lock, cvar) = &*self.signal;
            let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
            *stopped = true;
            cvar.notify_all();
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RealtimeDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::SortAlgorithm;
    use crate::builder::ControllerBuilder;
    use crate::catalog::{Catalog, Problem};
    use crate::controller::Status;

    #[test]
    fn driver_plays_to_completion_in_real_time() {
        let mut player = ControllerBuilder::new(Catalog).with_speed_ms(1).build();
        player.generate(Problem::Sort {
            algorithm: SortAlgorithm::Insertion,
            values: vec![3, 1, 2],
        });
        let total = player.total_steps();
        assert!(player.play());
        let shared = Arc::new(Mutex::new(player));
        let driver = RealtimeDriver::spawn(Arc::clone(&shared), Duration::from_millis(1));

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let status = shared.lock().map(|p| p.status()).unwrap();
            if status == Status::Completed || Instant::now() > deadline {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        driver.stop();

        let player = shared.lock().unwrap();
        assert_eq!(player.status(), Status::Completed);
        assert_eq!(player.current_index(), total);
        assert_eq!(player.live_timers(), 0);
    }

    #[test]
    fn stop_joins_an_idle_driver() {
        let shared = Arc::new(Mutex::new(PlaybackController::new(Catalog)));
        let driver = RealtimeDriver::spawn(shared, Duration::from_millis(5));
        assert!(driver.is_running());
        driver.stop();
    }
}
