//! Single-slot repeating timer on a virtual clock.
//!
//! The scheduler never sleeps. The host reports elapsed time through
//! [`Scheduler::advance`], which returns the ticks that came due. Each tick
//! carries the epoch of the handle that produced it; [`Scheduler::cancel`]
//! bumps the epoch, so a tick obtained before a cancellation is recognisably
//! stale and the controller ignores it.
//!
//! There is at most one armed handle at any time: [`Scheduler::start`]
//! cancels whatever was armed before arming the new one.

/// Token for the armed handle returned by [`Scheduler::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    epoch: u64,
}

impl TimerHandle {
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// One firing of a timer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick {
    epoch: u64,
    /// Virtual time the tick was due at, in milliseconds.
    pub due_ms: u64,
}

impl Tick {
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    epoch: u64,
    interval_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    epoch: u64,
    slot: Option<Armed>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Arm a repeating timer firing every `interval_ms` (at least 1 ms),
    /// first at `now + interval`. Any previously armed handle is cancelled.
    pub fn start(&mut self, interval_ms: u64) -> TimerHandle {
        self.cancel();
        let interval_ms = interval_ms.max(1);
        self.slot = Some(Armed {
            epoch: self.epoch,
            interval_ms,
            next_due_ms: self.now_ms.saturating_add(interval_ms),
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(epoch = self.epoch, interval_ms, "timer armed");
        TimerHandle { epoch: self.epoch }
    }

    /// Disarm the current handle. Every tick handed out so far becomes stale.
    /// Calling this with nothing armed still advances the epoch.
    pub fn cancel(&mut self) {
        if self.slot.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::trace!(epoch = self.epoch, "timer cancelled");
        }
        self.epoch += 1;
    }

    /// Change the period of the armed handle. The tick already scheduled
    /// keeps its due time; the new period applies from the one after it.
    pub fn set_interval(&mut self, interval_ms: u64) {
        if let Some(armed) = self.slot.as_mut() {
            armed.interval_ms = interval_ms.max(1);
        }
    }

    pub fn interval_ms(&self) -> Option<u64> {
        self.slot.map(|a| a.interval_ms)
    }

    /// Due time of the next tick, if armed.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.slot.map(|a| a.next_due_ms)
    }

    /// Move the clock forward and return the ticks that came due, oldest
    /// first, at most `max_ticks` of them.
    ///
    /// Due ticks beyond `max_ticks` are skipped: the next due time still
    /// moves past the new clock, so a long stall never queues a backlog.
    /// Once the next due time would overflow it stays pinned at `u64::MAX`.
    pub fn advance(&mut self, elapsed_ms: u64, max_ticks: usize) -> Vec<Tick> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let Some(armed) = self.slot.as_mut() else {
            return Vec::new();
        };
        if armed.next_due_ms > self.now_ms {
            return Vec::new();
        }

        let first = armed.next_due_ms;
        let interval = armed.interval_ms;
        let came_due = (self.now_ms - first) / interval + 1;
        let delivered = usize::try_from(came_due).map_or(max_ticks, |n| n.min(max_ticks));

        let mut due = Vec::with_capacity(delivered);
        let mut due_ms = first;
        for _ in 0..delivered {
            due.push(Tick {
                epoch: armed.epoch,
                due_ms,
            });
            match due_ms.checked_add(interval) {
                Some(next) => due_ms = next,
                None => break,
            }
        }
        armed.next_due_ms = came_due
            .checked_mul(interval)
            .and_then(|span| first.checked_add(span))
            .unwrap_or(u64::MAX);

        #[cfg(feature = "tracing")]
        {
            if (due.len() as u64) < came_due {
                tracing::trace!(came_due, delivered = due.len(), "ticks past the cap skipped");
            }
        }
        due
    }

    /// Whether `tick` belongs to the currently armed handle.
    #[inline]
    pub fn is_current(&self, tick: &Tick) -> bool {
        self.slot.is_some_and(|a| a.epoch == tick.epoch)
    }

    /// The tick the armed handle would deliver next, without moving the clock.
    pub fn peek(&self) -> Option<Tick> {
        self.slot.map(|a| Tick {
            epoch: a.epoch,
            due_ms: a.next_due_ms,
        })
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.slot.is_some()
    }

    /// Number of live handles; always 0 or 1.
    #[inline]
    pub fn live_handles(&self) -> usize {
        usize::from(self.slot.is_some())
    }
}
