use std::cell::Cell;
use std::time::Instant;

use crate::foundation::core::Millis;

/// Source of display-refresh timestamps.
pub trait Clock {
    /// Current monotonic timestamp.
    fn now(&self) -> Millis;
}

/// Wall clock backed by [`Instant`]; the origin is construction time.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at 0 ms.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        Millis(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Hand-driven clock for deterministic runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Start at `start`.
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start.0),
        }
    }

    /// Jump to an absolute timestamp. Going backwards is ignored.
    pub fn set(&self, t: Millis) {
        if t.0 > self.now.get() {
            self.now.set(t.0);
        }
    }

    /// Move forward by `ms`.
    pub fn advance_ms(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now.get())
    }
}

/// Coarse playback phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PlaybackPhase {
    /// Not started, or reset and waiting to run.
    Idle,
    /// Advancing on every refresh.
    Running,
    /// Reached the end; terminal until restart.
    Ended,
}

/// The single mutable playback record.
///
/// `is_playing` and `has_ended` are never both true.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    /// Refreshes advance the clock.
    pub is_playing: bool,
    /// The run reached the total duration.
    pub has_ended: bool,
    /// Elapsed run time, clamped to the total.
    pub elapsed_ms: f64,
}

impl PlaybackState {
    /// Derive the phase from the flags.
    pub fn phase(&self) -> PlaybackPhase {
        match (self.is_playing, self.has_ended) {
            (true, _) => PlaybackPhase::Running,
            (false, true) => PlaybackPhase::Ended,
            (false, false) => PlaybackPhase::Idle,
        }
    }
}

/// Result of one refresh step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    /// Elapsed time moved; another refresh is wanted.
    Running,
    /// This tick reached the total duration.
    Ended,
}

/// Master clock: elapsed time is always `now - run_start`, never accumulated per tick.
#[derive(Clone, Debug)]
pub struct MasterClock {
    state: PlaybackState,
    run_start: Option<Millis>,
    total_ms: f64,
}

impl MasterClock {
    /// Clock for a timeline of `total_ms` milliseconds.
    pub fn new(total_ms: f64) -> Self {
        Self {
            state: PlaybackState::default(),
            run_start: None,
            total_ms: total_ms.max(0.0),
        }
    }

    /// Snapshot of the playback record.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase()
    }

    /// Timeline length this clock clamps to.
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Back to `Idle` at elapsed 0 with `has_ended` cleared.
    pub fn reset(&mut self) {
        self.state = PlaybackState::default();
        self.run_start = None;
    }

    /// Stop ticking without touching `elapsed_ms`; a `Running` clock drops to `Idle`.
    pub fn halt(&mut self) {
        self.state.is_playing = false;
        self.run_start = None;
    }

    /// Enter `Running`. The run start is captured by the first following tick.
    pub fn start(&mut self) {
        self.state.is_playing = true;
        self.state.has_ended = false;
        self.run_start = None;
    }

    /// Advance from a refresh timestamp.
    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        if !self.state.is_playing {
            return TickOutcome::Idle;
        }
        let start = *self.run_start.get_or_insert(now);
        let elapsed = now.since(start).max(0.0);

        if elapsed >= self.total_ms {
            self.state = PlaybackState {
                is_playing: false,
                has_ended: true,
                elapsed_ms: self.total_ms,
            };
            self.run_start = None;
            return TickOutcome::Ended;
        }

        // A fixed start and a monotonic source keep this non-decreasing; the max guards
        // against a host clock that steps backwards.
        self.state.elapsed_ms = elapsed.max(self.state.elapsed_ms);
        TickOutcome::Running
    }
}
