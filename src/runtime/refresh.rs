use crate::foundation::core::Millis;

/// What a refresh step wants next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepControl {
    /// Run again on the next refresh.
    Continue,
    /// Stop; the loop disarms itself.
    Break,
}

/// "Run this step once per display refresh until cancelled."
///
/// The host calls [`RefreshLoop::run`] on every refresh. The step only runs while the loop
/// is armed, and the armed flag is checked before every step, so a cancel between two
/// refreshes always wins over a pending reschedule.
#[derive(Clone, Debug, Default)]
pub struct RefreshLoop {
    armed: bool,
    generation: u64,
    frames: u64,
}

impl RefreshLoop {
    /// Disarmed loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for a new run. Re-arming starts a new generation.
    pub fn arm(&mut self) {
        self.armed = true;
        self.generation += 1;
        self.frames = 0;
    }

    /// Cancel the pending refresh. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    /// Whether a refresh is pending.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Incremented by every [`arm`](Self::arm).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Steps run in the current generation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one refresh step if armed.
    pub fn run(&mut self, now: Millis, step: impl FnOnce(Millis) -> StepControl) -> StepControl {
        if !self.armed {
            return StepControl::Break;
        }
        self.frames += 1;
        let ctl = step(now);
        if ctl == StepControl::Break {
            self.armed = false;
        }
        ctl
    }
}
