use crate::config::NarrationConfig;
use crate::foundation::core::Millis;
use crate::narration::speech::{SpeechBackend, Utterance};
use crate::narration::voice::{Voice, pick_voice};
use crate::runtime::timers::TimerSet;
use crate::timeline::cue::Timeline;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ScheduleState {
    Idle,
    /// Voices were not enumerated at arm time; waiting for the one-shot readiness signal.
    AwaitingVoices { origin: Millis },
    Armed,
}

#[derive(Clone, Debug)]
struct Line {
    cue: usize,
    text: String,
}

/// Fires one narration line per cue, on timers independent of the master clock.
///
/// Lines are scheduled at `origin + lead_in + cue.start`, where `origin` is the `begin`
/// moment. All pending timers live in one owned [`TimerSet`]; every cancel path (restart,
/// [`cancel`](Self::cancel), drop) clears it and silences the host.
///
/// Without a speech backend the scheduler is a no-op.
pub struct NarrationScheduler<B: SpeechBackend> {
    backend: Option<B>,
    config: NarrationConfig,
    state: ScheduleState,
    pending: TimerSet<Line>,
    lines: Vec<(usize, f64, String)>,
    voice: Option<Voice>,
    fired: usize,
}

impl<B: SpeechBackend> NarrationScheduler<B> {
    /// Scheduler for `timeline`; `backend = None` means speech is unavailable.
    pub fn new(backend: Option<B>, config: NarrationConfig, timeline: &Timeline) -> Self {
        let lines = timeline
            .cues()
            .iter()
            .map(|c| (c.index, c.start, c.scene.voice_line.clone()))
            .collect();
        Self {
            backend,
            config,
            state: ScheduleState::Idle,
            pending: TimerSet::new(),
            lines,
            voice: None,
            fired: 0,
        }
    }

    /// Whether a speech capability is present.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Borrow the host backend.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Mutably borrow the host backend.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Lines still waiting to fire.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Lines fired since the last arm.
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Whether scheduling is deferred until voices load.
    pub fn is_awaiting_voices(&self) -> bool {
        matches!(self.state, ScheduleState::AwaitingVoices { .. })
    }

    /// Voice chosen for the current run.
    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    /// Cancel any previous run, then schedule every line relative to `now`.
    pub fn arm(&mut self, now: Millis) {
        self.cancel();
        let Some(backend) = self.backend.as_mut() else {
            tracing::debug!("speech unavailable; narration skipped");
            return;
        };

        let voices = backend.voices();
        if voices.is_empty() {
            backend.watch_voices(true);
            self.state = ScheduleState::AwaitingVoices { origin: now };
            tracing::debug!("voices not loaded yet; narration deferred");
            return;
        }
        self.schedule(now, &voices);
    }

    /// Cancel pending lines, silence current speech, drop the readiness watcher.
    pub fn cancel(&mut self) {
        let dropped = self.pending.clear();
        let was_awaiting = self.is_awaiting_voices();
        self.state = ScheduleState::Idle;
        self.fired = 0;
        if let Some(backend) = self.backend.as_mut() {
            if was_awaiting {
                backend.watch_voices(false);
            }
            backend.cancel_all();
        }
        if dropped > 0 {
            tracing::debug!(dropped, "narration cancelled");
        }
    }

    /// Resolve deferred scheduling and fire every line due at `now`.
    pub fn poll(&mut self, now: Millis) {
        if let Some(backend) = self.backend.as_mut() {
            backend.poll();
        }
        if let ScheduleState::AwaitingVoices { origin } = self.state {
            let Some(backend) = self.backend.as_mut() else {
                return;
            };
            if !backend.voices_changed() {
                return;
            }
            // One-shot: deregister before scheduling so a restart cannot double-schedule.
            backend.watch_voices(false);
            let voices = backend.voices();
            if voices.is_empty() {
                tracing::info!("no voices available; narration skipped");
                self.state = ScheduleState::Idle;
                return;
            }
            self.schedule(origin, &voices);
            self.skip_stale(now);
        }

        let due = self.pending.take_due(now);
        if due.is_empty() {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        for line in due {
            let utterance = Utterance {
                text: line.text,
                voice: self.voice.clone(),
                rate: self.config.rate,
                pitch: self.config.pitch,
                volume: self.config.volume,
            };
            match backend.speak(utterance) {
                Ok(()) => tracing::debug!(cue = line.cue, "narration line fired"),
                Err(e) => tracing::warn!(cue = line.cue, error = %e, "narration line dropped"),
            }
            self.fired += 1;
        }
    }

    /// Keep only the most recent overdue line; older ones belong to scenes already gone.
    fn skip_stale(&mut self, now: Millis) {
        let mut overdue = self.pending.take_due(now);
        let Some(latest) = overdue.pop() else {
            return;
        };
        self.pending.schedule(now, latest);
        if !overdue.is_empty() {
            tracing::info!(skipped = overdue.len(), "late voices; stale narration lines skipped");
        }
    }

    fn schedule(&mut self, origin: Millis, voices: &[Voice]) {
        let Some(voice) = pick_voice(
            voices,
            &self.config.language_prefix,
            &self.config.preferred_voices,
        ) else {
            self.state = ScheduleState::Idle;
            return;
        };
        self.voice = Some(voice.clone());

        for (cue, start, text) in &self.lines {
            let due = origin.add_secs(self.config.lead_in_secs + start);
            self.pending.schedule(
                due,
                Line {
                    cue: *cue,
                    text: text.clone(),
                },
            );
        }
        self.state = ScheduleState::Armed;
        tracing::debug!(
            lines = self.pending.len(),
            voice = %voice.name,
            "narration armed"
        );
    }
}

impl<B: SpeechBackend> Drop for NarrationScheduler<B> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narration/scheduler.rs"]
mod tests;
