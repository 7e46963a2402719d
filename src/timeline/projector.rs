use crate::foundation::math::{clamp01, format_timestamp};
use crate::timeline::clock::PlaybackState;
use crate::timeline::cue::{Cue, Timeline};

/// Derived view of the timeline at one elapsed time.
///
/// Pure function of ([`Timeline`], elapsed); recomputed on demand and never stored as a
/// source of truth.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Projection {
    /// Elapsed seconds clamped to `[0, total]`.
    pub elapsed_secs: f64,
    /// Index of the active cue; `None` only for an empty timeline.
    pub active: Option<usize>,
    /// Fraction of the active cue that has elapsed.
    pub scene_progress: f64,
    /// Fraction of the whole timeline that has elapsed.
    pub overall_progress: f64,
    /// Number of characters of the active voice line to reveal.
    pub typed_len: usize,
    /// `MM:SS` of `elapsed_secs`.
    pub timestamp: String,
}

impl Projection {
    /// Project `elapsed_ms` onto `timeline`.
    pub fn at(timeline: &Timeline, elapsed_ms: f64) -> Self {
        let total = timeline.total_secs();
        let elapsed_secs = if elapsed_ms.is_finite() {
            (elapsed_ms / 1000.0).clamp(0.0, total)
        } else {
            0.0
        };

        let cue = timeline.cue_at(elapsed_secs);
        let scene_progress = cue.map_or(0.0, |c| scene_progress(c, elapsed_secs));
        let overall_progress = if total == 0.0 {
            0.0
        } else {
            clamp01(elapsed_secs / total)
        };
        let typed_len = cue.map_or(0, |c| {
            typed_len(c.scene.voice_line.chars().count(), scene_progress)
        });

        Self {
            elapsed_secs,
            active: cue.map(|c| c.index),
            scene_progress,
            overall_progress,
            typed_len,
            timestamp: format_timestamp(elapsed_secs),
        }
    }

    /// Project a playback snapshot.
    pub fn of_state(timeline: &Timeline, state: &PlaybackState) -> Self {
        Self::at(timeline, state.elapsed_ms)
    }

    /// The active cue, resolved against the same timeline.
    pub fn active_cue<'a>(&self, timeline: &'a Timeline) -> Option<&'a Cue> {
        self.active.and_then(|i| timeline.cues().get(i))
    }

    /// Progress to hand the renderer for cue `index`: inactive scenes get 0.
    pub fn progress_for(&self, index: usize) -> f64 {
        if self.active == Some(index) {
            self.scene_progress
        } else {
            0.0
        }
    }

    /// The revealed prefix of the active voice line.
    pub fn typed_subtitle(&self, timeline: &Timeline) -> String {
        self.active_cue(timeline)
            .map(|c| c.scene.voice_line.chars().take(self.typed_len).collect())
            .unwrap_or_default()
    }
}

fn scene_progress(cue: &Cue, elapsed_secs: f64) -> f64 {
    let duration = cue.duration();
    if duration <= 0.0 {
        return 0.0;
    }
    clamp01((elapsed_secs - cue.start) / duration)
}

/// Characters revealed at `progress`: 0 at exactly 0, otherwise at least 1.
pub fn typed_len(text_len: usize, progress: f64) -> usize {
    if text_len == 0 || !(progress > 0.0) {
        return 0;
    }
    let letters = (text_len as f64 * clamp01(progress)).floor() as usize;
    letters.clamp(1, text_len)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/projector.rs"]
mod tests;
