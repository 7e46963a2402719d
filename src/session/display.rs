use crate::catalog::SceneKey;
use crate::foundation::math::format_timestamp;
use crate::timeline::clock::PlaybackState;
use crate::timeline::cue::Timeline;
use crate::timeline::projector::Projection;

/// One transcript row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CueRow {
    pub index: usize,
    pub title: String,
    /// `MM:SS` of the cue start.
    pub start_stamp: String,
    pub voice_line: String,
    pub sensation: String,
    pub active: bool,
}

/// Everything a presentation shell shows, derived from one playback snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// Active scene, if the timeline has any.
    pub scene: Option<SceneKey>,
    /// Progress to render the active scene at.
    pub scene_progress: f64,
    pub title: String,
    pub sensation: String,
    /// `MM:SS` of elapsed time.
    pub timestamp: String,
    pub overall_progress: f64,
    pub typed_subtitle: String,
    pub is_playing: bool,
    /// Shown before the first run.
    pub show_intro: bool,
    /// Shown once a run has ended, until the next `begin`.
    pub show_replay: bool,
    pub rows: Vec<CueRow>,
}

impl DisplayState {
    /// Derive the display from `state`. Pure.
    pub fn from_snapshot(timeline: &Timeline, state: &PlaybackState) -> Self {
        let projection = Projection::of_state(timeline, state);
        let cue = projection.active_cue(timeline);

        let rows = timeline
            .cues()
            .iter()
            .map(|c| CueRow {
                index: c.index,
                title: c.scene.title.clone(),
                start_stamp: format_timestamp(c.start),
                voice_line: c.scene.voice_line.clone(),
                sensation: c.scene.sensation.clone(),
                active: projection.active == Some(c.index),
            })
            .collect();

        Self {
            scene: cue.map(|c| c.scene.key),
            scene_progress: projection.scene_progress,
            title: cue.map(|c| c.scene.title.clone()).unwrap_or_default(),
            sensation: cue.map(|c| c.scene.sensation.clone()).unwrap_or_default(),
            typed_subtitle: projection.typed_subtitle(timeline),
            timestamp: projection.timestamp,
            overall_progress: projection.overall_progress,
            is_playing: state.is_playing,
            show_intro: !state.is_playing && state.elapsed_ms == 0.0 && !state.has_ended,
            show_replay: !state.is_playing && state.has_ended,
            rows,
        }
    }
}
