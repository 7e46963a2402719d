#![forbid(unsafe_code)]
//! Room 213: a one-minute, timeline-driven horror vignette.
//!
//! A fixed catalog of scenes becomes a contiguous [`Timeline`]. A [`Session`] plays it with
//! three cooperative time streams:
//!
//! - a per-refresh master clock that drives the scene projection and display
//! - fire-once narration timers, one per cue, spoken through a [`SpeechBackend`]
//! - a synthesized ambient soundscape whose automation runs on its own audio clock
//!
//! Host capabilities (speech, audio output) are optional; when absent the session degrades
//! to silence and the visuals still run.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod foundation;
pub mod narration;
pub mod render;
pub mod runtime;
pub mod session;
pub mod timeline;

pub use audio::engine::AmbientEngine;
pub use audio::sink::{AudioSink, AudioStreamConfig, F32leFileSink, InMemoryAudioSink};
pub use catalog::{SceneDef, SceneKey, room_213};
pub use config::{AmbientConfig, ExperienceConfig, NarrationConfig};
pub use foundation::core::{Canvas, Millis};
pub use foundation::error::{Room213Error, Room213Result};
pub use narration::espeak::EspeakSpeech;
pub use narration::scheduler::NarrationScheduler;
pub use narration::speech::{InMemorySpeech, SpeechBackend, Utterance};
pub use narration::voice::Voice;
pub use render::{FrameRGBA, SceneParams, SceneRenderer, SvgSceneRenderer, scene_svg};
pub use session::{CueRow, DisplayState, Session};
pub use timeline::clock::{
    Clock, ManualClock, MasterClock, PlaybackPhase, PlaybackState, SystemClock,
};
pub use timeline::cue::{Cue, Timeline};
pub use timeline::projector::Projection;
