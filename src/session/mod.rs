//! The top-level owner tying the clock, narration, ambient audio and display together.

mod display;

pub use display::{CueRow, DisplayState};

use tracing::info;

use crate::audio::engine::AmbientEngine;
use crate::audio::sink::AudioSink;
use crate::config::ExperienceConfig;
use crate::foundation::core::Millis;
use crate::foundation::error::Room213Result;
use crate::narration::scheduler::NarrationScheduler;
use crate::narration::speech::SpeechBackend;
use crate::runtime::refresh::{RefreshLoop, StepControl};
use crate::timeline::clock::{MasterClock, PlaybackPhase, PlaybackState, TickOutcome};
use crate::timeline::cue::Timeline;
use crate::timeline::projector::Projection;

/// One experience: a fixed timeline plus the three time streams that play it.
///
/// The host drives it cooperatively:
///
/// - [`begin`](Self::begin) on start and on replay
/// - [`on_refresh`](Self::on_refresh) once per display refresh
/// - [`pump`](Self::pump) whenever convenient, to fire narration and feed audio
///
/// Nothing here blocks or spawns threads; `now` always comes from the host's clock.
pub struct Session<S: AudioSink, B: SpeechBackend> {
    config: ExperienceConfig,
    timeline: Timeline,
    clock: MasterClock,
    refresh: RefreshLoop,
    narration: NarrationScheduler<B>,
    ambient: AmbientEngine<S>,
    runs: u64,
}

impl<S: AudioSink, B: SpeechBackend> Session<S, B> {
    /// Validate `config` and build the timeline. Missing capabilities degrade silently.
    pub fn new(
        config: ExperienceConfig,
        audio: Option<S>,
        speech: Option<B>,
    ) -> Room213Result<Self> {
        config.validate()?;
        let timeline = Timeline::build(&config.scenes);
        let clock = MasterClock::new(timeline.total_ms());
        let narration = NarrationScheduler::new(speech, config.narration.clone(), &timeline);
        let ambient = AmbientEngine::new(config.ambient.clone(), audio);
        Ok(Self {
            config,
            timeline,
            clock,
            refresh: RefreshLoop::new(),
            narration,
            ambient,
            runs: 0,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    /// The cue timeline built at construction.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current playback record.
    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    /// Phase derived from the playback record.
    pub fn phase(&self) -> PlaybackPhase {
        self.clock.phase()
    }

    /// Number of `begin` calls so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Whether a refresh step is pending.
    pub fn wants_refresh(&self) -> bool {
        self.refresh.is_armed()
    }

    /// The narration scheduler.
    pub fn narration(&self) -> &NarrationScheduler<B> {
        &self.narration
    }

    /// Mutable access to the narration scheduler.
    pub fn narration_mut(&mut self) -> &mut NarrationScheduler<B> {
        &mut self.narration
    }

    /// The ambient audio engine.
    pub fn ambient(&self) -> &AmbientEngine<S> {
        &self.ambient
    }

    /// Derived view of the current snapshot.
    pub fn projection(&self) -> Projection {
        Projection::of_state(&self.timeline, &self.clock.state())
    }

    /// Everything a presentation shell shows right now.
    pub fn display(&self) -> DisplayState {
        DisplayState::from_snapshot(&self.timeline, &self.clock.state())
    }

    /// Start (or restart) playback at `now`.
    ///
    /// Every trace of the previous run is released before anything new starts: the pending
    /// refresh, narration timers and in-flight speech, and the previous ambient session.
    #[tracing::instrument(skip(self), fields(run = self.runs + 1))]
    pub fn begin(&mut self, now: Millis) {
        let restart =
            self.clock.phase() != PlaybackPhase::Idle || self.clock.state().elapsed_ms > 0.0;

        self.refresh.cancel();
        self.clock.reset();
        self.narration.cancel();

        self.ambient.start(now);
        self.narration.arm(now);
        self.clock.start();
        self.refresh.arm();

        self.runs += 1;
        info!(
            restart,
            cues = self.timeline.cues().len(),
            total_secs = self.timeline.total_secs(),
            "playback started"
        );
    }

    /// Run one refresh step. Returns whether another refresh is wanted.
    ///
    /// The step that reaches the total duration ends the run and fades the ambient out.
    pub fn on_refresh(&mut self, now: Millis) -> bool {
        let clock = &mut self.clock;
        let mut ended = false;
        let ctl = self.refresh.run(now, |t| match clock.tick(t) {
            TickOutcome::Running => StepControl::Continue,
            TickOutcome::Ended => {
                ended = true;
                StepControl::Break
            }
            TickOutcome::Idle => StepControl::Break,
        });

        if ended {
            info!(frames = self.refresh.frames(), "playback ended");
            self.ambient.fade_out(now);
        }
        ctl == StepControl::Continue
    }

    /// Fire due narration and render owed ambient audio.
    pub fn pump(&mut self, now: Millis) {
        self.narration.poll(now);
        self.ambient.pump(now);
    }

    /// [`on_refresh`](Self::on_refresh) then [`pump`](Self::pump).
    pub fn advance(&mut self, now: Millis) -> bool {
        let more = self.on_refresh(now);
        self.pump(now);
        more
    }

    /// Release all three time streams. The session can still `begin` again afterwards.
    pub fn shutdown(&mut self) {
        self.refresh.cancel();
        self.clock.halt();
        self.narration.cancel();
        self.ambient.stop();
        info!("session shut down");
    }
}
