use tracing::{debug, info, warn};

use crate::audio::graph::AmbientGraph;
use crate::audio::sink::{AudioSink, AudioStreamConfig};
use crate::config::AmbientConfig;
use crate::foundation::core::Millis;

const CHANNELS: u16 = 2;
const BLOCK_FRAMES: usize = 1024;

/// One open ambient session: a graph, the moment it opened, and its pending teardown.
#[derive(Debug)]
struct LiveSession {
    id: u64,
    graph: AmbientGraph,
    opened_at: Millis,
    /// Teardown time on the graph's own clock, set by a fade-out.
    teardown_at: Option<f64>,
}

/// Owns at most one ambient session and its lifecycle.
///
/// Audio is produced by [`pump`](Self::pump): the engine renders the frames owed between the
/// session's opening and `now` into the sink. Fade automation and the fade-out teardown both
/// run on the graph's clock, so they stay with the graph they were scheduled for; a new
/// `start` never inherits a previous session's teardown.
pub struct AmbientEngine<S: AudioSink> {
    cfg: AmbientConfig,
    sink: Option<S>,
    live: Option<LiveSession>,
    next_id: u64,
    scratch: Vec<f32>,
}

impl<S: AudioSink> AmbientEngine<S> {
    /// Engine writing to `sink`; `None` means no audio capability and every call is a no-op.
    pub fn new(cfg: AmbientConfig, sink: Option<S>) -> Self {
        Self {
            cfg,
            sink,
            live: None,
            next_id: 0,
            scratch: Vec::new(),
        }
    }

    /// Whether an audio output was supplied.
    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    /// The audio output, if one was supplied.
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Mutable access to the audio output.
    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }

    /// Give the sink back, tearing down any live session first.
    pub fn into_sink(mut self) -> Option<S> {
        self.stop();
        self.sink.take()
    }

    /// Open sessions: 0 or 1.
    pub fn live_sessions(&self) -> usize {
        usize::from(self.live.is_some())
    }

    /// Sources producing sound in the live session.
    pub fn live_sources(&self) -> usize {
        self.live.as_ref().map_or(0, |s| s.graph.live_sources())
    }

    /// Whether a fade-out is pending teardown.
    pub fn is_fading(&self) -> bool {
        self.live.as_ref().is_some_and(|s| s.teardown_at.is_some())
    }

    /// The live session's clock in seconds.
    pub fn audio_time(&self) -> Option<f64> {
        self.live.as_ref().map(|s| s.graph.current_time())
    }

    /// Master gain of the live session at its current audio time.
    pub fn master_gain(&self) -> Option<f32> {
        self.live
            .as_ref()
            .map(|s| s.graph.master_value_at(s.graph.current_time()))
    }

    /// Tear down any prior session, then open a fresh graph and fade it in.
    ///
    /// Audio failures degrade to silence; this never fails.
    #[tracing::instrument(skip(self), fields(sample_rate = self.cfg.sample_rate))]
    pub fn start(&mut self, now: Millis) {
        self.stop();

        let Some(sink) = self.sink.as_mut() else {
            debug!("no audio output; ambient start skipped");
            return;
        };

        let stream = AudioStreamConfig {
            sample_rate: self.cfg.sample_rate,
            channels: CHANNELS,
        };
        if let Err(e) = sink.begin(stream) {
            warn!(error = %e, "audio output unavailable; continuing without ambient sound");
            return;
        }

        let mut graph = AmbientGraph::build(&self.cfg);
        let floor = self.cfg.floor_gain;
        let ceiling = self.cfg.ceiling_gain;
        let scheduled = graph
            .master()
            .set_value_at_time(floor, 0.0)
            .and_then(|()| {
                graph
                    .master()
                    .exponential_ramp_to_value_at_time(ceiling, self.cfg.fade_in_secs)
            })
            .and_then(|()| graph.start_sources());
        if let Err(e) = scheduled {
            warn!(error = %e, "ambient graph setup failed; continuing without ambient sound");
            if let Err(e) = sink.end() {
                debug!(error = %e, "audio stream close failed");
            }
            return;
        }

        self.next_id += 1;
        info!(session = self.next_id, "ambient session started");
        self.live = Some(LiveSession {
            id: self.next_id,
            graph,
            opened_at: now,
            teardown_at: None,
        });
    }

    /// Render owed audio up to `now`, then glide the master gain to the floor and schedule
    /// teardown. No-op without a live session or when already fading.
    pub fn fade_out(&mut self, now: Millis) {
        self.pump(now);
        let fade_out = self.cfg.fade_out_secs;
        let teardown_delay = self.cfg.teardown_delay_secs;
        let floor = self.cfg.floor_gain;
        let Some(live) = self.live.as_mut() else {
            return;
        };
        if live.teardown_at.is_some() {
            return;
        }

        let t = live.graph.current_time();
        let held = live.graph.master_value_at(t);
        let master = live.graph.master();
        master.cancel_scheduled_values(t);
        let ramp = master
            .set_value_at_time(held, t)
            .and_then(|()| master.linear_ramp_to_value_at_time(floor, t + fade_out));
        if let Err(e) = ramp {
            warn!(error = %e, "fade-out automation rejected; stopping ambient now");
            self.stop();
            return;
        }
        live.teardown_at = Some(t + teardown_delay);
        info!(session = live.id, from_gain = held, "ambient fade-out");
    }

    /// Immediate teardown of the live session. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };
        if let Err(e) = live.graph.stop_sources() {
            debug!(error = %e, "ignoring redundant source stop");
        }
        live.graph.disconnect();
        if let Err(e) = live.graph.close() {
            debug!(error = %e, "ignoring redundant graph close");
        }
        if let Some(sink) = self.sink.as_mut()
            && let Err(e) = sink.end()
        {
            debug!(error = %e, "ignoring audio stream close failure");
        }
        info!(
            session = live.id,
            audio_secs = live.graph.current_time(),
            "ambient session torn down"
        );
    }

    /// Render the frames owed between the session's opening and `now`, then run a due
    /// teardown. Output write failures stop the session.
    pub fn pump(&mut self, now: Millis) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        let sr = f64::from(live.graph.sample_rate());
        let mut target = (now.since(live.opened_at).max(0.0) / 1000.0 * sr).floor() as u64;
        let teardown_frame = live.teardown_at.map(|t| (t * sr).round() as u64);
        if let Some(tf) = teardown_frame {
            target = target.min(tf);
        }

        let mut failed = false;
        while live.graph.frames_rendered() < target {
            let frames = (target - live.graph.frames_rendered()).min(BLOCK_FRAMES as u64) as usize;
            self.scratch.resize(frames * usize::from(CHANNELS), 0.0);
            live.graph.render(&mut self.scratch);
            if let Err(e) = sink.write(&self.scratch) {
                warn!(error = %e, "audio output failed; stopping ambient");
                failed = true;
                break;
            }
        }

        let due = teardown_frame.is_some_and(|tf| live.graph.frames_rendered() >= tf);
        if failed || due {
            self.stop();
        }
    }
}

impl<S: AudioSink> Drop for AmbientEngine<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<S: AudioSink> std::fmt::Debug for AmbientEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientEngine")
            .field("available", &self.sink.is_some())
            .field("live", &self.live)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/engine.rs"]
mod tests;
