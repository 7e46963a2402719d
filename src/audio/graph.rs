use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::param::AudioParam;
use crate::config::AmbientConfig;
use crate::foundation::error::{Room213Error, Room213Result};

/// Periodic oscillator shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    /// Pure tone.
    Sine,
    /// Odd-harmonic tone, softer than a square.
    Triangle,
}

impl Waveform {
    /// Sample at `phase` in `[0, 1)`; both shapes start at 0 rising.
    pub fn sample(self, phase: f64) -> f32 {
        let p = phase.rem_euclid(1.0);
        let v = match self {
            Self::Sine => (std::f64::consts::TAU * p).sin(),
            Self::Triangle => {
                if p < 0.25 {
                    4.0 * p
                } else if p < 0.75 {
                    2.0 - 4.0 * p
                } else {
                    4.0 * p - 4.0
                }
            }
        };
        v as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SourceState {
    Idle,
    Started,
    Stopped,
}

/// Shared start/stop bookkeeping for source nodes.
#[derive(Clone, Debug)]
struct Lifecycle {
    name: &'static str,
    state: SourceState,
}

impl Lifecycle {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: SourceState::Idle,
        }
    }

    fn start(&mut self) -> Room213Result<()> {
        if self.state != SourceState::Idle {
            return Err(Room213Error::audio(format!(
                "{} cannot be started twice",
                self.name
            )));
        }
        self.state = SourceState::Started;
        Ok(())
    }

    fn stop(&mut self) -> Room213Result<()> {
        match self.state {
            SourceState::Started => {
                self.state = SourceState::Stopped;
                Ok(())
            }
            SourceState::Idle => Err(Room213Error::audio(format!(
                "{} was never started",
                self.name
            ))),
            SourceState::Stopped => Err(Room213Error::audio(format!(
                "{} already stopped",
                self.name
            ))),
        }
    }

    fn is_running(&self) -> bool {
        self.state == SourceState::Started
    }
}

/// Free-running oscillator source.
#[derive(Clone, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f64,
    phase: f64,
    life: Lifecycle,
}

impl Oscillator {
    fn new(name: &'static str, waveform: Waveform, frequency: f64) -> Self {
        Self {
            waveform,
            frequency,
            phase: 0.0,
            life: Lifecycle::new(name),
        }
    }

    fn next(&mut self, sample_rate: f64) -> f32 {
        if !self.life.is_running() {
            return 0.0;
        }
        let v = self.waveform.sample(self.phase);
        self.phase = (self.phase + self.frequency / sample_rate).fract();
        v
    }
}

/// Looping buffer source over pre-generated noise.
#[derive(Clone, Debug)]
pub struct NoiseLoop {
    buffer: Vec<f32>,
    pos: usize,
    life: Lifecycle,
}

impl NoiseLoop {
    fn generate(frames: usize, amplitude: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let buffer = (0..frames)
            .map(|_| rng.gen_range(-1.0f32..1.0) * amplitude)
            .collect();
        Self {
            buffer,
            pos: 0,
            life: Lifecycle::new("noise source"),
        }
    }

    fn next(&mut self) -> f32 {
        if !self.life.is_running() || self.buffer.is_empty() {
            return 0.0;
        }
        let v = self.buffer[self.pos];
        self.pos = (self.pos + 1) % self.buffer.len();
        v
    }

    /// The pre-generated loop.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }
}

/// Gain stage: an automatable multiplier that can be disconnected.
#[derive(Clone, Debug)]
pub struct Gain {
    /// Automatable gain value.
    pub gain: AudioParam,
    connected: bool,
}

impl Gain {
    fn new(value: f32) -> Self {
        Self {
            gain: AudioParam::new(value),
            connected: true,
        }
    }
}

/// One ambient processing graph:
///
/// ```text
/// drone (triangle) ----------------------------+
/// noise loop -> noise gain --------------------+--> master gain --> out (L = R)
/// lfo (sine) -> lfo gain -> (added to master gain value)
/// ```
///
/// The graph's clock is its rendered-frame counter; all automation times are in seconds on
/// that clock.
#[derive(Clone, Debug)]
pub struct AmbientGraph {
    sample_rate: u32,
    frames_rendered: u64,
    drone: Oscillator,
    noise: NoiseLoop,
    noise_gain: Gain,
    lfo: Oscillator,
    lfo_gain: Gain,
    master: Gain,
    closed: bool,
}

impl AmbientGraph {
    /// Build every node; sources start idle and the master rests at `floor_gain`.
    pub fn build(cfg: &AmbientConfig) -> Self {
        Self {
            sample_rate: cfg.sample_rate,
            frames_rendered: 0,
            drone: Oscillator::new("drone oscillator", Waveform::Triangle, cfg.drone_hz),
            noise: NoiseLoop::generate(cfg.noise_buffer_frames(), cfg.noise_amplitude, cfg.seed),
            noise_gain: Gain::new(cfg.noise_gain),
            lfo: Oscillator::new("lfo oscillator", Waveform::Sine, cfg.lfo_hz),
            lfo_gain: Gain::new(cfg.lfo_depth),
            master: Gain::new(cfg.floor_gain),
            closed: false,
        }
    }

    /// Start all three sources.
    pub fn start_sources(&mut self) -> Room213Result<()> {
        self.drone.life.start()?;
        self.noise.life.start()?;
        self.lfo.life.start()?;
        Ok(())
    }

    /// Stop every source. All stops are attempted; the first failure is returned.
    pub fn stop_sources(&mut self) -> Room213Result<()> {
        let results = [
            self.drone.life.stop(),
            self.noise.life.stop(),
            self.lfo.life.stop(),
        ];
        results.into_iter().collect()
    }

    /// Detach every gain stage from the output. Never fails.
    pub fn disconnect(&mut self) {
        self.master.connected = false;
        self.noise_gain.connected = false;
        self.lfo_gain.connected = false;
    }

    /// Release the graph. Fails if it was already closed.
    pub fn close(&mut self) -> Room213Result<()> {
        if self.closed {
            return Err(Room213Error::audio("audio graph already closed"));
        }
        self.closed = true;
        Ok(())
    }

    /// Whether [`close`](Self::close) ran.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sources currently producing sound.
    pub fn live_sources(&self) -> usize {
        [
            self.drone.life.is_running(),
            self.noise.life.is_running(),
            self.lfo.life.is_running(),
        ]
        .into_iter()
        .filter(|&r| r)
        .count()
    }

    /// Seconds on the graph's own clock.
    pub fn current_time(&self) -> f64 {
        self.frames_rendered as f64 / f64::from(self.sample_rate)
    }

    /// Frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Output sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The master volume parameter.
    pub fn master(&mut self) -> &mut AudioParam {
        &mut self.master.gain
    }

    /// Master gain (without the LFO contribution) at engine time `t`.
    pub fn master_value_at(&self, t: f64) -> f32 {
        self.master.gain.value_at(t)
    }

    /// Noise loop source.
    pub fn noise(&self) -> &NoiseLoop {
        &self.noise
    }

    /// Render interleaved stereo frames into `out` and advance the clock.
    ///
    /// `out.len()` must be even. A closed or disconnected graph writes silence but still
    /// advances.
    pub fn render(&mut self, out: &mut [f32]) {
        let sr = f64::from(self.sample_rate);
        let audible = !self.closed && self.master.connected;
        for frame in out.chunks_exact_mut(2) {
            let t = self.current_time();
            let drone = self.drone.next(sr);
            let noise = self.noise.next();
            let lfo = self.lfo.next(sr);

            let sample = if audible {
                let noise_gain = if self.noise_gain.connected {
                    self.noise_gain.gain.value_at(t)
                } else {
                    0.0
                };
                let lfo_mod = if self.lfo_gain.connected {
                    lfo * self.lfo_gain.gain.value_at(t)
                } else {
                    0.0
                };
                let gain = self.master.gain.value_at(t) + lfo_mod;
                ((drone + noise * noise_gain) * gain).clamp(-1.0, 1.0)
            } else {
                0.0
            };

            frame[0] = sample;
            frame[1] = sample;
            self.frames_rendered += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/graph.rs"]
mod tests;
