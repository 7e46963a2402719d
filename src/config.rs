use std::path::Path;

use crate::catalog::{SceneDef, room_213, validate_catalog};
use crate::foundation::core::Canvas;
use crate::foundation::error::{Room213Error, Room213Result};

/// Everything a [`Session`](crate::Session) needs besides its host capabilities.
///
/// All fields default, so a JSON file only has to name what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Ordered scene catalog.
    pub scenes: Vec<SceneDef>,
    /// Narration timing and voice policy.
    pub narration: NarrationConfig,
    /// Ambient soundscape parameters.
    pub ambient: AmbientConfig,
    /// Stage size for rendered frames.
    pub canvas: Canvas,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            scenes: room_213(),
            narration: NarrationConfig::default(),
            ambient: AmbientConfig::default(),
            canvas: Canvas::default(),
        }
    }
}

impl ExperienceConfig {
    /// Validate every section.
    pub fn validate(&self) -> Room213Result<()> {
        validate_catalog(&self.scenes)?;
        self.narration.validate()?;
        self.ambient.validate()?;
        self.canvas.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Room213Result<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| Room213Error::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: &Path) -> Room213Result<Self> {
        use anyhow::Context as _;
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// Narration timing and voice selection policy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Delay before the first line, covering audio start-up latency.
    pub lead_in_secs: f64,
    /// Speaking rate multiplier (1.0 = host default).
    pub rate: f32,
    /// Pitch multiplier (1.0 = host default).
    pub pitch: f32,
    /// Volume in `[0, 1]`.
    pub volume: f32,
    /// Voices whose language starts with this prefix are preferred.
    pub language_prefix: String,
    /// Case-insensitive name fragments, tried in order.
    pub preferred_voices: Vec<String>,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            lead_in_secs: 0.4,
            rate: 0.94,
            pitch: 0.9,
            volume: 1.0,
            language_prefix: "en".to_owned(),
            preferred_voices: vec!["alloy".to_owned(), "emma".to_owned(), "amy".to_owned()],
        }
    }
}

impl NarrationConfig {
    /// Reject negative lead-in and non-positive rate/pitch.
    pub fn validate(&self) -> Room213Result<()> {
        if !self.lead_in_secs.is_finite() || self.lead_in_secs < 0.0 {
            return Err(Room213Error::validation(
                "narration lead_in_secs must be finite and >= 0",
            ));
        }
        if !(self.rate > 0.0) || !(self.pitch > 0.0) {
            return Err(Room213Error::validation(
                "narration rate and pitch must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(Room213Error::validation(
                "narration volume must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Ambient soundscape parameters.
///
/// Gains are linear amplitudes. Times are seconds on the audio engine's own clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Drone (triangle) frequency.
    pub drone_hz: f64,
    /// Length of the looped noise buffer.
    pub noise_buffer_secs: f64,
    /// Peak amplitude of the raw noise samples.
    pub noise_amplitude: f32,
    /// Gain applied to the noise bed before the master stage.
    pub noise_gain: f32,
    /// Breathing modulator frequency.
    pub lfo_hz: f64,
    /// Modulator depth added to the master gain.
    pub lfo_depth: f32,
    /// "Silent" master gain; exponential ramps cannot start at 0.
    pub floor_gain: f32,
    /// Master gain reached after the fade-in.
    pub ceiling_gain: f32,
    /// Exponential fade-in length.
    pub fade_in_secs: f64,
    /// Linear fade-out length.
    pub fade_out_secs: f64,
    /// Delay between fade-out start and teardown.
    pub teardown_delay_secs: f64,
    /// Seed for the noise buffer.
    pub seed: u64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            drone_hz: 48.0,
            noise_buffer_secs: 3.0,
            noise_amplitude: 0.18,
            noise_gain: 0.02,
            lfo_hz: 0.12,
            lfo_depth: 0.025,
            floor_gain: 0.0001,
            ceiling_gain: 0.085,
            fade_in_secs: 2.2,
            fade_out_secs: 2.4,
            teardown_delay_secs: 2.6,
            seed: 213,
        }
    }
}

impl AmbientConfig {
    /// Check rates, gains and fade ordering.
    pub fn validate(&self) -> Room213Result<()> {
        if self.sample_rate == 0 {
            return Err(Room213Error::validation("ambient sample_rate must be > 0"));
        }
        if !(self.drone_hz > 0.0) || !(self.lfo_hz > 0.0) {
            return Err(Room213Error::validation(
                "ambient drone_hz and lfo_hz must be > 0",
            ));
        }
        if !(self.noise_buffer_secs > 0.0) {
            return Err(Room213Error::validation(
                "ambient noise_buffer_secs must be > 0",
            ));
        }
        if !(self.floor_gain > 0.0) || !(self.ceiling_gain > 0.0) {
            return Err(Room213Error::validation(
                "ambient floor_gain and ceiling_gain must be > 0 (exponential ramps)",
            ));
        }
        for (name, v) in [
            ("fade_in_secs", self.fade_in_secs),
            ("fade_out_secs", self.fade_out_secs),
            ("teardown_delay_secs", self.teardown_delay_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Room213Error::validation(format!(
                    "ambient {name} must be finite and >= 0"
                )));
            }
        }
        if self.teardown_delay_secs < self.fade_out_secs {
            return Err(Room213Error::validation(
                "ambient teardown_delay_secs must be >= fade_out_secs",
            ));
        }
        Ok(())
    }

    /// Number of frames in the looped noise buffer.
    pub fn noise_buffer_frames(&self) -> usize {
        ((f64::from(self.sample_rate) * self.noise_buffer_secs).round() as usize).max(1)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
