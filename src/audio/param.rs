use crate::foundation::error::{Room213Error, Room213Result};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Curve {
    Set,
    Linear,
    Exponential,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Event {
    time: f64,
    value: f32,
    curve: Curve,
}

/// A gain value with scheduled automation on the audio engine's own clock.
///
/// Semantics follow the usual audio-graph parameter model:
///
/// - `set_value_at_time(v, t)`: jump to `v` at `t`
/// - `*_ramp_to_value_at_time(v, t)`: ramp from the previous event's value/time to `v` at `t`
/// - `cancel_scheduled_values(t)`: drop every event at or after `t`
///
/// Before the first event the intrinsic value applies.
#[derive(Clone, Debug)]
pub struct AudioParam {
    intrinsic: f32,
    events: Vec<Event>,
}

impl AudioParam {
    /// Parameter resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            intrinsic: value,
            events: Vec::new(),
        }
    }

    /// Set the intrinsic value (applies before any scheduled event).
    pub fn set_intrinsic(&mut self, value: f32) {
        self.intrinsic = value;
    }

    /// Jump to `value` at `time`.
    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> Room213Result<()> {
        self.insert(Event {
            time: check_time(time)?,
            value,
            curve: Curve::Set,
        });
        Ok(())
    }

    /// Ramp linearly to `value`, arriving at `time`.
    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) -> Room213Result<()> {
        self.insert(Event {
            time: check_time(time)?,
            value,
            curve: Curve::Linear,
        });
        Ok(())
    }

    /// Ramp exponentially to `value`, arriving at `time`. `value` must be > 0.
    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        time: f64,
    ) -> Room213Result<()> {
        if !(value > 0.0) {
            return Err(Room213Error::audio(
                "exponential ramp target must be > 0",
            ));
        }
        self.insert(Event {
            time: check_time(time)?,
            value,
            curve: Curve::Exponential,
        });
        Ok(())
    }

    /// Drop every scheduled event at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|e| e.time < time);
    }

    /// Number of scheduled events.
    pub fn scheduled(&self) -> usize {
        self.events.len()
    }

    /// Value at engine time `t`.
    pub fn value_at(&self, t: f64) -> f32 {
        let mut prev_time = 0.0;
        let mut prev_value = self.intrinsic;
        for ev in &self.events {
            if ev.time <= t {
                prev_time = ev.time;
                prev_value = ev.value;
                continue;
            }
            let span = ev.time - prev_time;
            if span <= 0.0 {
                return prev_value;
            }
            let frac = ((t - prev_time) / span).clamp(0.0, 1.0);
            return match ev.curve {
                Curve::Set => prev_value,
                Curve::Linear => prev_value + (ev.value - prev_value) * frac as f32,
                Curve::Exponential => {
                    if prev_value > 0.0 && ev.value > 0.0 {
                        prev_value * (ev.value / prev_value).powf(frac as f32)
                    } else {
                        prev_value
                    }
                }
            };
        }
        prev_value
    }

    fn insert(&mut self, ev: Event) {
        // Stable: equal times keep scheduling order.
        let at = self.events.partition_point(|e| e.time <= ev.time);
        self.events.insert(at, ev);
    }
}

fn check_time(t: f64) -> Room213Result<f64> {
    if !t.is_finite() || t < 0.0 {
        return Err(Room213Error::audio(format!(
            "automation time must be finite and >= 0 (got {t})"
        )));
    }
    Ok(t)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/param.rs"]
mod tests;
