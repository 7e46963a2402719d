use crate::foundation::error::{Room213Error, Room213Result};

/// Monotonic timestamp in milliseconds from an arbitrary origin.
///
/// This mirrors a display-refresh timestamp: only differences between two values are
/// meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Millis(pub f64);

impl Millis {
    /// Timestamp `secs` seconds from the origin.
    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is later).
    pub fn since(self, earlier: Millis) -> f64 {
        self.0 - earlier.0
    }

    /// Shift by `secs` seconds.
    pub fn add_secs(self, secs: f64) -> Self {
        Self(self.0 + secs * 1000.0)
    }

    /// Value in seconds.
    pub fn as_secs(self) -> f64 {
        self.0 / 1000.0
    }
}

/// Stage dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        // 9:16 portrait stage.
        Self {
            width: 360,
            height: 640,
        }
    }
}

impl Canvas {
    /// Reject zero-sized stages.
    pub fn validate(&self) -> Room213Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Room213Error::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Width as `f64`.
    pub fn w(&self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(&self) -> f64 {
        f64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
