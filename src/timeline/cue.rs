use crate::catalog::SceneDef;

/// A scene placed on the timeline at `[start, end)` seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Cue {
    /// Position in the catalog.
    pub index: usize,
    /// The scene this cue plays.
    pub scene: SceneDef,
    /// Inclusive start in seconds.
    pub start: f64,
    /// Exclusive end in seconds.
    pub end: f64,
}

impl Cue {
    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when `secs` is inside `[start, end)`.
    pub fn contains(&self, secs: f64) -> bool {
        self.start <= secs && secs < self.end
    }
}

/// Contiguous, ordered cue list covering `[0, total_secs)`.
///
/// Built once from the catalog and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    cues: Vec<Cue>,
    total_secs: f64,
}

impl Timeline {
    /// Prefix-sum scene durations into absolute windows.
    ///
    /// An empty catalog yields an empty timeline with a total of 0.
    pub fn build(scenes: &[SceneDef]) -> Self {
        let mut cues = Vec::with_capacity(scenes.len());
        let mut cursor = 0.0;
        for (index, scene) in scenes.iter().enumerate() {
            let start = cursor;
            let end = start + scene.duration;
            cues.push(Cue {
                index,
                scene: scene.clone(),
                start,
                end,
            });
            cursor = end;
        }
        Self {
            cues,
            total_secs: cursor,
        }
    }

    /// All cues in order.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Total length in seconds.
    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    /// Total length in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.total_secs * 1000.0
    }

    /// Return `true` when there are no cues.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// The cue active at `secs`.
    ///
    /// Windows are half-open, except that anything at or past the end maps to the last cue
    /// and anything before 0 maps to the first. `None` only for an empty timeline.
    pub fn cue_at(&self, secs: f64) -> Option<&Cue> {
        // Windows are sorted and contiguous: the first cue ending after `secs` holds it.
        let idx = self.cues.partition_point(|c| c.end <= secs);
        self.cues.get(idx).or_else(|| self.cues.last())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/cue.rs"]
mod tests;
