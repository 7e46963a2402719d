//! Narration: voice policy, host speech backends and the per-cue scheduler.

pub mod espeak;
pub mod scheduler;
pub mod speech;
pub mod voice;
