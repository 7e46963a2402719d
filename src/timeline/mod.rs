//! Timeline core: cue building, the master clock and pure projections.

pub mod clock;
pub mod cue;
pub mod projector;
