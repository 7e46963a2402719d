//! Cooperative single-threaded scheduling primitives.

pub mod refresh;
pub mod timers;
