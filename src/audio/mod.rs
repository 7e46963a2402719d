//! Ambient soundscape: parameter automation, the synthesis graph, the session engine and
//! audio outputs.

pub mod engine;
pub mod graph;
pub mod param;
pub mod sink;
