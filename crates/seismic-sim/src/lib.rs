//! Runtime for the seismic wave effect.
//!
//! Owns the wave buffer, ages and retires waves each tick, and publishes
//! the resulting parameters to a `ParameterSink`.

pub mod buffer;
pub mod engine;
pub mod impacts;
pub mod sink;

pub use buffer::WaveBuffer;
pub use engine::SeismicSense;
pub use seismic_core as core;
pub use sink::{NullSink, ParameterSink, RecordingSink};
