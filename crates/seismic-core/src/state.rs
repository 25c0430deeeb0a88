//! Published state: the payload handed to the parameter sink each tick.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Snapshot of the wave buffer as the shader sees it.
///
/// `waves` is `None` when nothing is active: the sink only needs the zero
/// count to switch the effect off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedState {
    /// Number of leading entries in each array that are live.
    pub active: u32,
    pub waves: Option<WaveArrays>,
}

/// Parallel per-wave arrays, newest first, each `capacity` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveArrays {
    /// Seconds a wave stays active.
    pub time_limit: f32,
    /// Shared range when every wave follows the current defaults.
    pub range_scalar: Option<f32>,
    pub timer: Vec<f32>,
    /// Homogeneous centers (w = 1).
    pub center: Vec<Vec4>,
    pub range: Vec<f32>,
    pub width: Vec<f32>,
    pub height: Vec<f32>,
    pub color: Vec<Vec4>,
}

impl PublishedState {
    /// State with no active waves.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active > 0
    }

    /// Iterate `(timer, center)` pairs of the live waves only.
    pub fn live_waves(&self) -> impl Iterator<Item = (f32, Vec4)> + '_ {
        let count = self.active as usize;
        self.waves
            .iter()
            .flat_map(move |w| w.timer.iter().copied().zip(w.center.iter().copied()).take(count))
    }
}

impl WaveArrays {
    /// Length of every array.
    pub fn capacity(&self) -> usize {
        self.timer.len()
    }
}
