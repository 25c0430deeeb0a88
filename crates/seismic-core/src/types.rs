//! Wave records and their shape parameters.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Visual shape of a single wave, captured from the global defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    /// Distance the ring travels over its lifetime (world units).
    pub range: f32,
    /// Ring thickness.
    pub width: f32,
    /// Displacement amplitude.
    pub height: f32,
    /// RGBA tint.
    pub color: Vec4,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            range: DEFAULT_WAVE_RANGE,
            width: DEFAULT_WAVE_WIDTH,
            height: DEFAULT_WAVE_HEIGHT,
            color: Vec4::from_array(DEFAULT_WAVE_COLOR),
        }
    }
}

impl WaveParams {
    /// All-zero parameters used for unoccupied slots.
    pub const ZERO: WaveParams = WaveParams {
        range: 0.0,
        width: 0.0,
        height: 0.0,
        color: Vec4::ZERO,
    };
}

/// One slot of the wave buffer.
///
/// A slot is only meaningful while the buffer's active count covers it;
/// otherwise it holds stale data waiting to be overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSlot {
    /// World-space impact point.
    pub center: Vec3,
    /// Seconds since the wave was added.
    pub elapsed: f32,
    pub params: WaveParams,
}

impl Default for WaveSlot {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl WaveSlot {
    /// Zero-initialized slot.
    pub const EMPTY: WaveSlot = WaveSlot {
        center: Vec3::ZERO,
        elapsed: 0.0,
        params: WaveParams::ZERO,
    };

    /// Fresh wave at `center` with the given parameters.
    pub fn new(center: Vec3, params: WaveParams) -> Self {
        Self {
            center,
            elapsed: 0.0,
            params,
        }
    }

    /// Center as a homogeneous point (w = 1), the form the shader expects.
    pub fn center_homogeneous(&self) -> Vec4 {
        self.center.extend(CENTER_W)
    }

    /// Whether this wave has outlived `time_limit`.
    pub fn is_expired(&self, time_limit: f32) -> bool {
        self.elapsed > time_limit
    }
}
