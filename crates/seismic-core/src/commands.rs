//! Commands sent to the effect from the host application.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::SeismicConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SeismicCommand {
    /// Register an impact at a world-space point.
    AddWave { point: Vec3 },
    /// Replace the global settings.
    SetConfig { config: SeismicConfig },
    /// Allocate the wave buffer (clears all waves).
    Enable,
    /// Release the wave buffer.
    Disable,
}
