//! Enumeration types used throughout the effect.

use serde::{Deserialize, Serialize};

use crate::constants::{KEYWORD_DISPLACEMENT, KEYWORD_TRANSPARENT};

/// Binary shader capability toggled on the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderKeyword {
    /// Render waves with alpha blending instead of opaque.
    Transparent,
    /// Offset vertices along the normal by the wave height.
    Displacement,
}

impl ShaderKeyword {
    pub const ALL: [ShaderKeyword; 2] = [ShaderKeyword::Transparent, ShaderKeyword::Displacement];

    /// Keyword name as compiled into the shader variants.
    pub fn name(self) -> &'static str {
        match self {
            ShaderKeyword::Transparent => KEYWORD_TRANSPARENT,
            ShaderKeyword::Displacement => KEYWORD_DISPLACEMENT,
        }
    }
}

/// How many expired waves a single `advance` may retire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Retire every wave past the time limit, oldest first.
    #[default]
    AllExpired,
    /// Retire at most the single oldest wave per tick. Large `dt` values
    /// leave later over-limit waves active until following ticks.
    OnePerTick,
}

/// Where published per-wave shape parameters come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterCapture {
    /// Each wave keeps the defaults in effect when it was added.
    #[default]
    PerWave,
    /// Every wave reflects the current defaults; the scalar range is published too.
    Global,
}
