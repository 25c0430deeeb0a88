//! Global effect settings.
//!
//! Settings are loaded from TOML (every field optional) and validated before
//! they reach the wave buffer. Shape fields are the defaults captured by each
//! new wave; `transparent` and `displacement` map to shader keywords.

use std::path::Path;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EvictionPolicy, ParameterCapture, ShaderKeyword};
use crate::error::{Result, SeismicError};
use crate::types::WaveParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicConfig {
    /// Number of wave slots. Applied when the buffer is (re)allocated.
    pub max_waves: usize,
    /// Seconds a wave stays active.
    pub wave_time_limit: f32,
    pub wave_range: f32,
    pub wave_width: f32,
    pub wave_height: f32,
    /// RGBA tint, serialized as `[r, g, b, a]`.
    pub wave_color: Vec4,
    pub transparent: bool,
    pub displacement: bool,
    pub eviction: EvictionPolicy,
    pub capture: ParameterCapture,
}

impl Default for SeismicConfig {
    fn default() -> Self {
        Self {
            max_waves: DEFAULT_MAX_WAVES,
            wave_time_limit: DEFAULT_WAVE_TIME_LIMIT,
            wave_range: DEFAULT_WAVE_RANGE,
            wave_width: DEFAULT_WAVE_WIDTH,
            wave_height: DEFAULT_WAVE_HEIGHT,
            wave_color: Vec4::from_array(DEFAULT_WAVE_COLOR),
            transparent: false,
            displacement: false,
            eviction: EvictionPolicy::default(),
            capture: ParameterCapture::default(),
        }
    }
}

impl SeismicConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SeismicConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.max_waves == 0 || self.max_waves > MAX_WAVES {
            return Err(SeismicError::InvalidConfig {
                field: "max_waves",
                reason: format!("must be in 1..={MAX_WAVES}, got {}", self.max_waves),
            });
        }
        check_range(
            "wave_time_limit",
            self.wave_time_limit,
            WAVE_TIME_LIMIT_MIN,
            WAVE_TIME_LIMIT_MAX,
        )?;
        check_range("wave_range", self.wave_range, WAVE_RANGE_MIN, WAVE_RANGE_MAX)?;
        check_range("wave_width", self.wave_width, WAVE_WIDTH_MIN, WAVE_WIDTH_MAX)?;
        if !self.wave_height.is_finite() {
            return Err(SeismicError::InvalidConfig {
                field: "wave_height",
                reason: format!("must be finite, got {}", self.wave_height),
            });
        }
        if !self.wave_color.is_finite() {
            return Err(SeismicError::InvalidConfig {
                field: "wave_color",
                reason: "components must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Shape parameters a wave added now would capture.
    pub fn wave_params(&self) -> WaveParams {
        WaveParams {
            range: self.wave_range,
            width: self.wave_width,
            height: self.wave_height,
            color: self.wave_color,
        }
    }

    /// Desired state of every shader keyword.
    pub fn keyword_states(&self) -> [(ShaderKeyword, bool); 2] {
        [
            (ShaderKeyword::Transparent, self.transparent),
            (ShaderKeyword::Displacement, self.displacement),
        ]
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    // NaN fails both comparisons, so it is rejected here too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(SeismicError::InvalidConfig {
            field,
            reason: format!("must be in {min}..={max}, got {value}"),
        })
    }
}
