//! Tuning defaults, validation bounds, and shader property names.

// --- Capacity ---

/// Default number of simultaneously tracked waves.
pub const DEFAULT_MAX_WAVES: usize = 20;

/// Hard upper bound on capacity. Matches the array length of the GPU uniform block.
pub const MAX_WAVES: usize = 64;

// --- Timing ---

/// Default wave lifetime in seconds.
pub const DEFAULT_WAVE_TIME_LIMIT: f32 = 10.0;

/// Allowed wave lifetime range in seconds (inclusive).
pub const WAVE_TIME_LIMIT_MIN: f32 = 0.1;
pub const WAVE_TIME_LIMIT_MAX: f32 = 20.0;

// --- Per-wave shape ---

/// Default distance a wave travels before fading (world units).
pub const DEFAULT_WAVE_RANGE: f32 = 10.0;
pub const WAVE_RANGE_MIN: f32 = 0.01;
pub const WAVE_RANGE_MAX: f32 = 50.0;

/// Default ring thickness as a fraction of range.
pub const DEFAULT_WAVE_WIDTH: f32 = 0.07;
pub const WAVE_WIDTH_MIN: f32 = 0.001;
pub const WAVE_WIDTH_MAX: f32 = 1.0;

/// Default displacement amplitude.
pub const DEFAULT_WAVE_HEIGHT: f32 = 1.0;

/// Default wave tint (RGBA, mid grey).
pub const DEFAULT_WAVE_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Homogeneous coordinate appended to every published center.
pub const CENTER_W: f32 = 1.0;

// --- Shader property names ---

pub const UNIFORM_ACTIVE: &str = "_Active";
pub const UNIFORM_TIME_LIMIT: &str = "_TimeLimit";
pub const UNIFORM_TIMER: &str = "_Timer";
pub const UNIFORM_CENTER: &str = "_SeismicCenter";
pub const UNIFORM_RANGE: &str = "_Range";
pub const UNIFORM_WIDTH: &str = "_Width";
pub const UNIFORM_HEIGHT: &str = "_Height";
pub const UNIFORM_COLOR: &str = "_WaveColor";

// --- Shader keywords ---

pub const KEYWORD_TRANSPARENT: &str = "SEISMIC_TRANSPARENT";
pub const KEYWORD_DISPLACEMENT: &str = "SEISMIC_DISPLACEMENT";
