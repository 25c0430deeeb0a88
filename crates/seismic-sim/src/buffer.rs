//! Wave buffer: a fixed-capacity, newest-first ring of wave slots.
//!
//! Logical index 0 is the most recent wave. Insertion moves the head one
//! slot back and overwrites whatever was the oldest slot, so no element is
//! ever shifted. The first `active` logical slots are live; the rest are
//! stale and will be overwritten by later insertions.

use glam::Vec3;

use seismic_core::enums::{EvictionPolicy, ParameterCapture};
use seismic_core::state::{PublishedState, WaveArrays};
use seismic_core::types::{WaveParams, WaveSlot};
use seismic_core::{Result, SeismicError};

#[derive(Debug, Clone)]
pub struct WaveBuffer {
    /// Physical storage, always exactly `capacity` long.
    slots: Vec<WaveSlot>,
    /// Physical index of logical slot 0.
    head: usize,
    active: usize,
    defaults: WaveParams,
    time_limit: f32,
    eviction: EvictionPolicy,
    capture: ParameterCapture,
}

impl WaveBuffer {
    /// Allocate `capacity` zeroed slots with no active waves.
    ///
    /// Capacity is validated by `SeismicConfig::validate`; a zero capacity
    /// is bumped to one so the ring arithmetic stays defined.
    pub fn new(capacity: usize, defaults: WaveParams, time_limit: f32) -> Self {
        Self {
            slots: vec![WaveSlot::EMPTY; capacity.max(1)],
            head: 0,
            active: 0,
            defaults,
            time_limit,
            eviction: EvictionPolicy::default(),
            capture: ParameterCapture::default(),
        }
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn with_capture(mut self, capture: ParameterCapture) -> Self {
        self.capture = capture;
        self
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live waves, always in `0..=capacity`.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    pub fn defaults(&self) -> WaveParams {
        self.defaults
    }

    pub fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    pub fn capture(&self) -> ParameterCapture {
        self.capture
    }

    /// Replace the defaults captured by future waves. In-flight waves keep
    /// their own parameters unless the capture mode is `Global`.
    pub fn set_defaults(&mut self, defaults: WaveParams) {
        self.defaults = defaults;
    }

    pub fn set_time_limit(&mut self, time_limit: f32) {
        self.time_limit = time_limit;
    }

    pub fn set_eviction(&mut self, eviction: EvictionPolicy) {
        self.eviction = eviction;
    }

    pub fn set_capture(&mut self, capture: ParameterCapture) {
        self.capture = capture;
    }

    /// Slot at logical index `index` (0 = newest), live or stale.
    pub fn slot(&self, index: usize) -> Option<&WaveSlot> {
        if index < self.slots.len() {
            Some(&self.slots[self.physical(index)])
        } else {
            None
        }
    }

    /// All slots in logical order, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &WaveSlot> + '_ {
        (0..self.slots.len()).map(move |i| &self.slots[self.physical(i)])
    }

    /// Live waves only, newest first.
    pub fn active_waves(&self) -> impl Iterator<Item = &WaveSlot> + '_ {
        self.iter().take(self.active)
    }

    /// Insert a wave at `point`, discarding the oldest slot. Never fails.
    pub fn add_wave(&mut self, point: Vec3) {
        let capacity = self.slots.len();
        self.head = (self.head + capacity - 1) % capacity;
        self.slots[self.head] = WaveSlot::new(point, self.defaults);
        if self.active < capacity {
            self.active += 1;
        }
    }

    /// Age every slot by `dt` seconds, then retire expired waves.
    ///
    /// Returns the number of waves retired. Negative or non-finite `dt` is
    /// rejected without touching any state.
    pub fn advance(&mut self, dt: f32) -> Result<usize> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SeismicError::InvalidArgument(format!(
                "dt must be finite and non-negative, got {dt}"
            )));
        }

        for slot in &mut self.slots {
            slot.elapsed += dt;
        }

        let mut evicted = 0;
        while self.active > 0 && self.oldest_active_expired() {
            self.active -= 1;
            evicted += 1;
            if self.eviction == EvictionPolicy::OnePerTick {
                break;
            }
        }
        Ok(evicted)
    }

    /// Build the published payload. Pure read.
    pub fn snapshot(&self) -> PublishedState {
        if self.active == 0 {
            return PublishedState::inactive();
        }

        let capacity = self.slots.len();
        let mut waves = WaveArrays {
            time_limit: self.time_limit,
            range_scalar: None,
            timer: Vec::with_capacity(capacity),
            center: Vec::with_capacity(capacity),
            range: Vec::with_capacity(capacity),
            width: Vec::with_capacity(capacity),
            height: Vec::with_capacity(capacity),
            color: Vec::with_capacity(capacity),
        };

        if self.capture == ParameterCapture::Global {
            waves.range_scalar = Some(self.defaults.range);
        }

        for slot in self.iter() {
            let params = match self.capture {
                ParameterCapture::PerWave => slot.params,
                ParameterCapture::Global => self.defaults,
            };
            waves.timer.push(slot.elapsed);
            waves.center.push(slot.center_homogeneous());
            waves.range.push(params.range);
            waves.width.push(params.width);
            waves.height.push(params.height);
            waves.color.push(params.color);
        }

        PublishedState {
            active: self.active as u32,
            waves: Some(waves),
        }
    }

    /// Drop every wave and zero the slots, keeping capacity and settings.
    pub fn clear(&mut self) {
        self.slots.fill(WaveSlot::EMPTY);
        self.head = 0;
        self.active = 0;
    }

    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.slots.len()
    }

    fn oldest_active_expired(&self) -> bool {
        self.slots[self.physical(self.active - 1)].is_expired(self.time_limit)
    }
}
