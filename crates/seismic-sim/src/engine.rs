//! Tick driver: owns the wave buffer and talks to the parameter sink.
//!
//! `SeismicSense` applies queued commands and impacts at the tick boundary,
//! advances the buffer, and pushes the resulting snapshot. Keyword changes
//! bypass the tick and reach the sink immediately. Completely headless, so
//! whole frame sequences can be replayed deterministically.

use std::collections::VecDeque;

use glam::Vec3;

use seismic_core::commands::SeismicCommand;
use seismic_core::config::SeismicConfig;
use seismic_core::enums::ShaderKeyword;
use seismic_core::state::PublishedState;
use seismic_core::{Result, SeismicError};

use crate::buffer::WaveBuffer;
use crate::impacts::{ImpactQueue, ImpactSender};
use crate::sink::ParameterSink;

pub struct SeismicSense {
    config: SeismicConfig,
    /// Allocated by `enable`, released by `disable`.
    buffer: Option<WaveBuffer>,
    impacts: ImpactQueue,
    command_queue: VecDeque<SeismicCommand>,
    /// Keyword states last sent to the sink.
    keywords: Option<[(ShaderKeyword, bool); 2]>,
}

impl SeismicSense {
    /// Create a disabled driver with validated settings.
    pub fn new(config: SeismicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            buffer: None,
            impacts: ImpactQueue::new(),
            command_queue: VecDeque::new(),
            keywords: None,
        })
    }

    pub fn config(&self) -> &SeismicConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.buffer.is_some()
    }

    /// Read-only view of the live buffer, if enabled.
    pub fn buffer(&self) -> Option<&WaveBuffer> {
        self.buffer.as_ref()
    }

    /// Allocate a fresh buffer and publish the empty state and keywords.
    ///
    /// Impacts sent before this call are discarded. Enabling an already
    /// enabled driver resets it.
    pub fn enable(&mut self, sink: &mut dyn ParameterSink) {
        let buffer = WaveBuffer::new(
            self.config.max_waves,
            self.config.wave_params(),
            self.config.wave_time_limit,
        )
        .with_eviction(self.config.eviction)
        .with_capture(self.config.capture);

        let dropped = self.impacts.drain().count();
        tracing::info!(
            capacity = buffer.capacity(),
            dropped_impacts = dropped,
            "seismic waves enabled"
        );
        sink.push(&buffer.snapshot());
        self.buffer = Some(buffer);
        self.keywords = None;
        self.sync_keywords(sink);
    }

    /// Release the buffer and publish an inactive state so the sink stops
    /// drawing. Pending impacts are discarded.
    pub fn disable(&mut self, sink: &mut dyn ParameterSink) {
        if self.buffer.take().is_some() {
            let dropped = self.impacts.drain().count();
            tracing::info!(dropped_impacts = dropped, "seismic waves disabled");
            sink.push(&PublishedState::inactive());
        }
    }

    /// Register an impact.
    ///
    /// The wave is inserted at once with the current defaults, unless
    /// earlier commands are still queued; then it waits behind them so
    /// insertion order matches call order. Impacts while disabled are dropped.
    pub fn add_wave(&mut self, point: Vec3) {
        if self.command_queue.is_empty() {
            self.insert_wave(point);
        } else {
            self.command_queue.push_back(SeismicCommand::AddWave { point });
        }
    }

    /// Producer handle for impacts reported from other threads.
    pub fn impact_sender(&self) -> ImpactSender {
        self.impacts.sender()
    }

    /// Queue a command for processing at the next tick boundary.
    ///
    /// `AddWave` follows the same rules as `add_wave`.
    pub fn queue_command(&mut self, command: SeismicCommand) {
        match command {
            SeismicCommand::AddWave { point } => self.add_wave(point),
            other => self.command_queue.push_back(other),
        }
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SeismicCommand>) {
        for command in commands {
            self.queue_command(command);
        }
    }

    /// Replace the settings.
    ///
    /// Defaults, time limit and policies apply to the live buffer at once;
    /// waves already in flight keep their captured shape. Keyword changes
    /// are sent to the sink before returning. A new `max_waves` takes effect
    /// on the next `enable`.
    pub fn set_config(&mut self, config: SeismicConfig, sink: &mut dyn ParameterSink) -> Result<()> {
        config.validate()?;

        if let Some(buffer) = &mut self.buffer {
            buffer.set_defaults(config.wave_params());
            buffer.set_time_limit(config.wave_time_limit);
            buffer.set_eviction(config.eviction);
            buffer.set_capture(config.capture);
            if buffer.capacity() != config.max_waves {
                tracing::warn!(
                    current = buffer.capacity(),
                    requested = config.max_waves,
                    "capacity change deferred until the next enable"
                );
            }
        }

        self.config = config;
        self.sync_keywords(sink);
        Ok(())
    }

    /// Advance one frame: apply queued commands and impacts from other
    /// threads, age the waves, and push the snapshot to the sink.
    ///
    /// An invalid `dt` is rejected before anything is applied.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn ParameterSink) -> Result<PublishedState> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SeismicError::InvalidArgument(format!(
                "dt must be finite and non-negative, got {dt}"
            )));
        }

        self.process_commands(sink);

        let buffer = self.buffer.as_mut().ok_or(SeismicError::NotEnabled)?;
        for point in self.impacts.drain() {
            buffer.add_wave(point);
        }

        let evicted = buffer.advance(dt)?;
        if evicted > 0 {
            tracing::trace!(evicted, active = buffer.active(), "waves expired");
        }

        let state = buffer.snapshot();
        sink.push(&state);
        Ok(state)
    }

    /// Current published state without advancing.
    pub fn snapshot(&self) -> Result<PublishedState> {
        self.buffer
            .as_ref()
            .map(WaveBuffer::snapshot)
            .ok_or(SeismicError::NotEnabled)
    }

    fn process_commands(&mut self, sink: &mut dyn ParameterSink) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, sink);
        }
    }

    fn handle_command(&mut self, command: SeismicCommand, sink: &mut dyn ParameterSink) {
        match command {
            SeismicCommand::AddWave { point } => self.insert_wave(point),
            SeismicCommand::SetConfig { config } => {
                if let Err(e) = self.set_config(config, sink) {
                    tracing::warn!(error = %e, "ignoring SetConfig command");
                }
            }
            SeismicCommand::Enable => self.enable(sink),
            SeismicCommand::Disable => self.disable(sink),
        }
    }

    fn insert_wave(&mut self, point: Vec3) {
        match &mut self.buffer {
            Some(buffer) => buffer.add_wave(point),
            None => tracing::debug!(?point, "impact dropped while disabled"),
        }
    }

    /// Send keyword states that differ from what the sink last saw.
    fn sync_keywords(&mut self, sink: &mut dyn ParameterSink) {
        let desired = self.config.keyword_states();
        for (i, (keyword, enabled)) in desired.iter().copied().enumerate() {
            let known = self.keywords.map(|k| k[i].1);
            if known != Some(enabled) {
                tracing::debug!(keyword = keyword.name(), enabled, "shader keyword");
                sink.set_keyword(keyword, enabled);
            }
        }
        self.keywords = Some(desired);
    }
}
