//! Parameter sink: the renderer-facing side of the effect.

use std::collections::HashMap;

use seismic_core::enums::ShaderKeyword;
use seismic_core::state::PublishedState;

/// Receives published wave state and shader keyword toggles.
///
/// Implementations bind the payload to a material or uniform buffer. They
/// are called on the tick thread only.
pub trait ParameterSink {
    /// Receive the state for the current frame.
    fn push(&mut self, state: &PublishedState);

    /// Turn a shader keyword on or off. Called as soon as settings change.
    fn set_keyword(&mut self, keyword: ShaderKeyword, enabled: bool);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ParameterSink for NullSink {
    fn push(&mut self, _state: &PublishedState) {}

    fn set_keyword(&mut self, _keyword: ShaderKeyword, _enabled: bool) {}
}

/// Sink that keeps every call, for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub pushes: Vec<PublishedState>,
    pub keyword_calls: Vec<(ShaderKeyword, bool)>,
    keywords: HashMap<ShaderKeyword, bool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently pushed state.
    pub fn last(&self) -> Option<&PublishedState> {
        self.pushes.last()
    }

    /// Current keyword state (`false` if never set).
    pub fn keyword(&self, keyword: ShaderKeyword) -> bool {
        self.keywords.get(&keyword).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.pushes.clear();
        self.keyword_calls.clear();
    }
}

impl ParameterSink for RecordingSink {
    fn push(&mut self, state: &PublishedState) {
        self.pushes.push(state.clone());
    }

    fn set_keyword(&mut self, keyword: ShaderKeyword, enabled: bool) {
        self.keyword_calls.push((keyword, enabled));
        self.keywords.insert(keyword, enabled);
    }
}
