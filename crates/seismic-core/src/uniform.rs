//! GPU uniform block layout for a published snapshot.
//!
//! Every array element is a vec4 so the block satisfies std140 array stride
//! rules without manual padding. Per-wave scalars are packed into
//! `shape = (timer, range, width, height)`.

use bytemuck::{Pod, Zeroable};

use crate::constants::MAX_WAVES;
use crate::state::PublishedState;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UniformHeader {
    pub active: u32,
    pub time_limit: f32,
    /// Shared range in global-capture mode, otherwise 0.
    pub range: f32,
    pub capacity: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct UniformBlock {
    pub header: UniformHeader,
    pub center: [[f32; 4]; MAX_WAVES],
    pub color: [[f32; 4]; MAX_WAVES],
    pub shape: [[f32; 4]; MAX_WAVES],
}

impl UniformBlock {
    /// Pack a snapshot. Entries past the packed length stay zeroed.
    pub fn from_state(state: &PublishedState) -> Self {
        let mut block = Self::zeroed();
        block.header.active = state.active;

        let Some(waves) = &state.waves else {
            return block;
        };

        // Ragged arrays (e.g. from a hand-written snapshot) are cut to the shortest.
        let len = [
            waves.timer.len(),
            waves.center.len(),
            waves.color.len(),
            waves.range.len(),
            waves.width.len(),
            waves.height.len(),
            MAX_WAVES,
        ]
        .into_iter()
        .min()
        .unwrap_or(0);
        block.header.time_limit = waves.time_limit;
        block.header.range = waves.range_scalar.unwrap_or(0.0);
        block.header.capacity = len as u32;

        for i in 0..len {
            block.center[i] = waves.center[i].to_array();
            block.color[i] = waves.color[i].to_array();
            block.shape[i] = [
                waves.timer[i],
                waves.range[i],
                waves.width[i],
                waves.height[i],
            ];
        }
        block
    }

    /// Raw bytes ready for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
