use bytemuck::{Pod, Zeroable};

use crate::calculator::BreathState;

/// Uniform block for breath-reactive fragment shaders.
///
/// Layout matches WGSL/std140 rules: a `vec4` followed by two 16-byte rows
/// of scalars, 48 bytes in total.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathUniforms {
    pub resolution: [f32; 4],
    pub time: f32,
    pub time_delta: f32,
    pub frame: i32,
    pub padding0: f32,
    /// Phase index in `0..=3`.
    pub phase: u32,
    pub progress: f32,
    pub phase_progress: f32,
    pub cycle: u32,
}

unsafe impl Zeroable for BreathUniforms {}
unsafe impl Pod for BreathUniforms {}

impl BreathUniforms {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32, 1.0, 0.0],
            ..Self::zeroed()
        }
    }

    pub fn from_state(state: &BreathState, width: u32, height: u32, frame: u64) -> Self {
        let mut uniforms = Self::new(width, height);
        uniforms.update(state, frame, 0.0);
        uniforms
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution[0] = width;
        self.resolution[1] = height;
    }

    pub fn update(&mut self, state: &BreathState, frame: u64, time_delta: f32) {
        self.time = state.elapsed as f32;
        self.time_delta = time_delta.max(0.0);
        self.frame = frame.min(i32::MAX as u64) as i32;
        self.phase = state.phase.index() as u32;
        self.progress = state.progress as f32;
        self.phase_progress = state.phase_progress as f32;
        self.cycle = state.cycle.min(u64::from(u32::MAX)) as u32;
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
