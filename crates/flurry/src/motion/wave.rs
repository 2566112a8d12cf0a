//! Wave cloud: every particle wanders through a trigonometric turbulence field
//! while the whole cloud slowly rotates, nudged by the smoothed pointer.

use glam::{Vec2, Vec3};

use super::{FieldTransform, MotionStrategy};
use crate::api::types::{DirtyBuffers, Frame};
use crate::core::time::ClockMode;
use crate::field::{FieldLayout, ParticleField};
use crate::input::pointer::SmoothedPointer;

/// Tuning constants for [`WaveMotion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Animation time added per tick.
    pub time_step: f32,
    /// Per-axis displacement amplitude per tick.
    pub amplitude: f32,
    pub scale_base: f32,
    pub scale_amplitude: f32,
    pub color_base: f32,
    pub color_amplitude: f32,
    /// Constant rotation per tick (x, y axes).
    pub drift: Vec2,
    /// Rotation per tick per unit of smoothed pointer offset.
    pub pointer_gain: f32,
    /// Pointer smoothing factor.
    pub smoothing: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            time_step: 0.015,
            amplitude: 0.03,
            scale_base: 1.0,
            scale_amplitude: 0.4,
            color_base: 0.5,
            color_amplitude: 0.5,
            drift: Vec2::new(0.001, 0.002),
            pointer_gain: 0.0005,
            smoothing: SmoothedPointer::DEFAULT_FACTOR,
        }
    }
}

/// Cumulative wave motion. Each tick's output is the next tick's input, so the
/// cloud drifts indefinitely.
#[derive(Debug, Clone)]
pub struct WaveMotion {
    params: WaveParams,
    pointer: SmoothedPointer,
    transform: FieldTransform,
}

impl WaveMotion {
    pub fn new(params: WaveParams) -> Self {
        Self {
            pointer: SmoothedPointer::new(params.smoothing),
            params,
            transform: FieldTransform::IDENTITY,
        }
    }

    /// Smoothed pointer target after the last advance.
    pub fn pointer_target(&self) -> Vec2 {
        self.pointer.target()
    }

    fn rotate(&mut self, target: Vec2) {
        let p = &self.params;
        let rot = &mut self.transform.rotation;
        rot.y += p.drift.y;
        rot.x += p.drift.x;
        rot.x += target.y * p.pointer_gain;
        rot.y += target.x * p.pointer_gain;
    }
}

impl Default for WaveMotion {
    fn default() -> Self {
        Self::new(WaveParams::default())
    }
}

impl MotionStrategy for WaveMotion {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn clock(&self) -> ClockMode {
        ClockMode::FixedStep(self.params.time_step)
    }

    fn required_layout(&self) -> FieldLayout {
        FieldLayout::default().with_colors().with_sizes()
    }

    fn advance(&mut self, field: &mut ParticleField, frame: &Frame) -> DirtyBuffers {
        if field.is_empty() {
            return DirtyBuffers::NONE;
        }

        let target = self.pointer.update(frame.pointer);
        self.rotate(target);

        let p = self.params;
        let t = frame.time;
        let buffers = field.buffers_mut();
        let mut colors = buffers.colors;
        let mut sizes = buffers.sizes;

        for (i, pos) in buffers.positions.iter_mut().enumerate() {
            let Vec3 { x, y, z } = *pos;

            *pos = Vec3::new(
                x + (t + y + z).sin() * p.amplitude,
                y + (t + x + z).cos() * p.amplitude,
                z + (t + x + y).sin() * p.amplitude,
            );

            if let Some(sizes) = sizes.as_deref_mut() {
                sizes[i] = p.scale_base + (t + x + y + z).sin() * p.scale_amplitude;
            }

            if let Some(colors) = colors.as_deref_mut() {
                colors[i] = Vec3::new(
                    p.color_base + (t + x).sin() * p.color_amplitude,
                    p.color_base + (t + y).cos() * p.color_amplitude,
                    p.color_base + (t + z).sin() * p.color_amplitude,
                );
            }
        }

        let mut dirty = DirtyBuffers::POSITIONS | DirtyBuffers::TRANSFORM;
        if colors.is_some() {
            dirty |= DirtyBuffers::COLORS;
        }
        if sizes.is_some() {
            dirty |= DirtyBuffers::SIZES;
        }
        dirty
    }

    fn transform(&self) -> FieldTransform {
        self.transform
    }
}
