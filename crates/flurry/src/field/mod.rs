//! Particle attribute storage.
//!
//! A `ParticleField` owns flat, fixed-size buffers (structure of arrays) that
//! the host renderer can upload directly. Buffers are allocated once and never
//! resized; a motion strategy mutates them through [`ParticleField::buffers_mut`]
//! for the duration of a single advance.

mod generators;
mod rng;
mod seed;

pub use generators::{SphereShellGenerator, WaveCloudGenerator};
pub use rng::Rng;
pub use seed::{from_fn, FieldLayout, FnGenerator, ParticleGenerator, ParticleSeed, Spin};

use glam::Vec3;

use crate::error::FieldError;

/// Floats per position entry.
pub const POSITION_STRIDE: usize = 3;
/// Floats per color entry.
pub const COLOR_STRIDE: usize = 3;

/// Fixed-size particle storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    count: usize,
    positions: Vec<f32>,
    colors: Option<Vec<f32>>,
    sizes: Option<Vec<f32>>,
    spins: Option<Vec<Spin>>,
}

/// Exclusive view of a field's buffers, lent to a motion strategy.
pub struct FieldBuffersMut<'a> {
    pub positions: &'a mut [Vec3],
    pub colors: Option<&'a mut [Vec3]>,
    pub sizes: Option<&'a mut [f32]>,
    pub spins: Option<&'a mut [Spin]>,
}

impl ParticleField {
    /// Allocate every buffer the generator's layout declares and fill them by
    /// calling the generator once per index, in order.
    pub fn create<G: ParticleGenerator>(count: usize, mut generator: G) -> Result<Self, FieldError> {
        let layout = generator.layout();
        let mut positions = Vec::with_capacity(count * POSITION_STRIDE);
        let mut colors = layout.colors.then(|| Vec::with_capacity(count * COLOR_STRIDE));
        let mut sizes = layout.sizes.then(|| Vec::with_capacity(count));
        let mut spins = layout.spins.then(|| Vec::with_capacity(count));

        for index in 0..count {
            let seed = generator.generate(index);
            if let Some(attribute) = seed.mismatch(&layout) {
                return Err(FieldError::InconsistentSeed { index, attribute });
            }
            positions.extend_from_slice(&seed.position.to_array());
            if let (Some(buf), Some(color)) = (colors.as_mut(), seed.color) {
                buf.extend_from_slice(&color.to_array());
            }
            if let (Some(buf), Some(size)) = (sizes.as_mut(), seed.size) {
                buf.push(size);
            }
            if let (Some(buf), Some(spin)) = (spins.as_mut(), seed.spin) {
                buf.push(spin);
            }
        }

        log::debug!("allocated particle field: {} particles, layout {:?}", count, layout);
        Ok(Self {
            count,
            positions,
            colors,
            sizes,
            spins,
        })
    }

    /// Adopt prebuilt buffers. The particle count is taken from `positions`;
    /// every other buffer must match it exactly.
    pub fn from_buffers(
        positions: Vec<f32>,
        colors: Option<Vec<f32>>,
        sizes: Option<Vec<f32>>,
        spins: Option<Vec<Spin>>,
    ) -> Result<Self, FieldError> {
        if positions.len() % POSITION_STRIDE != 0 {
            return Err(FieldError::LengthMismatch {
                buffer: "positions",
                expected: positions.len() / POSITION_STRIDE * POSITION_STRIDE,
                actual: positions.len(),
            });
        }
        let count = positions.len() / POSITION_STRIDE;
        check_len("colors", colors.as_ref().map(Vec::len), count * COLOR_STRIDE)?;
        check_len("sizes", sizes.as_ref().map(Vec::len), count)?;
        check_len("spins", spins.as_ref().map(Vec::len), count)?;
        Ok(Self {
            count,
            positions,
            colors,
            sizes,
            spins,
        })
    }

    /// Convert a host-supplied count, rejecting negatives.
    pub fn checked_count(raw: i64) -> Result<usize, FieldError> {
        usize::try_from(raw).map_err(|_| FieldError::NegativeCount(raw))
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn layout(&self) -> FieldLayout {
        FieldLayout {
            colors: self.colors.is_some(),
            sizes: self.sizes.is_some(),
            spins: self.spins.is_some(),
        }
    }

    /// Flat `x, y, z` triples, `3 * count` floats.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let at = index * POSITION_STRIDE;
        Vec3::from_slice(&self.positions[at..at + POSITION_STRIDE])
    }

    /// Flat `r, g, b` triples, `3 * count` floats.
    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    pub fn color(&self, index: usize) -> Option<Vec3> {
        let at = index * COLOR_STRIDE;
        self.colors
            .as_ref()
            .map(|c| Vec3::from_slice(&c[at..at + COLOR_STRIDE]))
    }

    /// One scale/size per particle.
    pub fn sizes(&self) -> Option<&[f32]> {
        self.sizes.as_deref()
    }

    pub fn spins(&self) -> Option<&[Spin]> {
        self.spins.as_deref()
    }

    /// Borrow every buffer mutably for one advance.
    pub fn buffers_mut(&mut self) -> FieldBuffersMut<'_> {
        FieldBuffersMut {
            positions: bytemuck::cast_slice_mut(&mut self.positions),
            colors: self.colors.as_deref_mut().map(bytemuck::cast_slice_mut),
            sizes: self.sizes.as_deref_mut(),
            spins: self.spins.as_deref_mut(),
        }
    }
}

fn check_len(buffer: &'static str, actual: Option<usize>, expected: usize) -> Result<(), FieldError> {
    match actual {
        Some(actual) if actual != expected => Err(FieldError::LengthMismatch {
            buffer,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}
