//! Per-particle generation inputs: seeds, layouts, and the generator contract.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Orbital state carried by particles that spin around the Y axis.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Spin {
    /// Current azimuth in radians. Grows without bound.
    pub angle: f32,
    /// Radians added to `angle` every tick.
    pub velocity: f32,
}

impl Spin {
    pub fn new(angle: f32, velocity: f32) -> Self {
        Self { angle, velocity }
    }
}

/// Which optional buffers a field carries. Positions are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldLayout {
    pub colors: bool,
    pub sizes: bool,
    pub spins: bool,
}

impl FieldLayout {
    pub fn with_colors(mut self) -> Self {
        self.colors = true;
        self
    }

    pub fn with_sizes(mut self) -> Self {
        self.sizes = true;
        self
    }

    pub fn with_spins(mut self) -> Self {
        self.spins = true;
        self
    }

    /// Name of the first buffer `required` asks for that `self` lacks.
    pub fn first_missing(&self, required: &FieldLayout) -> Option<&'static str> {
        if required.colors && !self.colors {
            Some("colors")
        } else if required.sizes && !self.sizes {
            Some("sizes")
        } else if required.spins && !self.spins {
            Some("spins")
        } else {
            None
        }
    }
}

/// Initial attributes of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    pub position: Vec3,
    pub color: Option<Vec3>,
    pub size: Option<f32>,
    pub spin: Option<Spin>,
}

impl ParticleSeed {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            color: None,
            size: None,
            spin: None,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = Some(spin);
        self
    }

    /// The attribute on which this seed disagrees with `layout`, if any.
    pub(crate) fn mismatch(&self, layout: &FieldLayout) -> Option<&'static str> {
        if self.color.is_some() != layout.colors {
            Some("color")
        } else if self.size.is_some() != layout.sizes {
            Some("size")
        } else if self.spin.is_some() != layout.spins {
            Some("spin")
        } else {
            None
        }
    }
}

/// Produces one seed per particle, called in index order `0..count`.
pub trait ParticleGenerator {
    /// Buffers every seed from this generator will fill.
    fn layout(&self) -> FieldLayout;

    fn generate(&mut self, index: usize) -> ParticleSeed;
}

/// Generator backed by a closure.
pub struct FnGenerator<F> {
    layout: FieldLayout,
    f: F,
}

/// Wrap a closure as a [`ParticleGenerator`] with an explicit layout.
pub fn from_fn<F>(layout: FieldLayout, f: F) -> FnGenerator<F>
where
    F: FnMut(usize) -> ParticleSeed,
{
    FnGenerator { layout, f }
}

impl<F> ParticleGenerator for FnGenerator<F>
where
    F: FnMut(usize) -> ParticleSeed,
{
    fn layout(&self) -> FieldLayout {
        self.layout
    }

    fn generate(&mut self, index: usize) -> ParticleSeed {
        (self.f)(index)
    }
}
