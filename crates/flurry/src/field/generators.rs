//! Seeded initial distributions for the two stock scenes.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::rng::Rng;
use super::seed::{FieldLayout, ParticleGenerator, ParticleSeed, Spin};

/// Particles scattered uniformly through a cube, with bright colors and
/// varied scales.
#[derive(Debug, Clone)]
pub struct WaveCloudGenerator {
    rng: Rng,
    /// Half the cube's edge length.
    pub half_extent: f32,
}

impl WaveCloudGenerator {
    pub const DEFAULT_HALF_EXTENT: f32 = 10.0;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            half_extent: Self::DEFAULT_HALF_EXTENT,
        }
    }
}

impl ParticleGenerator for WaveCloudGenerator {
    fn layout(&self) -> FieldLayout {
        FieldLayout::default().with_colors().with_sizes()
    }

    fn generate(&mut self, _index: usize) -> ParticleSeed {
        let h = self.half_extent;
        let position = Vec3::new(
            self.rng.range(-h, h),
            self.rng.range(-h, h),
            self.rng.range(-h, h),
        );
        // Channels stay in the upper half for vivid colors.
        let color = Vec3::new(
            self.rng.range(0.5, 1.0),
            self.rng.range(0.5, 1.0),
            self.rng.range(0.5, 1.0),
        );
        let size = self.rng.range(0.5, 1.0);
        ParticleSeed::at(position).with_color(color).with_size(size)
    }
}

/// Particles on a thick spherical shell, each with its own spin.
#[derive(Debug, Clone)]
pub struct SphereShellGenerator {
    rng: Rng,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl SphereShellGenerator {
    pub const DEFAULT_INNER_RADIUS: f32 = 2.0;
    pub const DEFAULT_OUTER_RADIUS: f32 = 3.0;
    pub const MIN_VELOCITY: f32 = 0.01;
    pub const MAX_VELOCITY: f32 = 0.03;
    pub const MIN_SIZE: f32 = 0.01;
    pub const MAX_SIZE: f32 = 0.018;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            inner_radius: Self::DEFAULT_INNER_RADIUS,
            outer_radius: Self::DEFAULT_OUTER_RADIUS,
        }
    }
}

impl ParticleGenerator for SphereShellGenerator {
    fn layout(&self) -> FieldLayout {
        FieldLayout::default().with_sizes().with_spins()
    }

    fn generate(&mut self, _index: usize) -> ParticleSeed {
        let radius = self.rng.range(self.inner_radius, self.outer_radius);
        let theta = self.rng.range(0.0, TAU);
        let phi = self.rng.range(0.0, PI);
        let position = Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        );
        let velocity = self.rng.range(Self::MIN_VELOCITY, Self::MAX_VELOCITY);
        let size = self.rng.range(Self::MIN_SIZE, Self::MAX_SIZE);
        let angle = self.rng.range(0.0, TAU);
        ParticleSeed::at(position)
            .with_size(size)
            .with_spin(Spin::new(angle, velocity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ParticleField;

    #[test]
    fn wave_cloud_stays_in_cube() {
        let field = ParticleField::create(2000, WaveCloudGenerator::new(3)).unwrap();
        assert!(field.positions().iter().all(|v| (-10.0..=10.0).contains(v)));
        let colors = field.colors().unwrap();
        assert!(colors.iter().all(|c| (0.5..=1.0).contains(c)));
        let sizes = field.sizes().unwrap();
        assert!(sizes.iter().all(|s| (0.5..=1.0).contains(s)));
    }

    #[test]
    fn sphere_shell_respects_radii() {
        let field = ParticleField::create(2000, SphereShellGenerator::new(11)).unwrap();
        for i in 0..field.count() {
            let r = field.position(i).length();
            assert!(r >= 2.0 - 1e-4 && r < 3.0 + 1e-4, "radius {} out of shell", r);
        }
        for spin in field.spins().unwrap() {
            assert!(spin.velocity >= 0.01 && spin.velocity <= 0.03);
            assert!(spin.angle >= 0.0 && spin.angle <= TAU);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::create(500, SphereShellGenerator::new(5)).unwrap();
        let b = ParticleField::create(500, SphereShellGenerator::new(5)).unwrap();
        assert_eq!(a, b);
        let c = ParticleField::create(500, SphereShellGenerator::new(6)).unwrap();
        assert_ne!(a, c);
    }
}
