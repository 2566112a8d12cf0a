//! Pulsing sphere: particles orbit the Y axis on a shell whose radius breathes
//! with a phase that travels across particle indices.

use std::f32::consts::PI;

use glam::Vec3;

use super::MotionStrategy;
use crate::api::types::{DirtyBuffers, Frame};
use crate::core::time::ClockMode;
use crate::field::{FieldLayout, ParticleField};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub base_radius: f32,
    pub pulse_amplitude: f32,
    /// Radians of pulse phase per second.
    pub pulse_rate: f32,
    /// Radians of pulse phase between neighbouring indices.
    pub phase_step: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            base_radius: 2.0,
            pulse_amplitude: 0.3,
            pulse_rate: 0.5,
            phase_step: 0.1,
        }
    }
}

/// Recomputes absolute positions every tick from spin angle, index and time.
///
/// Latitude comes from the index (`phi = i / count * π`), not from where the
/// particle was generated, so the initial latitude spread is discarded on the
/// first tick.
#[derive(Debug, Clone, Default)]
pub struct SphereMotion {
    params: SphereParams,
}

impl SphereMotion {
    pub fn new(params: SphereParams) -> Self {
        Self { params }
    }

    /// Shell radius for particle `index` at time `t`.
    pub fn radius_at(&self, t: f32, index: usize) -> f32 {
        let p = &self.params;
        p.base_radius + (t * p.pulse_rate + index as f32 * p.phase_step).sin() * p.pulse_amplitude
    }
}

impl MotionStrategy for SphereMotion {
    fn name(&self) -> &'static str {
        "sphere"
    }

    fn clock(&self) -> ClockMode {
        ClockMode::HostSeconds
    }

    fn required_layout(&self) -> FieldLayout {
        FieldLayout::default().with_spins()
    }

    fn advance(&mut self, field: &mut ParticleField, frame: &Frame) -> DirtyBuffers {
        let count = field.count();
        let buffers = field.buffers_mut();
        let Some(spins) = buffers.spins else {
            return DirtyBuffers::NONE;
        };
        if count == 0 {
            return DirtyBuffers::NONE;
        }

        for (i, (pos, spin)) in buffers.positions.iter_mut().zip(spins.iter_mut()).enumerate() {
            spin.angle += spin.velocity;

            let radius = self.radius_at(frame.time, i);
            let theta = spin.angle;
            let phi = (i as f32 / count as f32) * PI;

            *pos = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
        }

        DirtyBuffers::POSITIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{from_fn, ParticleSeed, SphereShellGenerator, Spin};
    use proptest::prelude::*;

    fn spinning(spins: Vec<Spin>) -> ParticleField {
        let layout = FieldLayout::default().with_spins();
        ParticleField::create(
            spins.len(),
            from_fn(layout, move |i| ParticleSeed::at(Vec3::ZERO).with_spin(spins[i])),
        )
        .unwrap()
    }

    #[test]
    fn single_particle_at_pole() {
        let mut field = spinning(vec![Spin::new(0.0, 0.02)]);
        let mut sphere = SphereMotion::default();
        let dirty = sphere.advance(&mut field, &Frame::at(0.0));

        assert_eq!(field.spins().unwrap()[0].angle, 0.02);
        // phi = 0: the particle sits on the pole, y = radius = 2.
        let p = field.position(0);
        assert_eq!(p, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(dirty, DirtyBuffers::POSITIONS);

        sphere.advance(&mut field, &Frame::at(0.0));
        assert!((field.spins().unwrap()[0].angle - 0.04).abs() < 1e-7);
    }

    #[test]
    fn rotation_follows_angle_off_the_pole() {
        let mut field = spinning(vec![Spin::new(0.0, 0.0), Spin::new(0.0, 0.5)]);
        let mut sphere = SphereMotion::default();
        sphere.advance(&mut field, &Frame::at(0.0));

        // Index 1 of 2 sits on the equator.
        let p = field.position(1);
        let r = sphere.radius_at(0.0, 1);
        assert!(p.y.abs() < 1e-6);
        assert!((p.x - r * 0.5f32.cos()).abs() < 1e-6);
        assert!((p.z - r * 0.5f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn latitude_ignores_generated_position() {
        let mut field = ParticleField::create(4, SphereShellGenerator::new(9)).unwrap();
        let mut sphere = SphereMotion::default();
        sphere.advance(&mut field, &Frame::at(1.0));
        for i in 0..4 {
            let p = field.position(i);
            let phi = (i as f32 / 4.0) * PI;
            let expected_y = sphere.radius_at(1.0, i) * phi.cos();
            assert!((p.y - expected_y).abs() < 1e-5);
        }
    }

    #[test]
    fn stationary_spins_are_stateless() {
        let mut field = spinning(vec![Spin::new(1.0, 0.0); 8]);
        let mut sphere = SphereMotion::default();
        sphere.advance(&mut field, &Frame::at(3.0));
        let first = field.positions().to_vec();
        sphere.advance(&mut field, &Frame::at(3.0));
        assert_eq!(field.positions(), &first[..]);
    }

    #[test]
    fn empty_field_is_noop() {
        let mut field = spinning(Vec::new());
        assert!(SphereMotion::default().advance(&mut field, &Frame::at(1.0)).is_empty());
    }

    proptest! {
        #[test]
        fn radius_stays_in_band(t in -10_000.0f32..10_000.0, i in 0usize..100_000) {
            let r = SphereMotion::default().radius_at(t, i);
            prop_assert!(r >= 2.0 - 0.3 - 1e-6 && r <= 2.0 + 0.3 + 1e-6);
        }

        #[test]
        fn particles_lie_on_their_shell(t in 0.0f32..100.0, seed in 1u64..1000) {
            let mut field = ParticleField::create(32, SphereShellGenerator::new(seed)).unwrap();
            let mut sphere = SphereMotion::default();
            sphere.advance(&mut field, &Frame::at(t));
            for i in 0..field.count() {
                let r = sphere.radius_at(t, i);
                prop_assert!((field.position(i).length() - r).abs() < 1e-4);
            }
        }
    }
}
