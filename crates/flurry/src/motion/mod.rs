//! Motion strategies: per-variant rules that rewrite a field's buffers each tick.

mod sphere;
mod wave;

pub use sphere::{SphereMotion, SphereParams};
pub use wave::{WaveMotion, WaveParams};

use glam::{EulerRot, Mat4, Vec3};

use crate::api::types::{DirtyBuffers, Frame};
use crate::core::time::ClockMode;
use crate::error::FieldError;
use crate::field::{FieldLayout, ParticleField};

/// A per-tick update rule over a [`ParticleField`].
pub trait MotionStrategy {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// How the driver should turn host time into `Frame::time`.
    fn clock(&self) -> ClockMode;

    /// Optional buffers this strategy writes or reads.
    fn required_layout(&self) -> FieldLayout;

    /// Rewrite the field for one frame and report what changed.
    /// Must be a no-op on an empty field.
    fn advance(&mut self, field: &mut ParticleField, frame: &Frame) -> DirtyBuffers;

    /// Rigid transform applied to the whole field by the host.
    fn transform(&self) -> FieldTransform {
        FieldTransform::IDENTITY
    }
}

/// Fail unless `field` carries every buffer `strategy` needs.
pub fn check_layout<S: MotionStrategy + ?Sized>(strategy: &S, field: &ParticleField) -> Result<(), FieldError> {
    match field.layout().first_missing(&strategy.required_layout()) {
        Some(buffer) => Err(FieldError::MissingBuffer {
            strategy: strategy.name(),
            buffer,
        }),
        None => Ok(()),
    }
}

/// Whole-field rotation, in radians per axis, applied X then Y then Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldTransform {
    pub rotation: Vec3,
}

impl FieldTransform {
    pub const IDENTITY: Self = Self { rotation: Vec3::ZERO };

    /// Column-major model matrix for the host renderer.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{from_fn, ParticleSeed};

    #[test]
    fn identity_transform_is_identity_matrix() {
        assert_eq!(FieldTransform::IDENTITY.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn single_axis_rotation_matches_glam() {
        let t = FieldTransform {
            rotation: Vec3::new(0.0, 0.3, 0.0),
        };
        assert!(t.model_matrix().abs_diff_eq(Mat4::from_rotation_y(0.3), 1e-6));
    }

    #[test]
    fn missing_buffer_is_reported() {
        let field = ParticleField::create(
            2,
            from_fn(FieldLayout::default().with_sizes(), |_| ParticleSeed::at(Vec3::ZERO).with_size(1.0)),
        )
        .unwrap();
        let err = check_layout(&WaveMotion::default(), &field).unwrap_err();
        assert!(matches!(
            err,
            FieldError::MissingBuffer { strategy: "wave", buffer: "colors" }
        ));
        let err = check_layout(&SphereMotion::default(), &field).unwrap_err();
        assert!(matches!(err, FieldError::MissingBuffer { buffer: "spins", .. }));
    }
}
