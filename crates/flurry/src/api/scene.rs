use crate::api::config::SceneConfig;
use crate::core::driver::AnimationDriver;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::motion::MotionStrategy;

/// The contract every demo fulfills: describe the scene, then build the
/// field and the strategy that animates it.
pub trait FieldScene {
    type Motion: MotionStrategy;

    /// Scene configuration. Called once before `build`.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Allocate and seed the field, and pick its motion.
    fn build(&mut self, config: &SceneConfig) -> Result<(ParticleField, Self::Motion), FieldError>;
}

/// Build a scene and wrap it in a driver.
pub fn start<S: FieldScene>(scene: &mut S, config: &SceneConfig) -> Result<AnimationDriver<S::Motion>, FieldError> {
    config.validate()?;
    let (field, motion) = scene.build(config)?;
    AnimationDriver::new(field, motion)
}
