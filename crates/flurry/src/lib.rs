pub mod api;
pub mod bridge;
pub mod core;
pub mod error;
pub mod field;
pub mod input;
pub mod motion;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, ControlsConfig, MaterialConfig, RendererConfig, SceneConfig};
pub use api::scene::{start, FieldScene};
pub use api::types::{DirtyBuffers, Frame, FrameReport};
pub use bridge::protocol::FrameLayout;
pub use core::driver::AnimationDriver;
pub use core::time::{AnimationClock, ClockMode};
pub use error::{FieldError, TickError};
pub use field::{
    from_fn, FieldBuffersMut, FieldLayout, ParticleField, ParticleGenerator, ParticleSeed, Rng,
    SphereShellGenerator, Spin, WaveCloudGenerator,
};
pub use input::{LatestSlot, SmoothedPointer, Viewport};
pub use motion::{FieldTransform, MotionStrategy, SphereMotion, SphereParams, WaveMotion, WaveParams};
pub use renderer::camera::PerspectiveCamera;
