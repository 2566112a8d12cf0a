use glam::Vec2;

use crate::api::types::{DirtyBuffers, Frame, FrameReport};
use crate::core::time::AnimationClock;
use crate::error::{FieldError, TickError};
use crate::field::ParticleField;
use crate::input::slot::LatestSlot;
use crate::motion::{check_layout, FieldTransform, MotionStrategy};

/// Drives one field + strategy pair, one synchronous tick per display refresh.
///
/// The host posts pointer offsets whenever its callbacks fire; each tick reads
/// the latest one, advances the clock, lets the strategy rewrite the buffers,
/// and records which buffers the host must re-upload. No rendering resources
/// live here.
pub struct AnimationDriver<S: MotionStrategy> {
    field: ParticleField,
    strategy: S,
    clock: AnimationClock,
    pointer: LatestSlot<Vec2>,
    dirty: DirtyBuffers,
    frames: u64,
    torn_down: bool,
}

impl<S: MotionStrategy> AnimationDriver<S> {
    /// Pair a field with a strategy. Fails if the field lacks a buffer the
    /// strategy needs.
    pub fn new(field: ParticleField, strategy: S) -> Result<Self, FieldError> {
        check_layout(&strategy, &field)?;
        let clock = AnimationClock::new(strategy.clock());
        log::info!(
            "{} driver ready: {} particles, clock {:?}",
            strategy.name(),
            field.count(),
            clock.mode()
        );
        Ok(Self {
            field,
            strategy,
            clock,
            pointer: LatestSlot::new(Vec2::ZERO),
            dirty: DirtyBuffers::NONE,
            frames: 0,
            torn_down: false,
        })
    }

    /// Store the latest normalized pointer offset. Read on the next tick.
    pub fn post_pointer(&mut self, offset: Vec2) {
        self.pointer.post(offset);
    }

    /// Run one frame with host time `host_seconds`.
    pub fn tick(&mut self, host_seconds: f64) -> Result<FrameReport, TickError> {
        self.ensure_running()?;
        let time = self.clock.advance(host_seconds)?;
        Ok(self.run(time))
    }

    /// Run one frame at an explicit animation time, bypassing the clock.
    /// Used to replay recorded time sequences.
    pub fn tick_at(&mut self, time: f32) -> Result<FrameReport, TickError> {
        self.ensure_running()?;
        if !time.is_finite() {
            return Err(TickError::NonFiniteTime(time as f64));
        }
        self.clock.set(time);
        Ok(self.run(time))
    }

    fn ensure_running(&self) -> Result<(), TickError> {
        if self.torn_down {
            log::warn!("{}: tick after teardown rejected", self.strategy.name());
            return Err(TickError::TornDown);
        }
        Ok(())
    }

    fn run(&mut self, time: f32) -> FrameReport {
        let frame = Frame::new(time, self.pointer.latest());
        self.dirty = self.strategy.advance(&mut self.field, &frame);
        self.frames += 1;
        FrameReport {
            frame: self.frames,
            time,
            dirty: self.dirty,
        }
    }

    /// Stop accepting ticks. Returns the number of frames produced.
    pub fn teardown(&mut self) -> u64 {
        if !self.torn_down {
            self.torn_down = true;
            log::info!("{} driver torn down after {} frames", self.strategy.name(), self.frames);
        }
        self.frames
    }

    pub fn is_running(&self) -> bool {
        !self.torn_down
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Buffers changed by the most recent tick.
    pub fn dirty(&self) -> DirtyBuffers {
        self.dirty
    }

    pub fn transform(&self) -> FieldTransform {
        self.strategy.transform()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Animation time of the most recent tick.
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{SphereShellGenerator, WaveCloudGenerator};
    use crate::motion::{SphereMotion, WaveMotion};

    fn wave_driver(seed: u64) -> AnimationDriver<WaveMotion> {
        let field = ParticleField::create(200, WaveCloudGenerator::new(seed)).unwrap();
        AnimationDriver::new(field, WaveMotion::default()).unwrap()
    }

    #[test]
    fn wave_time_advances_by_fixed_step() {
        let mut driver = wave_driver(1);
        let r1 = driver.tick(0.0).unwrap();
        let r2 = driver.tick(123.0).unwrap();
        assert!((r1.time - 0.015).abs() < 1e-7);
        assert!((r2.time - 0.030).abs() < 1e-7);
        assert_eq!(r2.frame, 2);
        assert!(r2.dirty.contains(DirtyBuffers::POSITIONS | DirtyBuffers::COLORS | DirtyBuffers::SIZES));
    }

    #[test]
    fn replay_is_bit_identical() {
        let inputs = [
            (0.0, Vec2::ZERO),
            (0.016, Vec2::new(3.0, -1.0)),
            (0.033, Vec2::new(3.5, -1.5)),
            (0.050, Vec2::new(-8.0, 4.0)),
        ];
        let run = |seed| {
            let mut driver = wave_driver(seed);
            let mut history = Vec::new();
            for (t, p) in inputs {
                driver.post_pointer(p);
                driver.tick(t).unwrap();
                history.push(driver.field().clone());
            }
            (history, driver.transform())
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn pointer_slot_keeps_latest() {
        let mut driver = wave_driver(2);
        driver.post_pointer(Vec2::new(100.0, 100.0));
        driver.post_pointer(Vec2::new(10.0, 0.0));
        driver.tick(0.0).unwrap();
        let target = driver.strategy().pointer_target();
        assert!((target.x - 1.0).abs() < 1e-6);
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn sphere_uses_host_seconds() {
        let field = ParticleField::create(50, SphereShellGenerator::new(4)).unwrap();
        let mut driver = AnimationDriver::new(field, SphereMotion::default()).unwrap();
        assert_eq!(driver.tick(500.0).unwrap().time, 0.0);
        let r = driver.tick(501.5).unwrap();
        assert!((r.time - 1.5).abs() < 1e-6);
        assert_eq!(r.dirty, DirtyBuffers::POSITIONS);
    }

    #[test]
    fn sphere_replay_is_bit_identical_at_epoch_scale() {
        let deltas = [0.0, 0.25, 0.5, 1.75, 3.0];
        let run = |epoch: f64| {
            let field = ParticleField::create(64, SphereShellGenerator::new(21)).unwrap();
            let mut driver = AnimationDriver::new(field, SphereMotion::default()).unwrap();
            let mut history = Vec::new();
            for d in deltas {
                let report = driver.tick(epoch + d).unwrap();
                history.push((report.time.to_bits(), driver.field().clone()));
            }
            history
        };
        let first = run(1_700_000_000.0);
        assert_eq!(first, run(1_700_000_000.0));
        // Only time since the first tick reaches the strategy.
        assert_eq!(first, run(1_800_000_000.0));
        assert_eq!(first.last().unwrap().0, 3.0f32.to_bits());
    }

    #[test]
    fn mismatched_strategy_rejected() {
        let field = ParticleField::create(10, SphereShellGenerator::new(4)).unwrap();
        let result = AnimationDriver::new(field, WaveMotion::default());
        assert!(matches!(result, Err(FieldError::MissingBuffer { .. })));
    }

    #[test]
    fn teardown_stops_ticks() {
        let mut driver = wave_driver(3);
        driver.tick(0.0).unwrap();
        driver.tick(0.0).unwrap();
        assert_eq!(driver.teardown(), 2);
        assert!(!driver.is_running());
        assert_eq!(driver.tick(0.0), Err(TickError::TornDown));
        assert_eq!(driver.tick_at(1.0), Err(TickError::TornDown));
        assert_eq!(driver.teardown(), 2);
    }

    #[test]
    fn non_finite_time_is_not_a_frame() {
        let mut driver = wave_driver(4);
        assert!(driver.tick(f64::NAN).is_err());
        assert!(driver.tick_at(f32::INFINITY).is_err());
        assert_eq!(driver.frame_count(), 0);
        assert!(driver.dirty().is_empty());
    }

    #[test]
    fn empty_field_ticks_cleanly() {
        let field = ParticleField::create(0, WaveCloudGenerator::new(1)).unwrap();
        let mut driver = AnimationDriver::new(field, WaveMotion::default()).unwrap();
        let r = driver.tick(0.0).unwrap();
        assert!(r.dirty.is_empty());
        assert_eq!(r.frame, 1);
    }
}
