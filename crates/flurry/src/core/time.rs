use crate::error::TickError;

/// How a strategy wants animation time delivered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Add a constant per tick, independent of the display rate.
    FixedStep(f32),
    /// Use host seconds, measured from the first tick.
    HostSeconds,
}

/// Converts host time into the animation time a strategy sees.
/// Never reads a system clock; the host passes time in.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    mode: ClockMode,
    elapsed: f32,
    /// Host time of the first tick, for `HostSeconds`.
    origin: Option<f64>,
    ticks: u64,
}

impl AnimationClock {
    pub fn new(mode: ClockMode) -> Self {
        Self {
            mode,
            elapsed: 0.0,
            origin: None,
            ticks: 0,
        }
    }

    /// Advance by one tick. Returns the animation time for this tick.
    ///
    /// In `FixedStep` mode the step is added before the time is returned, so
    /// the first tick sees one step, not zero.
    pub fn advance(&mut self, host_seconds: f64) -> Result<f32, TickError> {
        if !host_seconds.is_finite() {
            return Err(TickError::NonFiniteTime(host_seconds));
        }
        self.elapsed = match self.mode {
            ClockMode::FixedStep(step) => self.elapsed + step,
            ClockMode::HostSeconds => {
                // Measure from the first tick so f32 keeps sub-millisecond precision
                // even when the host passes epoch seconds.
                let origin = *self.origin.get_or_insert(host_seconds);
                (host_seconds - origin) as f32
            }
        };
        self.ticks += 1;
        Ok(self.elapsed)
    }

    /// Force the animation time for replay. Counts as a tick.
    pub fn set(&mut self, time: f32) {
        self.elapsed = time;
        self.ticks += 1;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }
}
