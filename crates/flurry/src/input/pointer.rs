use glam::Vec2;

/// Host viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Width over height, or 1.0 for a collapsed viewport.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Offset of a client-space point from the viewport center, divided by `scale`.
    pub fn normalize_pointer(&self, client: Vec2, scale: f32) -> Vec2 {
        (client - self.center()) / scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// One-pole low-pass filter that eases a target toward the raw pointer.
/// Never overshoots; the gap shrinks by `1 - factor` every update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPointer {
    target: Vec2,
    factor: f32,
}

impl SmoothedPointer {
    pub const DEFAULT_FACTOR: f32 = 0.1;

    pub fn new(factor: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            factor,
        }
    }

    /// Move the target a `factor` fraction of the way toward `raw`.
    pub fn update(&mut self, raw: Vec2) -> Vec2 {
        self.target.x += (raw.x - self.target.x) * self.factor;
        self.target.y += (raw.y - self.target.y) * self.factor;
        self.target
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}

impl Default for SmoothedPointer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FACTOR)
    }
}
